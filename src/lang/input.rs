// This file is part of mpc, a minimal Pascal compiler.
// Copyright 2022 Jeffrey Sharp
//
// SPDX-License-Identifier: GPL-3.0-or-later
//
// mpc is free software: you can redistribute it and/or modify it
// under the terms of the GNU General Public License as published
// by the Free Software Foundation, either version 3 of the License,
// or (at your option) any later version.
//
// mpc is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See
// the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with mpc.  If not, see <http://www.gnu.org/licenses/>.

//! Line-buffered character source.

use std::borrow::Cow;

use tracing::debug;

use crate::util::Location;
use super::chars::{classify, Traits};

/// Maximum count of visible characters in a source line.
pub const MAX_LINE_WIDTH: usize = 80;

// ----------------------------------------------------------------------------

/// Input reader that buffers one source line at a time.
///
/// A `LineReader` takes a sequence of bytes as input and provides a
/// forward-only cursor over its characters.  The current character is `None`
/// once the end of input is reached.
///
/// The buffer is refilled only after its line terminator has been consumed.
/// Since a newline is whitespace, no token spans two physical lines.
///
#[derive(Clone, Debug)]
pub struct LineReader<I: Iterator<Item = u8>> {
    iter: I,
    cur:  Option<u8>,           // current character
    text: Vec<u8>,              // visible characters of current line
    end:  Option<u8>,           // line terminator: newline or EOF
    pos:  usize,                // count of characters consumed from line
    line: usize,                // 1-based number of current line
    held: Option<u8>,           // byte held back after a line overflow
    overflow: bool,             // whether a line overflow awaits reporting
}

impl<I: Iterator<Item = u8>> LineReader<I> {
    /// Creates a new [`LineReader`] over the given iterator.
    ///
    /// The reader starts positioned on a virtual space preceding the first
    /// line.  Call [`Self::advance()`] to read the first character.
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            cur:      Some(b' '),
            text:     Vec::with_capacity(MAX_LINE_WIDTH),
            end:      Some(b'\n'),
            pos:      1,
            line:     0,
            held:     None,
            overflow: false,
        }
    }

    /// Advances the reader to the next character, refilling the line buffer
    /// when the current line is exhausted.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the reader is positioned at the end of
    /// input.
    ///
    pub fn advance(&mut self) {
        debug_assert!(self.cur.is_some(), "read past end of input");

        if self.pos > self.text.len() {
            self.refill();
        }

        self.cur = match self.text.get(self.pos) {
            Some(&b) => Some(b),
            None     => self.end,
        };
        self.pos += 1;
    }

    fn refill(&mut self) {
        debug_assert!(self.traits().is_white(), "line refilled inside a token");

        self.text.clear();
        self.pos   = 0;
        self.line += 1;

        self.end = loop {
            let byte = match self.held.take().or_else(|| self.iter.next()) {
                Some(b) => b,
                None    => break None,
            };

            if byte == b'\n' {
                break Some(b'\n')
            }

            if self.text.len() == MAX_LINE_WIDTH {
                // Terminate the line here and replay the byte as the first
                // character of the next line.
                self.held     = Some(byte);
                self.overflow = true;
                break Some(b'\n')
            }

            self.text.push(byte);
        };

        debug!(line = self.line, len = self.text.len(), eof = self.end.is_none(), "line buffered");
    }

    /// Returns the current character, or `None` at the end of input.
    #[inline]
    pub fn current(&self) -> Option<u8> {
        self.cur
    }

    /// Returns the traits of the current character.
    #[inline]
    pub fn traits(&self) -> Traits {
        classify(self.cur)
    }

    /// Checks whether the reader is positioned at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.cur.is_none()
    }

    /// Returns the 1-based number of the current line.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 1-based column of the current character.
    #[inline]
    pub fn column(&self) -> usize {
        self.pos
    }

    /// Returns the location of the current character.
    #[inline]
    pub fn location(&self) -> Location {
        Location::new(self.line, self.column())
    }

    /// Returns the visible text of the current line.
    pub fn text(&self) -> Cow<str> {
        String::from_utf8_lossy(&self.text)
    }

    /// Returns `true` once if the most recent refill truncated an overlong
    /// line, and `false` otherwise.
    #[inline]
    pub fn take_overflow(&mut self) -> bool {
        std::mem::take(&mut self.overflow)
    }
}

// ----------------------------------------------------------------------------
