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

//! Lexical analyzer.

use tracing::trace;

use crate::message::{ErrorKind, Log};
use crate::session::Session;
use crate::util::Location;

use super::input::{LineReader, MAX_LINE_WIDTH};
use super::symbol::Symbol;


/// Count of significant characters in an identifier.  Further characters are
/// scanned but dropped.
pub const MAX_IDENT_LEN: usize = 10;

/// Reserved words.
static KEYWORDS: [(&str, Symbol); 3] = [
    ("Begin",   Symbol::Begin  ),
    ("End",     Symbol::End    ),
    ("Program", Symbol::Program),
];

// ----------------------------------------------------------------------------

/// Lexical analyzer.  Reads input and yields a stream of lexical symbols,
/// keeping one symbol of lookahead.
#[derive(Clone, Debug)]
pub struct Lexer<I: Iterator<Item = u8>> {
    input: LineReader<I>,
    sym:   Symbol,
    ident: String,
    num:   i32,
}

impl<I: Iterator<Item = u8>> Lexer<I> {
    /// Creates a new lexical analyzer for the given input iterator.
    ///
    /// No input is read until the first call to [`Self::next()`].
    pub fn new(iter: I) -> Self {
        Self {
            input: LineReader::new(iter),
            sym:   Symbol::Invalid,
            ident: String::with_capacity(MAX_IDENT_LEN),
            num:   0,
        }
    }

    /// Advances to the next symbol and returns it.
    ///
    /// Errors found while scanning are reported to `session`.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the previous symbol was [`Symbol::Eof`].
    ///
    pub fn next<L: Log>(&mut self, session: &mut Session<L>) -> Symbol {
        debug_assert!(self.sym != Symbol::Eof, "scanned past end of input");

        while self.input.traits().is_white() {
            self.advance(session);
        }

        let traits = self.input.traits();

        self.sym = if traits.is_letter() {
            self.scan_ident(session)
        } else if traits.is_digit() {
            self.scan_number(session)
        } else if self.input.is_eof() {
            Symbol::Eof
        } else {
            self.advance(session);
            traits.symbol()
        };

        trace!(sym = %self.sym, line = self.input.line(), "symbol");
        self.sym
    }

    fn scan_ident<L: Log>(&mut self, session: &mut Session<L>) -> Symbol {
        self.ident.clear();

        while self.input.traits().is_alnum() {
            if self.ident.len() < MAX_IDENT_LEN {
                self.ident.extend(self.input.current().map(char::from));
            }
            self.advance(session);
        }

        KEYWORDS
            .iter()
            .find(|&&(word, _)| word == self.ident)
            .map_or(Symbol::Ident, |&(_, sym)| sym)
    }

    fn scan_number<L: Log>(&mut self, session: &mut Session<L>) -> Symbol {
        let mut num = Some(0i32);

        while self.input.traits().is_digit() {
            if let Some(n) = num {
                let digit = self.input.current().map_or(0, |b| (b - b'0') as i32);

                // Once overflowed, the literal is 0 and further digits are
                // consumed without accumulating.
                num = n.checked_mul(10).and_then(|n| n.checked_add(digit));
                if num.is_none() {
                    self.report(session, ErrorKind::Overflow);
                }
            }
            self.advance(session);
        }

        self.num = num.unwrap_or(0);
        Symbol::Number
    }

    fn advance<L: Log>(&mut self, session: &mut Session<L>) {
        self.input.advance();

        if self.input.take_overflow() {
            let at = Location::new(self.input.line(), MAX_LINE_WIDTH + 1);
            session.report(ErrorKind::LineTooLong, at, &self.input.text());
        }
    }

    /// Reports an error of the given `kind` at the current input position.
    pub fn report<L: Log>(&self, session: &mut Session<L>, kind: ErrorKind) {
        session.report(kind, self.location(), &self.input.text());
    }

    /// Returns the current lookahead symbol.
    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.sym
    }

    /// Returns the significant text of the most recent identifier or keyword.
    #[inline]
    pub fn ident(&self) -> &str {
        &self.ident
    }

    /// Returns the value of the most recent numeric literal.
    #[inline]
    pub fn number(&self) -> i32 {
        self.num
    }

    /// Returns the location of the character following the current symbol.
    #[inline]
    pub fn location(&self) -> Location {
        self.input.location()
    }
}
