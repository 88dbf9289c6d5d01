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

//! Compilation session.

use std::io::Write;

use tracing::{debug, info};

use crate::emit::Emitter;
use crate::error::Result;
use crate::lang::lexer::Lexer;
use crate::lang::parser::Parser;
use crate::message::{ErrorKind, ErrorSet, Log, Message, Severity, Stderr};
use crate::util::Location;

// ----------------------------------------------------------------------------

/// Compilation session.  Records which categories of error have occurred in
/// a source file and sends diagnostics to a [`Log`].
#[derive(Debug)]
pub struct Session<L: Log = Stderr> {
    path:   String,
    log:    L,
    errors: ErrorSet,
}

impl<L: Log> Session<L> {
    /// Creates a new [`Session`] for the source file at `path`.
    pub fn new(path: impl Into<String>, log: L) -> Self {
        Self { path: path.into(), log, errors: ErrorSet::empty() }
    }

    /// Returns the set of error categories reported so far.
    #[inline]
    pub fn errors(&self) -> ErrorSet {
        self.errors
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn into_log(self) -> L {
        self.log
    }

    /// Reports an error of the given `kind` at location `at` within the
    /// source line `text`.
    pub fn report(&mut self, kind: ErrorKind, at: Location, text: &str) {
        debug!(code = kind.code(), line = at.line, column = at.column, "{}", kind);

        self.errors |= kind.set();
        self.log.log(
            Message::at(
                &self.path, at, Severity::Error,
                format_args!("{} [{}]", kind, kind.code())
            )
            .with_excerpt(text)
        );
    }

    /// Compiles the source bytes `input`, writing generated code to `output`.
    ///
    /// Errors in the source are reported as they are found, then summarized
    /// after the final line.  Returns the output sink on success.
    pub fn compile<I, W>(&mut self, input: I, output: W) -> Result<W>
    where
        I: IntoIterator<Item = u8>,
        W: Write,
    {
        info!(path = %self.path, "compiling");

        let     lexer  = Lexer::new(input.into_iter());
        let mut parser = Parser::new(lexer, Emitter::new(output), self);

        parser.parse()?;
        let output = parser.into_output();

        if !self.errors.is_empty() {
            self.log.log(self.errors.summary());
        }

        info!(errors = ?self.errors, "compiled");
        Ok(output)
    }

    /// Returns `Ok` if no errors were reported, or the set of reported error
    /// categories otherwise.
    pub fn result(&self) -> Result<(), ErrorSet> {
        match self.errors {
            e if e.is_empty() => Ok(()),
            e                 => Err(e),
        }
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_report() {
        colored::control::set_override(false);

        let mut session = Session::new("a.pas", Vec::<String>::new());

        session.report(ErrorKind::EndInserted, Location::new(2, 4), "x .");
        session.report(ErrorKind::EndInserted, Location::new(2, 4), "x .");

        assert_eq!( session.errors(),    ErrorSet::END_INSERTED );
        assert_eq!( session.log().len(), 2                      );
        assert!(    session.log()[0].starts_with("a.pas:2:4: error: \"End\" inserted [7]\n") );
    }

    #[test]
    fn session_result() {
        let mut session = Session::new("a.pas", Vec::<String>::new());

        assert_eq!( session.result(), Ok(()) );

        session.report(ErrorKind::Overflow,    Location::new(1, 1), "");
        session.report(ErrorKind::LineTooLong, Location::new(1, 1), "");

        assert_eq!( session.result(), Err(ErrorSet::OVERFLOW | ErrorSet::LINE_TOO_LONG) );
    }

    #[test]
    fn session_compile_clean() {
        let mut session = Session::new("a.pas", Vec::<String>::new());

        let output = session.compile("Program a; Begin End.".bytes(), Vec::new()).unwrap();

        assert!(    !output.is_empty()          );
        assert_eq!( session.result(),    Ok(()) );
        assert_eq!( session.log().len(), 0      );
    }

    #[test]
    fn session_compile_summary() {
        colored::control::set_override(false);

        let mut session = Session::new("a.pas", Vec::<String>::new());

        session.compile("Begin End".bytes(), Vec::new()).unwrap();

        let log = session.into_log();
        assert_eq!(
            log.last().map(String::as_str),
            Some(
                "errors in source file:\n     \
                     3  \"Program\" inserted\n     \
                     4  identifier inserted\n     \
                     5  \";\" inserted\n     \
                     8  \".\" inserted"
            )
        );
    }

    #[test]
    fn session_compile_write_error() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "broken"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut session = Session::new("a.pas", Vec::<String>::new());

        let result = session.compile("Program a; Begin End.".bytes(), Broken);

        assert!( matches!(result, Err(crate::error::Error::Emit(_))) );
    }
}
