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

//! Parser.
//!
//! Recursive descent with panic-mode error recovery.  Each rule receives the
//! set of symbols that may follow it and resynchronizes on that set.  A
//! missing symbol is reported and treated as present; an unexpected symbol
//! is reported and skipped, but only at a synchronization point.
//!
//! ```text
//! source_file = program_decl block "." EOF
//! program_decl = "Program" IDENT ";"
//! block        = "Begin" ( expression ";" )* "End"
//! expression   = NUMBER
//! ```

use std::io::Write;

use tracing::debug;

use crate::emit::Emitter;
use crate::error::Result;
use crate::message::{ErrorKind::{self, *}, Log};
use crate::session::Session;

use super::lexer::Lexer;
use super::symbol::{Symbol::{self, *}, SymbolSet};

#[derive(Debug)]
pub struct Parser<'a, I, W, L>
where
    I: Iterator<Item = u8>,
    W: Write,
    L: Log,
{
    lexer:   Lexer<I>,
    output:  Emitter<W>,
    session: &'a mut Session<L>,
}

impl<'a, I, W, L> Parser<'a, I, W, L>
where
    I: Iterator<Item = u8>,
    W: Write,
    L: Log,
{
    pub fn new(lexer: Lexer<I>, output: Emitter<W>, session: &'a mut Session<L>) -> Self {
        Self { lexer, output, session }
    }

    /// Parses a source file, emitting code as constructs are recognized.
    ///
    /// Errors in the source file are reported to the session and do not
    /// stop parsing.  This method fails only if output cannot be written.
    pub fn parse(&mut self) -> Result {
        self.output.preamble()?;

        self.advance();
        self.program_declaration(Begin | Eof);

        self.output.entry()?;

        self.block(Period | Eof)?;
        self.expect(Period, PeriodInserted);

        // Anything after the final period
        if self.lexer.symbol() != Eof {
            self.error(EofInserted);
        }

        self.output.exit()?;
        Ok(())
    }

    fn program_declaration(&mut self, follow: SymbolSet) {
        debug!(?follow, "program declaration");

        self.sync(Program | follow);
        self.expect(Program,   ProgramInserted);

        if self.lexer.symbol() == Ident {
            debug!(name = self.lexer.ident(), "program name");
        }

        self.expect(Ident,     IdentInserted);
        self.expect(Semicolon, SemicolonInserted);
        self.sync(follow);
    }

    fn block(&mut self, follow: SymbolSet) -> Result {
        debug!(?follow, "block");

        self.sync(Begin | End | follow);
        self.expect(Begin, BeginInserted);

        loop {
            self.sync(Number | End | follow);
            if self.lexer.symbol() != Number { break }

            self.expression(Semicolon | End | follow)?;
            self.expect(Semicolon, SemicolonInserted);
        }

        self.expect(End, EndInserted);
        self.sync(follow);
        Ok(())
    }

    fn expression(&mut self, follow: SymbolSet) -> Result {
        debug!(?follow, "expression");

        self.sync(Number | follow);

        if self.lexer.symbol() == Number {
            let value = self.lexer.number();
            self.advance();
            self.output.load(value)?;
            self.sync(follow);
        } else {
            self.error(NumberInserted);
        }

        Ok(())
    }

    /// Skips symbols until the lookahead symbol is in the `accept` set,
    /// reporting each skipped symbol.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if `accept` does not contain [`Symbol::Eof`].
    ///
    fn sync(&mut self, accept: SymbolSet) {
        debug_assert!(accept.has(Eof), "sync set must contain EOF");

        while !accept.has(self.lexer.symbol()) {
            self.error(SymbolDeleted);
            self.advance();
        }
    }

    /// Consumes the lookahead symbol if it is `sym`.  Otherwise, reports
    /// `kind` and continues as if `sym` were present.
    fn expect(&mut self, sym: Symbol, kind: ErrorKind) {
        if self.lexer.symbol() == sym {
            self.advance();
        } else {
            self.error(kind);
        }
    }

    #[inline]
    fn advance(&mut self) -> Symbol {
        self.lexer.next(self.session)
    }

    #[inline]
    fn error(&mut self, kind: ErrorKind) {
        self.lexer.report(self.session, kind)
    }

    /// Consumes the parser, returning the output sink.
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::message::ErrorSet;
    use crate::session::Session;

    const PREAMBLE: &str = "BITS 64\nGLOBAL _start\nSECTION .text\n";
    const ENTRY:    &str = "_start:\n";
    const EXIT:     &str = "  mov  eax, 1\n  mov  ebx, 0\n  int  0x80\n";

    fn compile(src: &str) -> (String, ErrorSet, Vec<String>) {
        let mut session = Session::new("test.pas", Vec::new());
        let output      = session.compile(src.bytes(), Vec::new()).unwrap();
        let output      = String::from_utf8(output).unwrap();
        (output, session.errors(), session.into_log())
    }

    fn program(loads: &[i32]) -> String {
        let mut s = format!("{}{}", PREAMBLE, ENTRY);
        for n in loads {
            s.push_str(&format!("  mov ecx, {}\n", n));
        }
        s.push_str(EXIT);
        s
    }

    #[test]
    fn parse_minimal() {
        let (output, errors, log) = compile("Program x; Begin End.");

        assert_eq!( output, program(&[])       );
        assert_eq!( errors, ErrorSet::empty()  );
        assert_eq!( log,    Vec::<String>::new() );
    }

    #[test]
    fn parse_literal() {
        let (output, errors, _) = compile("Program x; Begin 42; End.");

        assert_eq!( output, program(&[42])    );
        assert_eq!( errors, ErrorSet::empty() );
    }

    #[test]
    fn parse_literals_multiline() {
        let (output, errors, _) = compile(
            "Program counter;\n\
             Begin\n\
             \x20 1;\n\
             \x20 22;\n\
             \x20 333;\n\
             End.\n"
        );

        assert_eq!( output, program(&[1, 22, 333]) );
        assert_eq!( errors, ErrorSet::empty()      );
    }

    #[test]
    fn parse_missing_semicolon() {
        let (output, errors, log) = compile("Program x Begin End.");

        assert_eq!( output,     program(&[])                 );
        assert_eq!( errors,     ErrorSet::SEMICOLON_INSERTED );
        assert_eq!( log.len(),  2                            );
        assert!(    log[0].starts_with("test.pas:1:16: ")    );
        assert!(    log[0].contains("\";\" inserted")        );
        assert!(    log[0].contains("Program x Begin End.")  );
        assert!(    log[1].starts_with("errors in source file:") );
        assert!(    log[1].contains("     5  \";\" inserted")   );
    }

    #[test]
    fn parse_missing_semicolon_after_literal() {
        let (output, errors, _) = compile("Program x; Begin 42 End.");

        assert_eq!( output, program(&[42])               );
        assert_eq!( errors, ErrorSet::SEMICOLON_INSERTED );
    }

    #[test]
    fn parse_missing_period() {
        let (output, errors, _) = compile("Program x; Begin End");

        assert_eq!( output, program(&[])              );
        assert_eq!( errors, ErrorSet::PERIOD_INSERTED );
    }

    #[test]
    fn parse_trailing_garbage() {
        let (output, errors, _) = compile("Program x; Begin End. garbage");

        assert_eq!( output, program(&[])           );
        assert_eq!( errors, ErrorSet::EOF_INSERTED );
    }

    #[test]
    fn parse_extra_literal_deleted() {
        let (output, errors, log) = compile("Program x; Begin 1 2; End.");

        assert_eq!( output,    program(&[1])            );
        assert_eq!( errors,    ErrorSet::SYMBOL_DELETED );
        assert_eq!( log.len(), 2                        );
    }

    #[test]
    fn parse_invalid_symbols_deleted() {
        let (output, errors, log) = compile("Program x; Begin @ # 5; End.");

        assert_eq!( output,    program(&[5])            );
        assert_eq!( errors,    ErrorSet::SYMBOL_DELETED );
        assert_eq!( log.len(), 3                        );
    }

    #[test]
    fn parse_empty() {
        let (output, errors, _) = compile("");

        assert_eq!( output, program(&[]) );
        assert_eq!(
            errors,
            ErrorSet::PROGRAM_INSERTED
                | ErrorSet::IDENT_INSERTED
                | ErrorSet::SEMICOLON_INSERTED
                | ErrorSet::BEGIN_INSERTED
                | ErrorSet::END_INSERTED
                | ErrorSet::PERIOD_INSERTED
        );
    }

    #[test]
    fn parse_lowercase_keywords() {
        let (output, errors, _) = compile("program x; begin end.");

        assert_eq!( output, program(&[]) );
        assert_eq!( errors.contains(ErrorSet::SYMBOL_DELETED),   true  );
        assert_eq!( errors.contains(ErrorSet::PROGRAM_INSERTED), true  );
        assert_eq!( errors.contains(ErrorSet::EOF_INSERTED),     false );
    }

    #[test]
    fn parse_overflow_literal() {
        let (output, errors, _) = compile("Program x; Begin 99999999999; End.");

        assert_eq!( output, program(&[0])      );
        assert_eq!( errors, ErrorSet::OVERFLOW );
    }

    #[test]
    fn parse_line_too_long() {
        let src = format!("Program x;{}\nBegin 7; End.", " ".repeat(72));
        let (output, errors, log) = compile(&src);

        assert_eq!( output,    program(&[7])           );
        assert_eq!( errors,    ErrorSet::LINE_TOO_LONG );
        assert_eq!( log.len(), 2                       );
        assert!(    log[0].starts_with("test.pas:1:81: ") );
    }

    #[test]
    fn parse_missing_begin() {
        let (output, errors, _) = compile("Program x; 5; End.");

        // Only Begin may follow the header, so the block body is skipped
        assert_eq!( output, program(&[]) );
        assert_eq!(
            errors,
            ErrorSet::SYMBOL_DELETED
                | ErrorSet::BEGIN_INSERTED
                | ErrorSet::END_INSERTED
                | ErrorSet::PERIOD_INSERTED
        );
    }

    #[test]
    fn parse_missing_header() {
        let (output, errors, _) = compile("Begin 3; End.");

        assert_eq!( output, program(&[3]) );
        assert_eq!(
            errors,
            ErrorSet::PROGRAM_INSERTED | ErrorSet::IDENT_INSERTED | ErrorSet::SEMICOLON_INSERTED
        );
    }
}
