//! Compiler Messages
//
// This file is part of mpc, a minimal Pascal compiler.
// Copyright 2020 Jeffrey Sharp
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

use std::fmt::{self, Arguments, Display, Formatter};

use bitflags::bitflags;
use colored::*;

use crate::util::Location;

// -----------------------------------------------------------------------------

/// A compiler message.
#[derive(Copy, Clone, Debug)]
pub struct Message<'a> {
    /// Severity of the message.
    pub severity: Severity,

    /// Path of a source file related to the message, or the program name if no
    /// source file is related.
    pub source: &'a str,

    /// Textual location within source file related to the message, or
    /// [`Location::UNKNOWN`] if no location is related.
    pub location: Location,

    /// Message content.
    content: Arguments<'a>,

    /// Text of the source line at [`Self::location`], if any.
    excerpt: Option<&'a str>,
}

impl<'a> Message<'a> {
    /// Creates a `Message` with the given severity and format arguments,
    /// without a related source file path or textual location.
    #[inline]
    pub const fn new(sev: Severity, args: Arguments<'a>) -> Self {
        Self::at(crate::PROGRAM_NAME, Location::UNKNOWN, sev, args)
    }

    /// Creates a `Message` with the given severity and format arguments,
    /// related to the given source file path and textual location.
    #[inline]
    pub const fn at(path: &'a str, loc: Location, sev: Severity, args: Arguments<'a>) -> Self {
        Self {
            severity: sev,
            source:   path,
            location: loc,
            content:  args,
            excerpt:  None,
        }
    }

    /// Attaches the text of the source line at the message location.  The
    /// line is echoed below the message with a caret under the column.
    #[inline]
    pub fn with_excerpt(mut self, text: &'a str) -> Self {
        self.excerpt = Some(text);
        self
    }
}

// Display is used when a Message is printed as output.
impl Display for Message<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{}: {}{}",
            self.source,
            self.location,
            self.severity,
            self.content
        )?;

        if let Some(text) = self.excerpt {
            let Location { line, column } = self.location;
            write!(f, "\n{:>5} {} {}\n{:>5} {} {:>column$}",
                line, "|".blue(), text,
                "",   "|".blue(), "^".red().bold(),
                column = column.max(1)
            )?;
        }

        Ok(())
    }
}

// -----------------------------------------------------------------------------

/// Message severity levels.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Severity {
    /// For problems in the source file.  Compilation continues, and the
    /// compiler will produce best-effort output, but reports failure.
    Error,

    /// For severe, unrecoverable problems.
    /// The compiler terminates immediately.
    Fatal,
}

// Display is used when a Severity is printed in a compiler message.
impl Display for Severity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let label = match *self {
            Severity::Error  => "error:".red().bold(),
            Severity::Fatal  => "fatal:".red().bold(),
        };
        write!(f, "{} ", label)
    }
}

// -----------------------------------------------------------------------------

/// Categories of errors in a source file.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum ErrorKind {
    /// A source line exceeds the maximum line width.
    LineTooLong = 1,

    /// An unexpected symbol was skipped.
    SymbolDeleted,

    /// The `Program` keyword is missing.
    ProgramInserted,

    /// An identifier is missing.
    IdentInserted,

    /// A `;` is missing.
    SemicolonInserted,

    /// The `Begin` keyword is missing.
    BeginInserted,

    /// The `End` keyword is missing.
    EndInserted,

    /// The terminating `.` is missing.
    PeriodInserted,

    /// A numeric literal exceeds the range of a 32-bit signed integer.
    Overflow,

    /// Input continues after the terminating `.`.
    EofInserted,

    /// A numeric literal is missing.
    NumberInserted,
}

impl ErrorKind {
    /// All error categories, in ascending order by code.
    pub const ALL: [Self; 11] = {
        use ErrorKind::*;
        [
            LineTooLong,     SymbolDeleted, ProgramInserted, IdentInserted,
            SemicolonInserted, BeginInserted, EndInserted,   PeriodInserted,
            Overflow,        EofInserted,   NumberInserted,
        ]
    };

    /// Returns the numeric code of the category.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the singleton [`ErrorSet`] containing the category.
    #[inline]
    pub const fn set(self) -> ErrorSet {
        ErrorSet::from_bits_retain(1 << (self as u8 - 1))
    }

    /// Returns the human-readable description of the category.
    pub const fn message(self) -> &'static str {
        use ErrorKind::*;
        match self {
            LineTooLong       => "maximum line size exceeded",
            SymbolDeleted     => "symbol deleted",
            ProgramInserted   => "\"Program\" inserted",
            IdentInserted     => "identifier inserted",
            SemicolonInserted => "\";\" inserted",
            BeginInserted     => "\"Begin\" inserted",
            EndInserted       => "\"End\" inserted",
            PeriodInserted    => "\".\" inserted",
            Overflow          => "numeric overflow",
            EofInserted       => "EOF inserted",
            NumberInserted    => "number inserted",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.message().fmt(f)
    }
}

bitflags! {
    /// Set of error categories encountered during a compilation.
    #[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug)]
    pub struct ErrorSet: u16 {
        const LINE_TOO_LONG      = ErrorKind::LineTooLong      .set().bits();
        const SYMBOL_DELETED     = ErrorKind::SymbolDeleted    .set().bits();
        const PROGRAM_INSERTED   = ErrorKind::ProgramInserted  .set().bits();
        const IDENT_INSERTED     = ErrorKind::IdentInserted    .set().bits();
        const SEMICOLON_INSERTED = ErrorKind::SemicolonInserted.set().bits();
        const BEGIN_INSERTED     = ErrorKind::BeginInserted    .set().bits();
        const END_INSERTED       = ErrorKind::EndInserted      .set().bits();
        const PERIOD_INSERTED    = ErrorKind::PeriodInserted   .set().bits();
        const OVERFLOW           = ErrorKind::Overflow         .set().bits();
        const EOF_INSERTED       = ErrorKind::EofInserted      .set().bits();
        const NUMBER_INSERTED    = ErrorKind::NumberInserted   .set().bits();
    }
}

impl ErrorSet {
    /// Returns an iterator over the categories in the set, in ascending order
    /// by code.
    pub fn kinds(self) -> impl Iterator<Item = ErrorKind> {
        ErrorKind::ALL.into_iter().filter(move |k| self.contains(k.set()))
    }

    /// Returns a displayable summary of the categories in the set.
    #[inline]
    pub fn summary(self) -> Summary {
        Summary(self)
    }
}

impl From<ErrorKind> for ErrorSet {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        kind.set()
    }
}

/// Summary of encountered error categories, printed once at the end of a
/// compilation.
#[derive(Copy, Clone, Debug)]
pub struct Summary(ErrorSet);

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "errors in source file:")?;
        for kind in self.0.kinds() {
            write!(f, "\n{:>6}  {}", kind.code(), kind)?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------

/// Trait for sinks of compiler messages.
pub trait Log {
    /// Logs the given message.
    fn log<M: Display>(&mut self, msg: M);
}

/// Message sink that writes to standard error.
#[derive(Copy, Clone, Default, Debug)]
pub struct Stderr;

impl Log for Stderr {
    #[inline]
    fn log<M: Display>(&mut self, msg: M) {
        eprintln!("{}", msg);
    }
}

// Collects rendered messages.
impl Log for Vec<String> {
    #[inline]
    fn log<M: Display>(&mut self, msg: M) {
        self.push(msg.to_string());
    }
}

// -----------------------------------------------------------------------------
