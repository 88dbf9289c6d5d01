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

//! Operational errors.
//!
//! Problems in the source file are not errors in this sense; they are
//! recorded in an [`ErrorSet`](crate::message::ErrorSet) and compilation
//! continues.

use std::io;

use thiserror::Error;

/// The type returned by fallible compiler methods.
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// An error that prevents the compiler from completing its work.
#[derive(Debug, Error)]
pub enum Error {
    /// The source file could not be read.
    #[error("{path}: {source}")]
    Read { path: String, source: io::Error },

    /// The output could not be written.
    #[error("{path}: {source}")]
    Write { path: String, source: io::Error },

    /// Generated code could not be written to the output sink.
    #[error("cannot write output: {0}")]
    Emit(#[from] io::Error),
}

impl Error {
    /// Attaches the given output `path` to an [`Error::Emit`] error.
    pub fn at_output(self, path: &str) -> Self {
        match self {
            Error::Emit(source) => Error::Write { path: path.into(), source },
            other               => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_display() {
        let e = Error::Read {
            path:   "foo.pas".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "file not found"),
        };

        assert_eq!( e.to_string(), "foo.pas: file not found" );
    }

    #[test]
    fn emit_error_at_output() {
        let e = Error::from(io::Error::new(io::ErrorKind::Other, "disk full"));

        assert_eq!( e.to_string(),                   "cannot write output: disk full" );
        assert_eq!( e.at_output("out.s").to_string(), "out.s: disk full"              );
    }
}
