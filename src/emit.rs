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

//! Assembly code emitter.

use std::io::{self, Write};

/// Writes x86 assembly (NASM syntax) to an output sink as parsing proceeds.
///
/// Each method writes through immediately; output order is call order.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    out: W,
}

impl<W: Write> Emitter<W> {
    /// Creates an emitter that writes to the given sink.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes the assembly file header.
    pub fn preamble(&mut self) -> io::Result<()> {
        self.out.write_all(b"\
            BITS 64\n\
            GLOBAL _start\n\
            SECTION .text\n\
        ")
    }

    /// Writes the program entry label.
    pub fn entry(&mut self) -> io::Result<()> {
        self.out.write_all(b"_start:\n")
    }

    /// Writes code to load an integer literal into the working register.
    pub fn load(&mut self, value: i32) -> io::Result<()> {
        writeln!(self.out, "  mov ecx, {}", value)
    }

    /// Writes code to terminate the process with status 0.
    pub fn exit(&mut self) -> io::Result<()> {
        // _exit(0)
        self.out.write_all(b"  mov  eax, 1\n  mov  ebx, 0\n  int  0x80\n")
    }

    /// Consumes the emitter, returning the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn emit_sequence() {
        let mut emitter = Emitter::new(Vec::new());

        emitter.preamble().unwrap();
        emitter.entry().unwrap();
        emitter.load(42).unwrap();
        emitter.load(-7).unwrap();
        emitter.exit().unwrap();

        assert_eq!(
            String::from_utf8(emitter.into_inner()).unwrap(),
            "BITS 64\n\
             GLOBAL _start\n\
             SECTION .text\n\
             _start:\n  \
             mov ecx, 42\n  \
             mov ecx, -7\n  \
             mov  eax, 1\n  \
             mov  ebx, 0\n  \
             int  0x80\n"
        );
    }
}
