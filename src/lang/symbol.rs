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

//! Lexical symbols and symbol sets.

use std::fmt::{self, Display, Formatter};
use std::ops::BitOr;

use bitflags::bitflags;

// ----------------------------------------------------------------------------

/// Lexical symbols.
///
/// Each symbol other than [`Symbol::Invalid`] occupies a distinct bit, so
/// that symbols combine into a [`SymbolSet`] by bitwise OR.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum Symbol {
    /// Character with no lexical meaning.  Member of no [`SymbolSet`].
    Invalid   = 0,

    /// `Program` keyword.
    Program   = 1 << 0,

    /// `Begin` keyword.
    Begin     = 1 << 1,

    /// `End` keyword.
    End       = 1 << 2,

    /// Identifier.
    Ident     = 1 << 3,               // props: ident

    /// Integer literal.
    Number    = 1 << 4,               // props: number

    /// `;` - statement terminator.
    Semicolon = 1 << 5,

    /// `.` - program terminator.
    Period    = 1 << 6,

    /// End of file.
    Eof       = 1 << 7,
}

impl Symbol {
    /// Returns the singleton [`SymbolSet`] containing the symbol.
    #[inline]
    pub const fn set(self) -> SymbolSet {
        SymbolSet::from_bits_retain(self as u32)
    }

    /// Returns the symbol whose bit is the only bit in `bits`, or
    /// [`Symbol::Invalid`] if `bits` is not a single symbol bit.
    pub const fn from_bits(bits: u32) -> Self {
        use Symbol::*;
        match bits {
            0x01 => Program,
            0x02 => Begin,
            0x04 => End,
            0x08 => Ident,
            0x10 => Number,
            0x20 => Semicolon,
            0x40 => Period,
            0x80 => Eof,
            _    => Invalid,
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        use Symbol::*;

        let s = match *self {
            Invalid   => "invalid",
            Program   => "Program",
            Begin     => "Begin",
            End       => "End",
            Ident     => "ident",
            Number    => "number",
            Semicolon => ";",
            Period    => ".",
            Eof       => "EOF",
        };
        s.fmt(f)
    }
}

// ----------------------------------------------------------------------------

bitflags! {
    /// Set of lexical symbols, used as the follow set of a grammar rule.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct SymbolSet: u32 {
        const PROGRAM   = Symbol::Program   as u32;
        const BEGIN     = Symbol::Begin     as u32;
        const END       = Symbol::End       as u32;
        const IDENT     = Symbol::Ident     as u32;
        const NUMBER    = Symbol::Number    as u32;
        const SEMICOLON = Symbol::Semicolon as u32;
        const PERIOD    = Symbol::Period    as u32;
        const EOF       = Symbol::Eof       as u32;
    }
}

impl SymbolSet {
    /// Checks whether the set contains the given symbol.
    ///
    /// [`Symbol::Invalid`] is never contained in any set.
    #[inline]
    pub const fn has(self, sym: Symbol) -> bool {
        self.bits() & sym as u32 != 0
    }
}

impl From<Symbol> for SymbolSet {
    #[inline]
    fn from(sym: Symbol) -> Self {
        sym.set()
    }
}

impl BitOr for Symbol {
    type Output = SymbolSet;

    #[inline]
    fn bitor(self, rhs: Symbol) -> SymbolSet {
        self.set() | rhs.set()
    }
}

impl BitOr<SymbolSet> for Symbol {
    type Output = SymbolSet;

    #[inline]
    fn bitor(self, rhs: SymbolSet) -> SymbolSet {
        self.set() | rhs
    }
}

impl BitOr<Symbol> for SymbolSet {
    type Output = SymbolSet;

    #[inline]
    fn bitor(self, rhs: Symbol) -> SymbolSet {
        self | rhs.set()
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use Symbol::*;

    #[test]
    fn symbol_bits_disjoint() {
        let all = [Program, Begin, End, Ident, Number, Semicolon, Period, Eof];

        for (i, a) in all.iter().enumerate() {
            assert_eq!( (*a as u32).count_ones(), 1 );
            for b in &all[i + 1..] {
                assert_eq!( *a as u32 & *b as u32, 0 );
            }
        }
    }

    #[test]
    fn symbol_from_bits() {
        assert_eq!( Symbol::from_bits(0x20), Semicolon );
        assert_eq!( Symbol::from_bits(0x80), Eof       );
        assert_eq!( Symbol::from_bits(0x00), Invalid   );
        assert_eq!( Symbol::from_bits(0x03), Invalid   );
    }

    #[test]
    fn set_union() {
        let set = Begin | End | SymbolSet::EOF;

        assert_eq!( set.has(Begin),   true  );
        assert_eq!( set.has(End),     true  );
        assert_eq!( set.has(Eof),     true  );
        assert_eq!( set.has(Period),  false );
        assert_eq!( set.has(Invalid), false );
    }

    #[test]
    fn set_all_excludes_invalid() {
        assert_eq!( SymbolSet::all().has(Invalid), false );
        assert_eq!( SymbolSet::all().has(Number),  true  );
    }

    #[test]
    fn symbol_display() {
        assert_eq!( format!("{}", Program),   "Program" );
        assert_eq!( format!("{}", Semicolon), ";"       );
        assert_eq!( format!("{}", Eof),       "EOF"     );
    }
}
