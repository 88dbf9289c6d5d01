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

//! Character classifier.

use bitflags::bitflags;

use super::symbol::Symbol;

// ----------------------------------------------------------------------------

bitflags! {
    /// Traits of a source character.
    ///
    /// The class bits occupy the high end of the word and never overlap the
    /// symbol bits.  A punctuation character carries exactly one symbol bit
    /// and no class bits.  Letters and digits never carry a symbol bit.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    pub struct Traits: u32 {
        /// `A-Z a-z`
        const LETTER = 1 << 28;

        /// `0-9`
        const DIGIT  = 1 << 29;

        /// `\t \n \v \f \r` and space
        const WHITE  = 1 << 30;

        // Symbol bits carried by punctuation.
        const _ = 0xFF;
    }
}

impl Traits {
    /// Bits that classify a character rather than name a symbol.
    const CLASS: Self = Self::LETTER.union(Self::DIGIT).union(Self::WHITE);

    /// Returns the punctuation symbol of the character, or
    /// [`Symbol::Invalid`] if the character is not punctuation.
    #[inline]
    pub const fn symbol(self) -> Symbol {
        Symbol::from_bits(self.difference(Self::CLASS).bits())
    }

    /// Checks whether the character is a letter.
    #[inline]
    pub const fn is_letter(self) -> bool {
        self.intersects(Self::LETTER)
    }

    /// Checks whether the character is a digit.
    #[inline]
    pub const fn is_digit(self) -> bool {
        self.intersects(Self::DIGIT)
    }

    /// Checks whether the character is a letter or a digit.
    #[inline]
    pub const fn is_alnum(self) -> bool {
        self.intersects(Self::LETTER.union(Self::DIGIT))
    }

    /// Checks whether the character is whitespace.
    #[inline]
    pub const fn is_white(self) -> bool {
        self.intersects(Self::WHITE)
    }
}

/// Mapping of 7-bit ASCII to character traits.
static CHARS: [Traits; 128] = {
    const __: Traits = Traits::empty();
    const LT: Traits = Traits::LETTER;
    const DG: Traits = Traits::DIGIT;
    const WS: Traits = Traits::WHITE;
    const PD: Traits = Traits::from_bits_retain(Symbol::Period    as u32);
    const SC: Traits = Traits::from_bits_retain(Symbol::Semicolon as u32);
[
//  x0  x1  x2  x3  x4  x5  x6  x7
//  x8  x9  xA  xB  xC  xD  xE  xF
    __, __, __, __, __, __, __, __, // 0x │········│
    __, WS, WS, WS, WS, WS, __, __, // 0x │·tnvfr··│
    __, __, __, __, __, __, __, __, // 1x │········│
    __, __, __, __, __, __, __, __, // 1x │········│
    WS, __, __, __, __, __, __, __, // 2x │ !"#$%&'│
    __, __, __, __, __, __, PD, __, // 2x │()*+,-./│
    DG, DG, DG, DG, DG, DG, DG, DG, // 3x │01234567│
    DG, DG, __, SC, __, __, __, __, // 3x │89:;<=>?│
    __, LT, LT, LT, LT, LT, LT, LT, // 4x │@ABCDEFG│
    LT, LT, LT, LT, LT, LT, LT, LT, // 4x │HIJKLMNO│
    LT, LT, LT, LT, LT, LT, LT, LT, // 5x │PQRSTUVW│
    LT, LT, LT, __, __, __, __, __, // 5x │XYZ[\]^_│
    __, LT, LT, LT, LT, LT, LT, LT, // 6x │`abcdefg│
    LT, LT, LT, LT, LT, LT, LT, LT, // 6x │hijklmno│
    LT, LT, LT, LT, LT, LT, LT, LT, // 7x │pqrstuvw│
    LT, LT, LT, __, __, __, __, __, // 7x │xyz{|}~░│
]};

/// Classifies a character.  `None` represents the end of input.
///
/// Bytes beyond the 7-bit ASCII range and the end of input have no traits.
#[inline]
pub fn classify(ch: Option<u8>) -> Traits {
    match ch {
        Some(b) if b < 128 => CHARS[b as usize],
        _                  => Traits::empty(),
    }
}

// ----------------------------------------------------------------------------
