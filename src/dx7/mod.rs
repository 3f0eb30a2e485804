//! Yamaha DX7 cartridge data.
//!
//! A cartridge dump is a single System Exclusive message with 32 voices
//! in the packed 128-byte format. See `sysex` for the message framing,
//! `field` for the packed layout, and `listing` for the text output.

use std::fmt;

pub mod cartridge;
pub mod envelope;
pub mod field;
pub mod lfo;
pub mod listing;
pub mod operator;
pub mod sysex;
pub mod tables;
pub mod voice;

use crate::dx7::tables::note_name;

/// Key transpose (0...48 semitones, 24 = C3).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Transpose(u8);

crate::ranged_impl!(Transpose, 0, 48);

impl Transpose {
    /// Octave in the DX7 numbering, where the lowest setting is C1.
    pub fn octave(&self) -> u8 {
        self.0 / 12 + 1
    }

    pub fn name(&self) -> String {
        format!("{}{}", note_name(self.0 as usize), self.octave())
    }
}

impl fmt::Display for Transpose {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
