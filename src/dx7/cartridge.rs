use log::debug;

use crate::ParseError;
use crate::dx7::field::voice::{NAME_SIZE, SIZE as VOICE_SIZE};
use crate::dx7::sysex::{self, SystemExclusiveData};
use crate::dx7::voice::Voice;

pub const VOICE_COUNT: usize = 32;

/// Number of leading bytes in a packed voice that hold parameters.
/// The name follows them, up to the end of the record.
pub const PARAMETER_SIZE: usize = VOICE_SIZE - NAME_SIZE;

/// A validated DX7 cartridge message with 32 voices.
///
/// Borrows the message; voices are decoded on demand.
#[derive(Debug, Clone, Copy)]
pub struct Cartridge<'a> {
    data: &'a [u8],
}

impl<'a> Cartridge<'a> {
    /// Validates a complete cartridge message.
    pub fn from_bytes(data: &'a [u8]) -> Result<Self, ParseError> {
        sysex::validate(data)?;
        Ok(Cartridge { data })
    }

    /// The packed voice data of all 32 voices.
    pub fn payload(&self) -> &'a [u8] {
        sysex::payload(self.data)
    }

    /// Gets the packed bytes of a voice by index (0...31).
    pub fn voice_data(&self, index: usize) -> &'a [u8] {
        let offset = index * VOICE_SIZE;
        &self.payload()[offset .. offset + VOICE_SIZE]
    }

    /// Decodes a voice by index (0...31).
    pub fn voice(&self, index: usize) -> Result<Voice, ParseError> {
        Voice::from_bytes(self.voice_data(index))
    }

    /// Decodes all voices in order.
    pub fn voices(&self) -> impl Iterator<Item = Result<Voice, ParseError>> + 'a {
        let cartridge = *self;
        (0..VOICE_COUNT).map(move |index| cartridge.voice(index))
    }

    /// Finds voices with identical parameters, ignoring the names.
    /// Returns pairs of voice numbers (1...32), lower number first.
    pub fn find_duplicates(&self) -> Vec<(usize, usize)> {
        let slots: Vec<&[u8]> = (0..VOICE_COUNT).map(|index| self.voice_data(index)).collect();
        find_duplicates(&slots)
    }
}

/// Compares every pair of packed voices, ignoring the names.
/// Returns all matching pairs as 1-based voice numbers, in order.
///
/// A slot shorter than the parameter block matches nothing.
pub fn find_duplicates(voices: &[&[u8]]) -> Vec<(usize, usize)> {
    let parameters: Vec<Option<&[u8]>> = voices
        .iter()
        .map(|voice| voice.get(..PARAMETER_SIZE))
        .collect();

    let mut result = Vec::new();

    for i in 0..parameters.len() {
        let Some(first) = parameters[i] else {
            continue;
        };

        for j in i + 1..parameters.len() {
            if parameters[j] == Some(first) {
                debug!("Voices {} and {} have the same parameters", i + 1, j + 1);
                result.push((i + 1, j + 1));
            }
        }
    }

    result
}
