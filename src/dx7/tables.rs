//! Names for small integer codes found in voice data.

use std::fmt;

/// Note names, starting from C.
pub static NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Gets the name of a note, wrapping around every octave.
pub fn note_name(note: usize) -> &'static str {
    NOTE_NAMES[note % NOTE_NAMES.len()]
}

/// On/off switch, used for the oscillator and LFO key sync.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Switch {
    Off = 0,
    On = 1,
}

impl fmt::Display for Switch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Switch::Off => "Off",
            Switch::On => "On",
        })
    }
}

impl TryFrom<u8> for Switch {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Switch::Off),
            1 => Ok(Switch::On),
            _ => Err("bad switch value"),
        }
    }
}
