pub mod dx7;

use thiserror::Error;

/// Error type for parsing data from MIDI System Exclusive bytes.
#[derive(Debug, Eq, PartialEq, Copy, Clone, Error)]
pub enum ParseError {
    #[error("Got {0} bytes of data, expected {1} bytes.")]
    InvalidLength(usize, usize),  // actual, expected

    #[error("Did not find sysex start 0xF0.")]
    MissingStart,

    #[error("Did not find Yamaha 0x43.")]
    WrongManufacturer,

    #[error("Did not find substatus 0 and channel 1.")]
    WrongSubStatus,

    #[error("Did not find format 9 (32 voices).")]
    WrongFormat,

    #[error("Did not find size 4096.")]
    WrongByteCount,

    #[error("Did not find sysex end 0xF7.")]
    MissingEnd,

    #[error("Checksum failed: should have been 0x{expected:02X}, found 0x{actual:02X}.")]
    InvalidChecksum { actual: u8, expected: u8 },
}

/// A decoded parameter value that may fall outside its defined range.
///
/// The decoder never rejects a value, it just masks it to the field width.
/// Range checking happens here, when the raw code is given a meaning.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Lookup<T> {
    Valid(T),
    OutOfRange(u8),
}

impl<T> Lookup<T> {
    /// Maps a raw code through its `TryFrom<u8>` conversion.
    pub fn from_code(code: u8) -> Self
    where
        T: TryFrom<u8>,
    {
        match T::try_from(code) {
            Ok(value) => Lookup::Valid(value),
            Err(_) => Lookup::OutOfRange(code),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Lookup::Valid(_))
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Lookup<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Lookup::Valid(value) => write!(f, "{}", value),
            Lookup::OutOfRange(_) => write!(f, "*out of range*"),
        }
    }
}

// Here is a trick learned from "Programming Rust" 2nd Ed., p. 280.
// Define associated consts in a trait, but don't give them a value.
// Let the implementor of the trait do that.
pub trait Ranged: Sized {
    const FIRST: u8;
    const LAST: u8;

    fn new(value: u8) -> Self;

    fn contains(value: u8) -> bool {
        value >= Self::FIRST && value <= Self::LAST
    }

    /// Wraps a raw SysEx byte, or reports it as out of range.
    fn checked(value: u8) -> Lookup<Self> {
        if Self::contains(value) {
            Lookup::Valid(Self::new(value))
        }
        else {
            Lookup::OutOfRange(value)
        }
    }
}

// The `ranged_impl` macro generates an implementation of the `Ranged` trait
// for a single-field tuple struct wrapping a `u8`
// (type name, first, last).
#[macro_export]
macro_rules! ranged_impl {
    ($typ:ty, $first:expr, $last:expr) => {
        impl $crate::Ranged for $typ {
            const FIRST: u8 = $first;
            const LAST: u8 = $last;

            fn new(value: u8) -> Self {
                Self(value)
            }
        }
    }
}
