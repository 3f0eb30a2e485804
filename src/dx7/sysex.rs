use std::fmt;
use log::debug;

use crate::ParseError;

/// Parsing MIDI System Exclusive data.
pub trait SystemExclusiveData: Sized {
    fn from_bytes(data: &[u8]) -> Result<Self, ParseError>;

    const DATA_SIZE: usize;
}

pub const SYSEX_START: u8 = 0xF0;
pub const SYSEX_END: u8 = 0xF7;
pub const YAMAHA: u8 = 0x43;

/// Bytes before the payload: start, manufacturer, sub-status/channel,
/// format, byte count MSB and LSB.
pub const HEADER_SIZE: usize = 6;

/// 32 voices, 128 bytes each.
pub const PAYLOAD_SIZE: usize = 4096;

/// Header, payload, checksum and end marker.
pub const MESSAGE_SIZE: usize = HEADER_SIZE + PAYLOAD_SIZE + 2;

/// Format number of a 32-voice cartridge dump.
pub const CARTRIDGE_FORMAT: u8 = 0x09;

/// The fixed bytes around the payload of a cartridge message.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Header {
    pub start: u8,
    pub manufacturer: u8,
    pub sub_status_channel: u8,  // sub-status in bits 4-6, channel in bits 0-3
    pub format: u8,
    pub byte_count_msb: u8,
    pub byte_count_lsb: u8,
    pub checksum: u8,
    pub end: u8,
}

impl Header {
    /// Picks out the header and trailer bytes of a complete message.
    pub fn from_message(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() != MESSAGE_SIZE {
            return Err(ParseError::InvalidLength(data.len(), MESSAGE_SIZE));
        }

        Ok(Header {
            start: data[0],
            manufacturer: data[1],
            sub_status_channel: data[2],
            format: data[3],
            byte_count_msb: data[4],
            byte_count_lsb: data[5],
            checksum: data[MESSAGE_SIZE - 2],
            end: data[MESSAGE_SIZE - 1],
        })
    }

    /// 14-bit number distributed evenly over two bytes
    /// (cartridge = 4096 = 0x1000, appears as "20 00").
    pub fn byte_count(&self) -> u16 {
        ((self.byte_count_msb as u16 & 0x7f) << 7) | (self.byte_count_lsb as u16 & 0x7f)
    }

    /// Checks the fixed bytes, first mismatch wins.
    pub fn verify(&self) -> Result<(), ParseError> {
        if self.start != SYSEX_START {
            return Err(ParseError::MissingStart);
        }

        if self.manufacturer != YAMAHA {
            return Err(ParseError::WrongManufacturer);
        }

        if self.sub_status_channel != 0x00 {
            return Err(ParseError::WrongSubStatus);
        }

        if self.format != CARTRIDGE_FORMAT {
            return Err(ParseError::WrongFormat);
        }

        if self.byte_count_msb != 0x20 || self.byte_count_lsb != 0x00 {
            return Err(ParseError::WrongByteCount);
        }

        if self.end != SYSEX_END {
            return Err(ParseError::MissingEnd);
        }

        Ok(())
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Format = {}, length = {} bytes", self.format, self.byte_count())
    }
}

/// Computes the checksum of the payload: the two's complement
/// of the sum of the bytes, masked to seven bits.
pub fn checksum(data: &[u8]) -> u8 {
    let sum: u32 = data.iter().map(|b| (b & 0x7f) as u32).sum();
    (sum.wrapping_neg() & 0x7f) as u8
}

/// Gets the voice data between the header and the checksum.
pub fn payload(data: &[u8]) -> &[u8] {
    &data[HEADER_SIZE .. HEADER_SIZE + PAYLOAD_SIZE]
}

/// Validates a complete cartridge message.
///
/// The length is checked first, then the header and trailer bytes in order,
/// and finally the checksum. The first failure is reported.
pub fn validate(data: &[u8]) -> Result<(), ParseError> {
    let header = Header::from_message(data)?;
    header.verify()?;

    let expected = checksum(payload(data));
    if expected != header.checksum {
        return Err(ParseError::InvalidChecksum { actual: header.checksum, expected });
    }

    debug!("{}, checksum {:02X}H", header, expected);
    Ok(())
}
