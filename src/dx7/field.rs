//! Bit field layout of packed cartridge records.
//!
//! A cartridge stores voices in the packed 128-byte format, where several
//! small parameters share one byte. Every parameter is described by its byte
//! offset within the record, the index of its lowest bit, and its width.

use bit::BitIndex;

/// Location of one parameter inside a packed record.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Field {
    pub offset: usize,
    pub bit: usize,
    pub width: usize,
}

impl Field {
    /// A parameter occupying the whole byte at `offset`.
    pub const fn byte(offset: usize) -> Self {
        Field { offset, bit: 0, width: 8 }
    }

    /// A parameter of `width` bits starting at bit `bit` of the byte at `offset`.
    pub const fn bits(offset: usize, bit: usize, width: usize) -> Self {
        Field { offset, bit, width }
    }

    /// Gets the value of this field from `data`, shifted down to bit zero.
    pub fn extract(&self, data: &[u8]) -> u8 {
        extract_bits(data[self.offset], self.bit, self.width)
    }
}

/// Extracts `width` bits starting at bit `bit` (0 = least significant).
pub fn extract_bits(byte: u8, bit: usize, width: usize) -> u8 {
    // The range upper bound is not included, i.e. 4..6 means bits 4 and 5.
    byte.bit_range(bit..bit + width)
}

/// Packed operator record.
pub mod operator {
    use super::Field;

    pub const SIZE: usize = 17;

    pub const EG_RATES: [Field; 4] = [
        Field::byte(0), Field::byte(1), Field::byte(2), Field::byte(3),
    ];
    pub const EG_LEVELS: [Field; 4] = [
        Field::byte(4), Field::byte(5), Field::byte(6), Field::byte(7),
    ];

    pub const BREAKPOINT: Field = Field::byte(8);
    pub const LEFT_DEPTH: Field = Field::byte(9);
    pub const RIGHT_DEPTH: Field = Field::byte(10);
    pub const LEFT_CURVE: Field = Field::bits(11, 0, 2);
    pub const RIGHT_CURVE: Field = Field::bits(11, 2, 2);
    pub const RATE_SCALING: Field = Field::bits(12, 0, 3);
    pub const DETUNE: Field = Field::bits(12, 3, 4);
    pub const AMP_MOD_SENS: Field = Field::bits(13, 0, 2);
    pub const KEY_VEL_SENS: Field = Field::bits(13, 2, 3);
    pub const OUTPUT_LEVEL: Field = Field::byte(14);
    pub const MODE: Field = Field::bits(15, 0, 1);
    pub const COARSE: Field = Field::bits(15, 1, 5);
    pub const FINE: Field = Field::byte(16);
}

/// Packed voice record.
pub mod voice {
    use super::Field;

    pub const SIZE: usize = 128;

    pub const OPERATOR_COUNT: usize = 6;

    /// Start of the operator block. OP6 comes first, OP1 last.
    pub const OPERATORS: usize = 0;

    pub const PEG_RATES: [Field; 4] = [
        Field::byte(102), Field::byte(103), Field::byte(104), Field::byte(105),
    ];
    pub const PEG_LEVELS: [Field; 4] = [
        Field::byte(106), Field::byte(107), Field::byte(108), Field::byte(109),
    ];

    pub const ALGORITHM: Field = Field::bits(110, 0, 5);
    pub const FEEDBACK: Field = Field::bits(111, 0, 3);
    pub const OSC_SYNC: Field = Field::bits(111, 3, 1);
    pub const LFO_SPEED: Field = Field::byte(112);
    pub const LFO_DELAY: Field = Field::byte(113);
    pub const LFO_PMD: Field = Field::byte(114);
    pub const LFO_AMD: Field = Field::byte(115);
    pub const LFO_SYNC: Field = Field::bits(116, 0, 1);
    pub const LFO_WAVEFORM: Field = Field::bits(116, 1, 3);
    pub const PITCH_MOD_SENS: Field = Field::bits(116, 4, 4);
    pub const TRANSPOSE: Field = Field::byte(117);

    /// The voice name is always the last part of the record.
    pub const NAME_SIZE: usize = 10;
    pub const NAME: usize = SIZE - NAME_SIZE;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_range() {
        let b: u8 = 0b00110000;
        assert_eq!(extract_bits(b, 4, 2), 0b11);
    }

    #[test]
    fn test_whole_byte() {
        assert_eq!(Field::byte(0).extract(&[0xFF]), 0xFF);
    }

    #[test]
    fn test_curves_share_a_byte() {
        // left curve = 01 (-EXP), right curve = 01 (-EXP), unused bits set
        let mut data = [0u8; operator::SIZE];
        data[11] = 0b1111_0101;
        assert_eq!(operator::LEFT_CURVE.extract(&data), 1);
        assert_eq!(operator::RIGHT_CURVE.extract(&data), 1);
    }

    #[test]
    fn test_detune_and_rate_scaling() {
        // Byte #12 of BRASS 1 OP6: 3CH = 0_0111_100B
        let mut data = [0u8; operator::SIZE];
        data[12] = 0x3c;
        assert_eq!(operator::DETUNE.extract(&data), 7);
        assert_eq!(operator::RATE_SCALING.extract(&data), 4);
    }

    #[test]
    fn test_mode_and_coarse() {
        let mut data = [0u8; operator::SIZE];
        data[15] = 0b1011_1111;
        assert_eq!(operator::MODE.extract(&data), 1);
        assert_eq!(operator::COARSE.extract(&data), 31);
    }

    #[test]
    fn test_lfo_byte() {
        // sync off, sine, pitch mod sens 3
        let mut data = [0u8; voice::SIZE];
        data[116] = 0x38;
        assert_eq!(voice::LFO_SYNC.extract(&data), 0);
        assert_eq!(voice::LFO_WAVEFORM.extract(&data), 4);
        assert_eq!(voice::PITCH_MOD_SENS.extract(&data), 3);
    }

    #[test]
    fn test_pitch_mod_sens_is_four_bits() {
        let mut data = [0u8; voice::SIZE];
        data[116] = 0xF0;
        assert_eq!(voice::PITCH_MOD_SENS.extract(&data), 15);
    }

    #[test]
    fn test_feedback_and_sync() {
        let mut data = [0u8; voice::SIZE];
        data[111] = 0x0f;
        assert_eq!(voice::FEEDBACK.extract(&data), 7);
        assert_eq!(voice::OSC_SYNC.extract(&data), 1);
    }

    #[test]
    fn test_layout_fits_voice_record() {
        let operators_end = voice::OPERATORS + voice::OPERATOR_COUNT * operator::SIZE;
        assert_eq!(operators_end, voice::PEG_RATES[0].offset);
        assert_eq!(voice::TRANSPOSE.offset + 1, voice::NAME);
    }
}
