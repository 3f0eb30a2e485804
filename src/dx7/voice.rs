use log::debug;

use crate::{
    Lookup,
    ParseError,
    Ranged,
};

use crate::dx7::Transpose;
use crate::dx7::envelope::Envelope;
use crate::dx7::field::{operator, voice as layout};
use crate::dx7::lfo::Lfo;
use crate::dx7::operator::Operator;
use crate::dx7::sysex::SystemExclusiveData;
use crate::dx7::tables::Switch;

pub use crate::dx7::field::voice::{NAME_SIZE, OPERATOR_COUNT};

/// A DX7 voice, decoded from the packed cartridge format.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Voice {
    /// Operators in the order they are stored: OP6 first, OP1 last.
    /// Use `operator()` to get them by number.
    pub operators: [Operator; OPERATOR_COUNT],
    pub peg: Envelope,  // pitch env
    pub alg: u8,  // 0...31, shown as 1...32
    pub feedback: u8,
    pub osc_sync: u8,
    pub lfo: Lfo,
    pub pitch_mod_sens: u8,  // pitch mod sensitivity 0 ~ 15 (for all operators)
    pub transpose: u8,  // 0~48 in SysEx, 24 = C3
    pub name: [u8; NAME_SIZE],
}

impl Voice {
    /// Gets an operator by its number (1...6).
    ///
    /// Operators are stored in reverse order, so OP1 is the last one
    /// in the record.
    pub fn operator(&self, number: usize) -> Option<&Operator> {
        if (1..=OPERATOR_COUNT).contains(&number) {
            Some(&self.operators[OPERATOR_COUNT - number])
        }
        else {
            None
        }
    }

    /// Operators from OP1 to OP6, with their numbers.
    pub fn operators_by_number(&self) -> impl Iterator<Item = (usize, &Operator)> {
        (1..=OPERATOR_COUNT).map(move |number| (number, &self.operators[OPERATOR_COUNT - number]))
    }

    /// Algorithm number as shown on the synth (1...32).
    pub fn algorithm_number(&self) -> u16 {
        self.alg as u16 + 1
    }

    pub fn osc_sync(&self) -> Lookup<Switch> {
        Lookup::from_code(self.osc_sync)
    }

    pub fn transpose(&self) -> Lookup<Transpose> {
        Transpose::checked(self.transpose)
    }

    /// The name bytes up to the first NUL, without any conversion.
    pub fn name_bytes(&self) -> &[u8] {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_SIZE);
        &self.name[..end]
    }

    /// The name with any invalid UTF-8 replaced, for logging.
    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(self.name_bytes()).into_owned()
    }
}

impl SystemExclusiveData for Voice {
    fn from_bytes(data: &[u8]) -> Result<Voice, ParseError> {
        if data.len() < Self::DATA_SIZE {
            return Err(ParseError::InvalidLength(data.len(), Self::DATA_SIZE));
        }

        // Note that the operator data is in reverse order:
        // OP6 is first, OP1 is last. Keep it that way.
        let mut operators = [Operator::default(); OPERATOR_COUNT];
        for (slot, op) in operators.iter_mut().enumerate() {
            let offset = layout::OPERATORS + slot * operator::SIZE;
            *op = Operator::from_bytes(&data[offset .. offset + operator::SIZE])?;
        }

        let mut name = [0u8; NAME_SIZE];
        name.copy_from_slice(&data[layout::NAME .. layout::NAME + NAME_SIZE]);

        let voice = Voice {
            operators,
            peg: Envelope::extract(data, &layout::PEG_RATES, &layout::PEG_LEVELS),
            alg: layout::ALGORITHM.extract(data),
            feedback: layout::FEEDBACK.extract(data),
            osc_sync: layout::OSC_SYNC.extract(data),
            lfo: Lfo::extract(data),
            pitch_mod_sens: layout::PITCH_MOD_SENS.extract(data),
            transpose: layout::TRANSPOSE.extract(data),
            name,
        };

        debug!("Decoded voice '{}', algorithm {}", voice.name_lossy(), voice.algorithm_number());
        Ok(voice)
    }

    const DATA_SIZE: usize = layout::SIZE;
}
