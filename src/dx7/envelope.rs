use crate::dx7::field::Field;

pub type Rates = [u8; 4];
pub type Levels = [u8; 4];

/// Envelope generator.
///
/// Used both for the operator amplitude envelopes and the voice pitch envelope.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Envelope {
    pub rates: Rates,
    pub levels: Levels,
}

impl Envelope {
    /// Makes a new EG with rates and levels.
    pub fn new_rate_level(rates: Rates, levels: Levels) -> Self {
        Self { rates, levels }
    }

    /// Makes an envelope generator from the rate and level fields of a packed record.
    pub fn extract(data: &[u8], rates: &[Field; 4], levels: &[Field; 4]) -> Self {
        Envelope::new_rate_level(
            rates.map(|field| field.extract(data)),
            levels.map(|field| field.extract(data)),
        )
    }
}
