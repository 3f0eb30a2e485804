use std::fmt;
use num::Integer;

use crate::{
    Lookup,
    ParseError,
    Ranged,
};

use crate::dx7::envelope::Envelope;
use crate::dx7::field::operator as layout;
use crate::dx7::sysex::SystemExclusiveData;
use crate::dx7::tables::note_name;

/// Scaling curve style.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CurveStyle {
    Linear,
    Exponential
}

impl fmt::Display for CurveStyle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CurveStyle::Linear => write!(f, "LIN"),
            CurveStyle::Exponential => write!(f, "EXP"),
        }
    }
}

/// Scaling curve sign.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CurveSign {
    Negative,
    Positive,
}

impl fmt::Display for CurveSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", if *self == CurveSign::Positive { "+" } else { "-" })
    }
}

/// Scaling curve settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ScalingCurve {
    pub style: CurveStyle,
    pub sign: CurveSign,
}

impl ScalingCurve {
    /// Makes a linear positive scaling curve.
    pub fn lin_pos() -> Self {
        ScalingCurve { style: CurveStyle::Linear, sign: CurveSign::Positive }
    }

    /// Makes a linear negative scaling curve.
    pub fn lin_neg() -> Self {
        ScalingCurve { style: CurveStyle::Linear, sign: CurveSign::Negative }
    }

    /// Makes an exponential positive scaling curve.
    pub fn exp_pos() -> Self {
        ScalingCurve { style: CurveStyle::Exponential, sign: CurveSign::Positive }
    }

    /// Makes an exponential negative scaling curve.
    pub fn exp_neg() -> Self {
        ScalingCurve { style: CurveStyle::Exponential, sign: CurveSign::Negative }
    }
}

impl fmt::Display for ScalingCurve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.sign, self.style)
    }
}

impl TryFrom<u8> for ScalingCurve {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ScalingCurve::lin_neg()),
            1 => Ok(ScalingCurve::exp_neg()),
            2 => Ok(ScalingCurve::exp_pos()),
            3 => Ok(ScalingCurve::lin_pos()),
            _ => Err("bad scaling curve value"),
        }
    }
}

/// Key (level scaling breakpoint), 0 ~ 99 (A-1 ~ C8).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Key(u8);

crate::ranged_impl!(Key, 0, 99);

impl Key {
    /// Octave of the key. Key 0 is A-1 and key 3 is C0.
    pub fn octave(&self) -> i32 {
        Integer::div_floor(&(self.0 as i32 - 3), &12)
    }

    pub fn name(&self) -> String {
        // Key 0 is A, nine semitones above C.
        format!("{}{}", note_name(self.0 as usize + 9), self.octave())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Keyboard level scaling.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct KeyboardLevelScaling {
    pub breakpoint: u8,
    pub left_depth: u8,
    pub right_depth: u8,
    pub left_curve: u8,
    pub right_curve: u8,
}

impl KeyboardLevelScaling {
    pub fn breakpoint(&self) -> Lookup<Key> {
        Key::checked(self.breakpoint)
    }

    pub fn left_curve(&self) -> Lookup<ScalingCurve> {
        Lookup::from_code(self.left_curve)
    }

    pub fn right_curve(&self) -> Lookup<ScalingCurve> {
        Lookup::from_code(self.right_curve)
    }
}

/// Operator mode.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum OperatorMode {
    Ratio,
    Fixed,
}

impl fmt::Display for OperatorMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            OperatorMode::Ratio => "Ratio",
            OperatorMode::Fixed => "Fixed",
        })
    }
}

impl TryFrom<u8> for OperatorMode {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OperatorMode::Ratio),
            1 => Ok(OperatorMode::Fixed),
            _ => Err("bad operator mode value"),
        }
    }
}

/// Oscillator frequency, depending on the operator mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Frequency {
    /// Frequency ratio, shown as the raw coarse value.
    Ratio(u8),
    /// Fixed frequency in Hz.
    Fixed(f64),
}

impl Frequency {
    /// Computes the fixed frequency from the coarse and fine values.
    /// Coarse selects the decade (1, 10, 100 or 1000 Hz), fine moves
    /// up within it logarithmically.
    pub fn fixed(coarse: u8, fine: u8) -> Self {
        let power = (coarse % 4) as f64 + fine as f64 / 100.0;
        Frequency::Fixed(10f64.powf(power))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Frequency::Ratio(coarse) => write!(f, "{:02}", coarse),
            Frequency::Fixed(hz) => write!(f, "{} Hz", significant(*hz, 6)),
        }
    }
}

// Formats a positive value with the given number of significant digits,
// dropping trailing zeros.
fn significant(value: f64, digits: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    let text = format!("{:.*}", decimals, value);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
    else {
        text
    }
}

/// Operator.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Operator {
    pub eg: Envelope,
    pub kbd_level_scaling: KeyboardLevelScaling,
    pub kbd_rate_scaling: u8, // 0 ~ 7
    pub amp_mod_sens: u8,  // 0 ~ 3
    pub key_vel_sens: u8,  // 0 ~ 7
    pub output_level: u8,  // 0 ~ 99
    pub mode: u8,  // 0 ~ 1
    pub coarse: u8,  // 0 ~ 31
    pub fine: u8,  // 0 ~ 99
    pub detune: u8,   // 0 ~ 14, 7 = no detune
}

impl Operator {
    pub fn mode(&self) -> Lookup<OperatorMode> {
        Lookup::from_code(self.mode)
    }

    /// Gets the oscillator frequency. Any mode other than ratio is fixed.
    pub fn frequency(&self) -> Frequency {
        match self.mode() {
            Lookup::Valid(OperatorMode::Ratio) => Frequency::Ratio(self.coarse),
            _ => Frequency::fixed(self.coarse, self.fine),
        }
    }
}

impl SystemExclusiveData for Operator {
    /// Makes a new operator from a packed operator record.
    fn from_bytes(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < Self::DATA_SIZE {
            return Err(ParseError::InvalidLength(data.len(), Self::DATA_SIZE));
        }

        Ok(Self {
            eg: Envelope::extract(data, &layout::EG_RATES, &layout::EG_LEVELS),
            kbd_level_scaling: KeyboardLevelScaling {
                breakpoint: layout::BREAKPOINT.extract(data),
                left_depth: layout::LEFT_DEPTH.extract(data),
                right_depth: layout::RIGHT_DEPTH.extract(data),
                left_curve: layout::LEFT_CURVE.extract(data),
                right_curve: layout::RIGHT_CURVE.extract(data),
            },
            kbd_rate_scaling: layout::RATE_SCALING.extract(data),
            amp_mod_sens: layout::AMP_MOD_SENS.extract(data),
            key_vel_sens: layout::KEY_VEL_SENS.extract(data),
            output_level: layout::OUTPUT_LEVEL.extract(data),
            mode: layout::MODE.extract(data),
            coarse: layout::COARSE.extract(data),
            fine: layout::FINE.extract(data),
            detune: layout::DETUNE.extract(data),
        })
    }

    const DATA_SIZE: usize = layout::SIZE;
}

#[cfg(test)]
mod tests {
    // Note this useful idiom: importing names from outer (for mod tests) scope.
    use super::*;

    // OP6 of "BRASS 1" from the ROM1A cartridge, packed.
    const BRASS1_OP6: [u8; 17] = [
        0x31, 0x63, 0x1c, 0x44, 0x62, 0x62, 0x5b, 0x00,
        0x27, 0x36, 0x32, 0x05, 0x3c, 0x08, 0x52, 0x02, 0x00,
    ];

    #[test]
    fn test_from_packed_bytes() {
        let op = Operator::from_bytes(&BRASS1_OP6).expect("valid operator");

        assert_eq!(op.eg.rates, [49, 99, 28, 68]);
        assert_eq!(op.eg.levels, [98, 98, 91, 0]);

        // KLS: 27 36 32 05
        // Arturia DX7 shows: breakpoint=C3, both curves=-EXP,
        // left depth = 54, right depth = 50
        assert_eq!(op.kbd_level_scaling.breakpoint, 39);
        assert_eq!(op.kbd_level_scaling.breakpoint().to_string(), "C3");
        assert_eq!(op.kbd_level_scaling.left_depth, 54);
        assert_eq!(op.kbd_level_scaling.right_depth, 50);
        assert_eq!(op.kbd_level_scaling.left_curve(), Lookup::Valid(ScalingCurve::exp_neg()));
        assert_eq!(op.kbd_level_scaling.right_curve(), Lookup::Valid(ScalingCurve::exp_neg()));

        // Byte #12: 3CH = 0111_100B, detune = 7, rate scaling = 4
        assert_eq!(op.detune, 7);
        assert_eq!(op.kbd_rate_scaling, 4);

        // Byte #13: 08H, AMS = 0, KVS = 2
        assert_eq!(op.amp_mod_sens, 0);
        assert_eq!(op.key_vel_sens, 2);

        assert_eq!(op.output_level, 82);
        assert_eq!(op.mode(), Lookup::Valid(OperatorMode::Ratio));
        assert_eq!(op.coarse, 1);
        assert_eq!(op.fine, 0);
    }

    #[test]
    fn test_short_data() {
        assert_eq!(
            Operator::from_bytes(&BRASS1_OP6[..16]),
            Err(ParseError::InvalidLength(16, 17)));
    }

    #[test]
    fn test_scaling_curve_names() {
        let names: Vec<String> = (0..4)
            .map(|code| Lookup::<ScalingCurve>::from_code(code).to_string())
            .collect();
        assert_eq!(names, vec!["-LIN", "-EXP", "+EXP", "+LIN"]);
        assert_eq!(Lookup::<ScalingCurve>::from_code(4).to_string(), "*out of range*");
    }

    #[test]
    fn test_breakpoint_lowest() {
        assert_eq!(Key::checked(0).to_string(), "A-1");
    }

    #[test]
    fn test_breakpoint_octave_boundaries() {
        assert_eq!(Key::checked(2).to_string(), "B-1");
        assert_eq!(Key::checked(3).to_string(), "C0");
        assert_eq!(Key::checked(15).to_string(), "C1");
        assert_eq!(Key::checked(99).to_string(), "C8");
    }

    #[test]
    fn test_breakpoint_out_of_range() {
        assert_eq!(Key::checked(100), Lookup::OutOfRange(100));
        assert_eq!(Key::checked(100).to_string(), "*out of range*");
    }

    #[test]
    fn test_fixed_frequency() {
        assert_eq!(Frequency::fixed(0, 0), Frequency::Fixed(1.0));
        assert_eq!(Frequency::fixed(1, 0), Frequency::Fixed(10.0));
        // Coarse wraps around every four steps.
        assert_eq!(Frequency::fixed(5, 0), Frequency::Fixed(10.0));
    }

    #[test]
    fn test_fixed_frequency_display() {
        assert_eq!(Frequency::fixed(0, 0).to_string(), "1 Hz");
        assert_eq!(Frequency::fixed(3, 0).to_string(), "1000 Hz");
        assert_eq!(Frequency::fixed(1, 50).to_string(), "31.6228 Hz");
        assert_eq!(Frequency::fixed(3, 99).to_string(), "9772.37 Hz");
    }

    #[test]
    fn test_ratio_frequency_display() {
        assert_eq!(Frequency::Ratio(1).to_string(), "01");
        assert_eq!(Frequency::Ratio(31).to_string(), "31");
    }

    #[test]
    fn test_operator_frequency_follows_mode() {
        let mut op = Operator { coarse: 2, fine: 0, ..Default::default() };
        assert_eq!(op.frequency(), Frequency::Ratio(2));
        op.mode = 1;
        assert_eq!(op.frequency(), Frequency::Fixed(100.0));
    }
}
