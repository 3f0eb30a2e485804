use std::fmt;
use log::warn;

use crate::Lookup;
use crate::dx7::field::voice as layout;
use crate::dx7::tables::Switch;

/// LFO waveform.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum LfoWaveform {
    Triangle,
    SawDown,
    SawUp,
    Square,
    Sine,
    SampleAndHold,
}

impl fmt::Display for LfoWaveform {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            LfoWaveform::Triangle => "Triangle",
            LfoWaveform::SawDown => "Sawtooth Down",
            LfoWaveform::SawUp => "Sawtooth Up",
            LfoWaveform::Square => "Square",
            LfoWaveform::Sine => "Sine",
            LfoWaveform::SampleAndHold => "Sample and Hold",
        })
    }
}

impl TryFrom<u8> for LfoWaveform {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LfoWaveform::Triangle),
            1 => Ok(LfoWaveform::SawDown),
            2 => Ok(LfoWaveform::SawUp),
            3 => Ok(LfoWaveform::Square),
            4 => Ok(LfoWaveform::Sine),
            5 => Ok(LfoWaveform::SampleAndHold),
            _ => Err("bad LFO waveform value"),
        }
    }
}

/// LFO.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Lfo {
    pub speed: u8,  // 0 ~ 99
    pub delay: u8,  // 0 ~ 99
    pub pmd: u8,    // 0 ~ 99
    pub amd: u8,    // 0 ~ 99
    pub sync: u8,   // 0 ~ 1
    pub waveform: u8,  // 0 ~ 5
}

impl Lfo {
    /// Makes an LFO from the packed voice record.
    pub fn extract(data: &[u8]) -> Self {
        let lfo = Lfo {
            speed: layout::LFO_SPEED.extract(data),
            delay: layout::LFO_DELAY.extract(data),
            pmd: layout::LFO_PMD.extract(data),
            amd: layout::LFO_AMD.extract(data),
            sync: layout::LFO_SYNC.extract(data),
            waveform: layout::LFO_WAVEFORM.extract(data),
        };

        if !lfo.waveform().is_valid() {
            warn!("LFO waveform out of range: {}", lfo.waveform);
        }

        lfo
    }

    pub fn sync(&self) -> Lookup<Switch> {
        Lookup::from_code(self.sync)
    }

    pub fn waveform(&self) -> Lookup<LfoWaveform> {
        Lookup::from_code(self.waveform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waveform_names() {
        let names: Vec<String> = (0..6)
            .map(|code| Lookup::<LfoWaveform>::from_code(code).to_string())
            .collect();
        assert_eq!(names, vec![
            "Triangle", "Sawtooth Down", "Sawtooth Up", "Square", "Sine", "Sample and Hold",
        ]);
    }

    #[test]
    fn test_waveform_out_of_range() {
        let mut data = [0u8; layout::SIZE];
        data[116] = 0b0000_1110;  // waveform 7
        let lfo = Lfo::extract(&data);
        assert_eq!(lfo.waveform, 7);
        assert_eq!(lfo.waveform(), Lookup::OutOfRange(7));
        assert_eq!(lfo.waveform().to_string(), "*out of range*");
    }

    #[test]
    fn test_extract() {
        let mut data = [0u8; layout::SIZE];
        data[112..117].copy_from_slice(&[37, 0, 5, 0, 0x39]);
        let lfo = Lfo::extract(&data);
        assert_eq!(lfo, Lfo { speed: 37, delay: 0, pmd: 5, amd: 0, sync: 1, waveform: 4 });
        assert_eq!(lfo.sync(), Lookup::Valid(Switch::On));
        assert_eq!(lfo.waveform(), Lookup::Valid(LfoWaveform::Sine));
    }
}
