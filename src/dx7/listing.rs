//! Text listings of cartridge contents.
//!
//! The output is meant to be read and compared with `diff`, so every
//! value is printed on its own line in a fixed order, and numbers are
//! zero-padded to two digits.

use std::fmt;
use std::io::{self, Write};
use log::{debug, warn};

use crate::Lookup;
use crate::dx7::cartridge::Cartridge;
use crate::dx7::envelope::Envelope;
use crate::dx7::operator::Operator;
use crate::dx7::voice::Voice;

const SEPARATOR: &str = "-------------------------------------------------";

/// What to print from a cartridge.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ListingOptions {
    /// List all parameters instead of just the names.
    pub long: bool,
    /// Only list this voice (1...32). Implies a long listing.
    /// Any other number matches no voice.
    pub patch: Option<i64>,
    /// Report voices with identical parameters after the listing.
    pub find_duplicates: bool,
}

impl ListingOptions {
    pub fn is_long(&self) -> bool {
        self.long || self.patch.is_some()
    }

    /// Is the voice with this number (1...32) part of the listing?
    pub fn includes(&self, number: usize) -> bool {
        self.patch.map_or(true, |patch| patch == number as i64)
    }
}

/// Writes the listing of a validated cartridge, followed by the
/// duplicate report if requested.
///
/// A patch number outside 1...32 matches no voice and lists nothing.
pub fn dump<W: Write>(out: &mut W, filename: &str, cartridge: &Cartridge, options: &ListingOptions) -> io::Result<()> {
    for (index, voice) in cartridge.voices().enumerate() {
        let number = index + 1;
        if !options.includes(number) {
            continue;
        }

        let voice = voice.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        render(out, filename, &voice, number, options.is_long())?;
    }

    if options.find_duplicates {
        for (first, second) in cartridge.find_duplicates() {
            writeln!(out, "Found duplicates: Voice {} and voice {}.", first, second)?;
        }
    }

    Ok(())
}

/// Writes one voice, either as a single name line or as a full listing.
pub fn render<W: Write>(out: &mut W, filename: &str, voice: &Voice, number: usize, long: bool) -> io::Result<()> {
    if long {
        write_long(out, filename, voice, number)
    }
    else {
        write_short(out, voice, number)
    }
}

/// Writes `NN: name`.
pub fn write_short<W: Write>(out: &mut W, voice: &Voice, number: usize) -> io::Result<()> {
    write!(out, "{:02}: ", number)?;
    write_name(out, voice)?;
    writeln!(out)
}

// The name goes out as raw bytes, so that any non-ASCII
// characters in it come through unchanged.
fn write_name<W: Write>(out: &mut W, voice: &Voice) -> io::Result<()> {
    out.write_all(voice.name_bytes())
}

/// Writes all parameters of a voice, with operators from OP1 to OP6.
pub fn write_long<W: Write>(out: &mut W, filename: &str, voice: &Voice, number: usize) -> io::Result<()> {
    debug!("Listing voice {} ({})", number, voice.name_lossy());

    writeln!(out)?;
    writeln!(out, "Filename: {}", filename)?;
    writeln!(out, "Voice: {:02}", number)?;
    write!(out, "Name: ")?;
    write_name(out, voice)?;
    writeln!(out)?;
    writeln!(out)?;

    writeln!(out, "Algorithm: {:02}", voice.algorithm_number())?;
    writeln!(out, "Pitch Envelope Generator:")?;
    write_envelope(out, "  ", &voice.peg)?;
    writeln!(out, "Feedback: {:02}", voice.feedback)?;
    write_lookup(out, "", "Oscillator Key Sync", voice.osc_sync, voice.osc_sync())?;

    writeln!(out, "LFO:")?;
    writeln!(out, "  Rate: {:02}", voice.lfo.speed)?;
    writeln!(out, "  Delay: {:02}", voice.lfo.delay)?;
    writeln!(out, "  Amp Mod Depth: {:02}", voice.lfo.amd)?;
    writeln!(out, "  Pitch Mod Depth: {:02}", voice.lfo.pmd)?;
    write_lookup(out, "  ", "Key Sync", voice.lfo.sync, voice.lfo.sync())?;
    write_lookup(out, "  ", "Wave", voice.lfo.waveform, voice.lfo.waveform())?;

    writeln!(out, "Pitch Mod Sense: {:02}", voice.pitch_mod_sens)?;
    write_lookup(out, "", "Transpose", voice.transpose, voice.transpose())?;

    for (op_number, op) in voice.operators_by_number() {
        write_operator(out, op_number, op)?;
    }

    writeln!(out)?;
    writeln!(out, "{}", SEPARATOR)?;
    writeln!(out)
}

fn write_operator<W: Write>(out: &mut W, number: usize, op: &Operator) -> io::Result<()> {
    let kls = &op.kbd_level_scaling;

    writeln!(out)?;
    writeln!(out, "Operator {:02}:", number)?;
    writeln!(out, "  Envelope Generator:")?;
    write_envelope(out, "    ", &op.eg)?;
    writeln!(out, "  Level Scale:")?;
    write_lookup(out, "    ", "Break Point", kls.breakpoint, kls.breakpoint())?;
    writeln!(out, "    Left Depth: {:02}", kls.left_depth)?;
    writeln!(out, "    Right Depth: {:02}", kls.right_depth)?;
    write_lookup(out, "    ", "Left Curve", kls.left_curve, kls.left_curve())?;
    write_lookup(out, "    ", "Right Curve", kls.right_curve, kls.right_curve())?;
    writeln!(out, "  Oscillator Rate Scale: {:02}", op.kbd_rate_scaling)?;
    writeln!(out, "  Amp Mod Sense: {:02}", op.amp_mod_sens)?;
    writeln!(out, "  Key Velocity Sense: {:02}", op.key_vel_sens)?;
    writeln!(out, "  Output Level: {:02}", op.output_level)?;
    write_lookup(out, "  ", "Oscillator Mode", op.mode, op.mode())?;
    writeln!(out, "  Frequency Coarse: {}", op.frequency())?;
    writeln!(out, "  Frequency Fine: {:02}", op.fine)?;
    writeln!(out, "  Detune: {:02}", op.detune)
}

fn write_envelope<W: Write>(out: &mut W, indent: &str, eg: &Envelope) -> io::Result<()> {
    for (stage, rate) in eg.rates.iter().enumerate() {
        writeln!(out, "{}Rate {}: {:02}", indent, stage + 1, rate)?;
    }
    for (stage, level) in eg.levels.iter().enumerate() {
        writeln!(out, "{}Level {}: {:02}", indent, stage + 1, level)?;
    }
    Ok(())
}

// Writes the raw value followed by its meaning in parentheses.
fn write_lookup<W: Write, T: fmt::Display>(out: &mut W, indent: &str, label: &str, code: u8, value: Lookup<T>) -> io::Result<()> {
    if let Lookup::OutOfRange(code) = value {
        warn!("{} out of range: {}", label, code);
    }
    writeln!(out, "{}{}: {:02} ({})", indent, label, code, value)
}
