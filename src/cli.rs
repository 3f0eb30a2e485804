//! CLI definitions using clap

use clap::Parser;
use std::convert::Infallible;
use std::path::PathBuf;

use sevendump::dx7::listing::ListingOptions;

#[derive(Parser, Debug)]
#[command(name = "sevendump")]
#[command(about = "Dump a Yamaha DX7 cartridge System Exclusive file as human readable text")]
pub struct Cli {
    /// List all parameters for all 32 patches
    #[arg(short, long)]
    pub long: bool,

    /// Report patches with identical parameters (names are ignored)
    #[arg(short, long)]
    pub find_duplicates: bool,

    /// List all parameters for the specified patch (1...32)
    #[arg(short, long, value_name = "N", value_parser = parse_patch_number, allow_hyphen_values = true)]
    pub patch: Option<i64>,

    /// Display version information
    #[arg(short, long)]
    pub version: bool,

    /// DX7 cartridge file (32 voices, 4104 bytes)
    pub filename: Option<PathBuf>,
}

impl Cli {
    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            long: self.long,
            patch: self.patch,
            find_duplicates: self.find_duplicates,
        }
    }
}

/// Parses a patch number the way C `strtol` does with base 0:
/// `0x` means hex, a leading `0` means octal, anything else is decimal.
/// Parsing stops at the first character that is not a digit, so text
/// without digits is 0. Values too large saturate.
///
/// Never fails: a number that is not a voice number just lists nothing.
fn parse_patch_number(s: &str) -> Result<i64, Infallible> {
    let s = s.trim_start();
    let (negative, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (radix, digits) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None if s.starts_with('0') => (8, s),
        None => (10, s),
    };

    let value = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0i64, |acc, digit| acc.saturating_mul(radix as i64).saturating_add(digit as i64));

    Ok(if negative { -value } else { value })
}

/// Turns a clap usage error into a single line.
pub fn usage_error_line(e: &clap::Error) -> String {
    let rendered = e.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    let message = first.strip_prefix("error: ").unwrap_or(first);
    format!("Error: {}. Try -h for help.", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_patch_number() {
        assert_eq!(parse_patch_number("7"), Ok(7));
        assert_eq!(parse_patch_number("0x10"), Ok(16));
        assert_eq!(parse_patch_number("0X1f"), Ok(31));
        assert_eq!(parse_patch_number("0"), Ok(0));
        assert_eq!(parse_patch_number("+12"), Ok(12));
    }

    #[test]
    fn test_parse_patch_number_octal() {
        assert_eq!(parse_patch_number("010"), Ok(8));
        assert_eq!(parse_patch_number("040"), Ok(32));
        // 9 is not an octal digit, parsing stops there.
        assert_eq!(parse_patch_number("09"), Ok(0));
    }

    #[test]
    fn test_parse_patch_number_never_fails() {
        assert_eq!(parse_patch_number("seven"), Ok(0));
        assert_eq!(parse_patch_number(""), Ok(0));
        assert_eq!(parse_patch_number("12abc"), Ok(12));
        assert_eq!(parse_patch_number("-5"), Ok(-5));
        assert_eq!(parse_patch_number("99999999999999999999"), Ok(i64::MAX));
        assert_eq!(parse_patch_number("-99999999999999999999"), Ok(-i64::MAX));
    }

    #[test]
    fn test_patch_takes_negative_value() {
        let cli = Cli::try_parse_from(["sevendump", "-p", "-5", "rom1a.syx"]).unwrap();
        assert_eq!(cli.patch, Some(-5));
        assert_eq!(cli.filename, Some(PathBuf::from("rom1a.syx")));
        assert!(!cli.listing_options().includes(5));
    }

    #[test]
    fn test_patch_implies_long() {
        let cli = Cli::try_parse_from(["sevendump", "-p", "5", "rom1a.syx"]).unwrap();
        let options = cli.listing_options();
        assert!(options.is_long());
        assert_eq!(options.patch, Some(5));
        assert_eq!(cli.filename, Some(PathBuf::from("rom1a.syx")));
    }

    #[test]
    fn test_long_flags() {
        let cli = Cli::try_parse_from(["sevendump", "--long", "--find-duplicates", "a.syx"]).unwrap();
        assert!(cli.long);
        assert!(cli.find_duplicates);
        assert!(!cli.version);
    }

    #[test]
    fn test_unknown_option() {
        let e = Cli::try_parse_from(["sevendump", "-x", "a.syx"]).unwrap_err();
        let line = usage_error_line(&e);
        assert!(line.starts_with("Error: unexpected argument '-x'"), "{}", line);
        assert!(line.ends_with(". Try -h for help."));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_command_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
