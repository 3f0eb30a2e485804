//! sevendump
//!
//! Takes a Yamaha DX7 cartridge System Exclusive file and lists its
//! voices as human readable text. The format is also handy for comparing
//! patches with `diff`.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use sevendump::dx7::cartridge::Cartridge;
use sevendump::dx7::listing::dump;

use cli::Cli;

fn main() -> ExitCode {
    // Logs go to stderr so that stdout only has the listing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    print!("{}", e);
                    ExitCode::SUCCESS
                }
                _ => {
                    println!("{}", cli::usage_error_line(&e));
                    ExitCode::FAILURE
                }
            };
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    if cli.version {
        println!("sevendump {}", env!("CARGO_PKG_VERSION"));
        println!("{}", env!("CARGO_PKG_DESCRIPTION"));
        return Ok(());
    }

    let Some(path) = &cli.filename else {
        bail!("Please specify a sysex file. Try -h for help.");
    };

    let data = fs::read(path)
        .with_context(|| format!("Can't open {}", path.display()))?;

    let filename = path.display().to_string();
    let cartridge = Cartridge::from_bytes(&data)
        .with_context(|| format!("{} is not a valid sysex file", filename))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    dump(&mut out, &filename, &cartridge, &cli.listing_options())
        .context("Failed to write listing")?;
    out.flush()?;

    Ok(())
}
