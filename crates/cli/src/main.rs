//! Command line interface to the tautools libraries
//!
//! ```text
//! tautools collect runs/ -o events.bin
//! tautools spectra events.bin --bins 40 -o spectra.json
//! ```

mod cli;
mod commands;
mod error;

// crate modules
use cli::{Cli, Command};
use error::Result;

// external crates
use clap::Parser;
use log::error;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    if let Err(e) = run(&cli) {
        error!("{}", report(&e));
        std::process::exit(1);
    }
}

/// Error message followed by every underlying cause
fn report(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message += &format!(": {cause}");
        source = cause.source();
    }
    message
}

fn run(cli: &Cli) -> Result<()> {
    // progress bars are noise when the user asked for silence
    let progress = !cli.quiet;

    match &cli.command {
        Command::Collect(args) => commands::collect(args, progress).map(|_| ()),
        Command::Spectra(args) => commands::spectra(args, progress).map(|_| ()),
    }
}

/// Warnings by default, each -v adds a level, -q silences everything
fn init_logging(cli: &Cli) -> Result<()> {
    stderrlog::new()
        .modules([
            module_path!(),
            "tautools_events",
            "tautools_histogram",
            "tautools_flux",
        ])
        .quiet(cli.quiet)
        .verbosity(cli.verbose as usize + 1)
        .show_level(true)
        .timestamp(stderrlog::Timestamp::Off)
        .init()?;
    Ok(())
}
