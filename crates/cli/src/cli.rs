//! Command line arguments

// standard library
use std::path::PathBuf;

// tautools modules
use tautools_flux::{DEFAULT_ENERGY_RANGE, WAXMAN_BAHCALL_FACTOR};
use tautools_histogram::DEFAULT_BINS;

// external crates
use clap::{ArgAction, Args, Parser, Subcommand};

/// Collect simulated tau events and fold them with a neutrino flux
#[derive(Parser, Debug)]
#[command(name = "tautools", version, about, arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging (-v, -vv)
    ///
    /// Warnings are always shown. A single -v adds information on files read
    /// and written, -vv adds per-batch summaries, and -vvv every event.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output (overrules --verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Read a directory of event files into a single batch file
    Collect(CollectArgs),

    /// Rates, exposure, and differential spectra of a batch
    Spectra(SpectraArgs),
}

#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory containing *.voltage.json event files
    #[arg(value_name = "path")]
    pub path: PathBuf,

    /// Output batch file
    #[arg(short, long, value_name = "path", default_value = "events.bin")]
    pub output: PathBuf,

    /// Warn about and skip unreadable event files
    #[arg(long)]
    pub skip_unreadable: bool,

    /// Also write the batch as JSON next to the output
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SpectraArgs {
    /// Batch file, or a directory of event files
    #[arg(value_name = "path")]
    pub path: PathBuf,

    /// Output JSON file for the spectra
    #[arg(short, long, value_name = "path", default_value = "spectra.json")]
    pub output: PathBuf,

    /// Number of bin edges for every spectrum
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Flux normalisation C in C/E^2 (GeV/(m^2 s sr))
    #[arg(long, value_name = "C", default_value_t = WAXMAN_BAHCALL_FACTOR)]
    pub normalisation: f64,

    /// Lower energy bound of the flux integral (GeV)
    #[arg(long, value_name = "E", default_value_t = DEFAULT_ENERGY_RANGE.0)]
    pub emin: f64,

    /// Upper energy bound of the flux integral (GeV)
    #[arg(long, value_name = "E", default_value_t = DEFAULT_ENERGY_RANGE.1)]
    pub emax: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn collect_defaults() {
        let cli = Cli::try_parse_from(["tautools", "collect", "runs/"]).unwrap();
        let Command::Collect(args) = cli.command else {
            panic!("expected collect");
        };
        assert_eq!(args.path, PathBuf::from("runs/"));
        assert_eq!(args.output, PathBuf::from("events.bin"));
        assert!(!args.skip_unreadable);
        assert!(!args.json);
    }

    #[test]
    fn spectra_defaults() {
        let cli = Cli::try_parse_from(["tautools", "spectra", "events.bin"]).unwrap();
        let Command::Spectra(args) = cli.command else {
            panic!("expected spectra");
        };
        assert_eq!(args.output, PathBuf::from("spectra.json"));
        assert_eq!(args.bins, DEFAULT_BINS);
        assert_eq!(args.normalisation, WAXMAN_BAHCALL_FACTOR);
        assert_eq!((args.emin, args.emax), DEFAULT_ENERGY_RANGE);
    }

    #[rstest]
    #[case(&["tautools", "collect", "runs/"], 0, false)]
    #[case(&["tautools", "collect", "runs/", "-v"], 1, false)]
    #[case(&["tautools", "-vv", "collect", "runs/"], 2, false)]
    #[case(&["tautools", "spectra", "events.bin", "-vvv", "-q"], 3, true)]
    fn global_verbosity(#[case] args: &[&str], #[case] verbose: u8, #[case] quiet: bool) {
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.verbose, verbose);
        assert_eq!(cli.quiet, quiet);
    }

    #[rstest]
    #[case(&["tautools"])]
    #[case(&["tautools", "spectra"])]
    #[case(&["tautools", "collect"])]
    #[case(&["tautools", "spectra", "events.bin", "--bins", "many"])]
    #[case(&["tautools", "plot", "events.bin"])]
    fn rejected_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
