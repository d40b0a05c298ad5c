//! Result and Error types for the tautools command line

/// Type alias for Result<T, cli::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `tautools` binary
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to write output")]
    IOError(#[from] std::io::Error),

    #[error("failed to serialise output")]
    JSONError(#[from] serde_json::Error),

    #[error("failed to initialise logging")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Events(#[from] tautools_events::Error),

    #[error("failed to build the {name} spectrum")]
    Spectrum {
        name: &'static str,
        source: tautools_histogram::Error,
    },

    #[error(transparent)]
    Flux(#[from] tautools_flux::Error),

    #[error("input not found: {0:?}")]
    MissingInput(std::path::PathBuf),
}
