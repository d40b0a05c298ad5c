//! Result and Error types for tautools-flux

/// Type alias for Result<T, flux::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `tautools-flux` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("flux is undefined for non-positive energy ({energy:e} GeV)")]
    DivisionDomain { energy: f64 },

    #[error("invalid energy range [{min:e}, {max:e}] GeV")]
    InvalidEnergyRange { min: f64, max: f64 },

    #[error(transparent)]
    Event(#[from] tautools_events::Error),

    #[error(transparent)]
    Selection(#[from] tautools_histogram::Error),
}
