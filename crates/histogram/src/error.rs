//! Result and Error types for tautools-histogram

/// Type alias for Result<T, histogram::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `tautools-histogram` crate
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("degenerate selection: {0}")]
    DegenerateSelection(Degeneracy),

    #[error("bad transform \"{0}\" (expected \"uniform\" or \"log\")")]
    InvalidTransform(String),

    #[error("log binning needs a strictly positive range (found minimum {min})")]
    NonPositiveLogRange { min: f64 },

    #[error("sample rate must be finite and non-negative (found {rate} at index {index})")]
    InvalidRate { index: usize, rate: f64 },

    #[error("failure in binning utilities")]
    Utils(#[from] tautools_utils::Error),
}

/// Reasons a selection can not be normalised or binned
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Degeneracy {
    #[error("number of trials must be strictly positive (found {0})")]
    NoTrials(f64),

    #[error("at least 2 bin edges are needed (found {0})")]
    TooFewBins(usize),

    #[error("selection has no samples")]
    NoSamples,

    #[error("all samples share the value {0}, bins would have zero width")]
    ZeroWidthRange(f64),

    #[error("range [{min:e}, {max:e}] is too narrow for {bins} bins, some would have zero width")]
    TooNarrowRange { min: f64, max: f64, bins: usize },
}

impl From<Degeneracy> for Error {
    fn from(reason: Degeneracy) -> Self {
        Self::DegenerateSelection(reason)
    }
}
