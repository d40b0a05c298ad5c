//! Flux models and rate weighting of Monte Carlo tau events
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod exposure;
mod model;
mod weighting;

// Inline anything important for a nice public API
#[doc(inline)]
pub use model::{FluxModel, InverseSquareFlux, WAXMAN_BAHCALL_FACTOR};

#[doc(inline)]
pub use weighting::{
    fluxify, fluxify_batch, primary_rates, FluxedEvents, NeutrinoAttribute, NeutrinoCandidate,
    TauAttribute, TauCandidate,
};

#[doc(inline)]
pub use exposure::{exposure, Exposure, DEFAULT_ENERGY_RANGE, SECONDS_PER_YEAR};

#[doc(inline)]
pub use error::{Error, Result};
