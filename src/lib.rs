//! `tautools` turns simulated tau decay events into physical rates and
//! spectra under an astrophysical neutrino flux
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use tautools_utils as utils;

#[doc(inline)]
pub use tautools_events as events;

#[doc(inline)]
pub use tautools_histogram as histogram;

#[doc(inline)]
pub use tautools_flux as flux;
