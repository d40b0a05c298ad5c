//! Rate-weighted selections and their binned density estimates
//!
#![doc = include_str!("../readme.md")]

mod error;
mod histogram;
mod sample;
mod selection;

#[doc(inline)]
pub use crate::sample::Sample;

#[doc(inline)]
pub use crate::selection::{Selection, DEFAULT_BINS};

#[doc(inline)]
pub use crate::histogram::{Transform, WeightedHistogram};

#[doc(inline)]
pub use crate::error::{Degeneracy, Error, Result};
