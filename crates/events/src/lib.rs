//! Typed Monte Carlo tau decay events
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod batch;
mod error;
mod event;
mod raw;
mod reader;
mod writer;

// Inline anything important for a nice public API
#[doc(inline)]
pub use event::{Event, Origin, Primaries, Statistics, TauAtDecay};

#[doc(inline)]
pub use batch::Batch;

#[doc(inline)]
pub use reader::{find_event_files, read_batch, read_event_file, Collector, EVENT_FILE_SUFFIX};

#[doc(inline)]
pub use writer::{write_batch, write_batch_json};

#[doc(inline)]
pub use error::{Error, Result};
