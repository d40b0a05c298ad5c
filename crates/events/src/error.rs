//! Result and Error types for the events module

use crate::event::Origin;
use std::path::PathBuf;

/// Type alias for `Result<T, events::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `tautools-events`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    IOError(#[from] std::io::Error),

    /// Failure to serialise to a JSON string
    #[error("failed serde JSON operation")]
    JSONError(#[from] serde_json::Error),

    /// Failure to serialize/deserialize a byte stream
    #[error("failed binary (de)serialization")]
    FailedBinaryOp(#[from] Box<bincode::ErrorKind>),

    /// Malformed, missing, or out of range fields in an event record
    #[error("malformed event \"{tag}\": {reason}")]
    SchemaError { tag: String, reason: String },

    /// Events of one batch declare different local frame origins
    #[error("inconsistent origin for event \"{tag}\" (expected {expected}, found {found})")]
    ConsistencyError {
        tag: String,
        expected: Origin,
        found: Origin,
    },

    /// A batch needs at least one event to define its origin
    #[error("no events in batch")]
    EmptyBatch,

    /// The progress bar could not be set up
    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),

    /// Directory given for collection is not a directory
    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),
}

impl Error {
    /// Shorthand for a [Error::SchemaError]
    pub(crate) fn schema(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaError {
            tag: tag.into(),
            reason: reason.into(),
        }
    }
}
