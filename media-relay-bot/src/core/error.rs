//! Error types for the bot core.
//!
//! [`RelayError`] is what handlers and the [`crate::core::Bot`] transport return;
//! [`ExtractionError`] is produced by [`crate::extractor::Extractor`] implementations.

use std::time::Duration;
use thiserror::Error;

/// Failure of one download-and-relay request.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("File is {size} bytes, limit is {limit} bytes")]
    SizeLimitExceeded { size: u64, limit: u64 },

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Why the extraction backend did not produce a file.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to start {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("backend exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("backend did not report an output file")]
    NoOutput,

    #[error("output file {0} does not exist")]
    MissingFile(String),

    #[error("extraction timed out after {0:?}")]
    Timeout(Duration),

    #[error("extraction task aborted: {0}")]
    Aborted(String),

    #[error("scratch directory error: {0}")]
    Scratch(#[source] std::io::Error),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
