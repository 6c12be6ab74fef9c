//! Error types.
//!
//! The analysis engine itself never fails: malformed transcriptions degrade
//! to empty results. Errors only arise when parsing user-facing identifiers
//! or loading a replacement norm table.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by parsing and configuration loading.
#[derive(Debug, Error)]
pub enum Error {
    /// A process code string did not name a catalog entry.
    #[error("Unknown process code: {0:?}")]
    InvalidProcessCode(String),

    /// A test mode string was neither short nor full.
    #[error("Unknown test mode: {0:?} (expected \"short\" or \"full\")")]
    InvalidTestMode(String),

    /// An item number outside the administered test mode.
    #[error("Item {item} is not part of the {mode} test")]
    ItemOutOfRange {
        /// Requested item number
        item: u8,
        /// Mode of the form
        mode: crate::inventory::TestMode,
    },

    /// A norm table failed validation.
    #[error("Invalid norm table: {0}")]
    InvalidNormTable(String),

    /// The norm file could not be read.
    #[error("Failed to read norm file {path}: {source}")]
    NormFileIo {
        /// File that was being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The norm file was not valid JSON for a norm table.
    #[error("Failed to parse norm table: {0}")]
    NormFormat(#[from] serde_json::Error),
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
