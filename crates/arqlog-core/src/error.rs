//! Unified error type for arqlog.
//!
//! Every fallible library operation returns [`Result<T>`]. Per-line extraction
//! misses are not errors and never reach this type.

use std::path::PathBuf;

use crate::validate::Mismatch;

#[derive(Debug, thiserror::Error)]
pub enum ArqlogError {
    /// A pattern from the config or a caller did not compile.
    #[error("invalid pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A pattern compiled but does not have exactly one capturing group.
    #[error("pattern {pattern:?} must have exactly one capturing group, found {groups}")]
    CaptureGroups { pattern: String, groups: usize },

    /// A log file could not be opened or read.
    #[error("cannot read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The layered configuration could not be built or deserialised.
    #[error("invalid configuration")]
    Config(#[from] config::ConfigError),

    /// The server and client series of a log set are inconsistent.
    #[error("log set {name:?} failed validation")]
    Validation {
        name: String,
        #[source]
        source: Mismatch,
    },

    /// No log-set names were supplied.
    #[error("no log set names given; pass at least one NAME")]
    MissingInput,
}

impl ArqlogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ArqlogError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ArqlogError>;
