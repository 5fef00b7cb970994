//! Error types shared across the batch engine.
//!
//! Load and validation errors abort a run before any external side effect.
//! [`OperationError`] is record-scoped: it ends up in that record's outcome
//! and never stops the batch.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::pull::PullError;

/// Boxed error type used at port boundaries.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// Failures while locating, reading, or decoding an input file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The declared input path does not exist.
    #[error("File not found: {}", path.display())]
    InputNotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// No format was declared and the extension is not recognized.
    #[error("Cannot auto-detect format from {}. Use --format", path.display())]
    UnsupportedFormat {
        /// The path whose extension could not be mapped to a format.
        path: PathBuf,
    },

    /// The input could not be read.
    #[error("Error reading {}: {source}", path.display())]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: PortError,
    },

    /// Bad syntax or an unexpected top-level shape.
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

/// Why a single record operation did not produce a created issue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// The operation executor reported a failure; the text is its raw diagnostic.
    #[error("{0}")]
    Failed(String),

    /// The executor reported success but its locator has no numeric trailing segment.
    #[error("malformed reference from issue tracker: {0:?}")]
    MalformedReference(String),
}

/// Failures while writing a batch summary.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The summary could not be serialized.
    #[error("Failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The summary file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying write failure.
        #[source]
        source: PortError,
    },
}

/// Top-level error returned by [`crate::run`].
#[derive(Debug, Error)]
pub enum AppError {
    /// Command-line arguments were rejected.
    #[error("{0}")]
    Usage(String),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The input file could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// One or more records failed validation; nothing was executed.
    #[error("Validation failed with {count} error(s)")]
    ValidationFailed {
        /// Number of validation errors.
        count: usize,
    },

    /// The batch ran to completion but some records failed.
    #[error("{failed} of {total} issue(s) failed")]
    BatchIncomplete {
        /// Number of failed records.
        failed: usize,
        /// Number of records in the batch.
        total: usize,
    },

    /// The summary file could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Pull request creation failed.
    #[error(transparent)]
    Pull(#[from] PullError),

    /// A record/replay session could not be set up or finished.
    #[error("{0}")]
    Session(String),
}
