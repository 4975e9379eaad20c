//! Error types for local directory operations.
//!
//! Follows the What/Why/Fix message pattern used across the project.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or querying the curated directory.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory file could not be read.
    #[error("cannot read journal directory '{path}': {source}\n  Suggestion: Check the --directory path and file permissions")]
    Io {
        /// Path that failed to load
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The directory file is not valid journal JSON.
    #[error("invalid journal directory '{path}': {source}\n  Suggestion: Expected a JSON array of journal records")]
    Parse {
        /// Path that failed to parse
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The directory backend could not answer a lookup.
    #[error("journal directory '{directory}' unavailable: {reason}\n  Suggestion: {suggestion}")]
    Unavailable {
        /// Name of the directory backend
        directory: String,
        /// Why the lookup failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl DirectoryError {
    /// Creates an `Unavailable` error.
    #[must_use]
    pub fn unavailable(directory: &str, reason: &str) -> Self {
        Self::Unavailable {
            directory: directory.to_string(),
            reason: reason.to_string(),
            suggestion: "National results are skipped for this request; try again later"
                .to_string(),
        }
    }
}
