//! Local curated directory of national journals.
//!
//! - [`LocalDirectory`] - Async trait the ranking engine queries per request
//! - [`CuratedDirectory`] - JSON-file-backed implementation loaded at startup
//! - [`DirectoryError`] - Loading and lookup failures

mod curated;
mod error;

pub use curated::CuratedDirectory;
pub use error::DirectoryError;

use async_trait::async_trait;

use crate::model::Candidate;

/// Source of national journal candidates.
///
/// # Object Safety
///
/// Uses `async_trait` so the engine can hold an `Arc<dyn LocalDirectory>`.
#[async_trait]
pub trait LocalDirectory: Send + Sync {
    /// Returns the directory's name for logging.
    fn name(&self) -> &str;

    /// Returns raw candidates for a research field.
    ///
    /// An empty result is a normal outcome, not an error.
    async fn lookup(&self, field: &str) -> Result<Vec<Candidate>, DirectoryError>;
}
