//! External journal catalog: search, detail enrichment, and fetch policy.
//!
//! A [`JournalCatalog`] answers two questions for the ranking engine:
//! which journals match a boolean search expression, and what metadata a
//! single journal carries. [`fetch_details`] drives the second question
//! concurrently under a [`FetchPolicy`].
//!
//! # Example
//!
//! ```no_run
//! use journal_ranker::catalog::{JournalCatalog, ScopusCatalog};
//!
//! # async fn example() -> Result<(), journal_ranker::catalog::CatalogError> {
//! let catalog = ScopusCatalog::new("my-api-key")?;
//! let hits = catalog.search("TITLE-ABS-KEY(\"Law\") AND SRCTYPE(j)").await?;
//! println!("{} hits", hits.len());
//! # Ok(())
//! # }
//! ```

mod error;
mod fetcher;
mod http_client;
mod scopus;
mod search_query;

pub use error::CatalogError;
pub use fetcher::{
    DEFAULT_DETAIL_CONCURRENCY, DEFAULT_DETAIL_TIMEOUT_SECS, DEFAULT_MAX_DETAIL_FETCHES,
    FetchPolicy, distinct_identifiers, fetch_details,
};
pub use http_client::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, HttpTimeouts,
    build_catalog_http_client,
};
pub use scopus::{DEFAULT_BASE_URL, DEFAULT_SEARCH_COUNT, ScopusCatalog};
pub use search_query::{TOP_KEYWORDS, build_search_query};

use async_trait::async_trait;

use crate::model::Candidate;

/// One document hit returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Journal identifier (ISSN), if the hit carries one.
    pub identifier: Option<String>,
    /// Publication title as reported by the search; traced when the hit is selected.
    pub title: Option<String>,
}

/// Trait for external journal catalogs.
///
/// Implementations must be `Send + Sync`; detail fetches run on separate
/// tasks sharing one catalog behind an `Arc`.
#[async_trait]
pub trait JournalCatalog: Send + Sync {
    /// Returns the catalog's name (for logging).
    fn name(&self) -> &str;

    /// Runs a boolean search expression and returns hits in relevance order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport failure, non-success status, or
    /// an unparseable body.
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, CatalogError>;

    /// Fetches metadata for one journal and converts it to a candidate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] on transport failure, non-success status, an
    /// unparseable body, or a response without journal metadata.
    async fn fetch_detail(&self, identifier: &str) -> Result<Candidate, CatalogError>;
}
