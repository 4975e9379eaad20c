//! Detail-fetch policy: which identifiers to enrich and how.
//!
//! Search results are reduced to distinct identifiers in result order and
//! capped, then each identifier is enriched by its own task. A failing, slow,
//! or panicking fetch only removes its own journal from the output.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, instrument, trace, warn};

use super::{CatalogError, JournalCatalog, SearchHit};
use crate::model::Candidate;

/// Maximum number of distinct identifiers enriched per request.
pub const DEFAULT_MAX_DETAIL_FETCHES: usize = 5;

/// Maximum number of detail fetches in flight at once.
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 5;

/// Time budget for a single detail fetch.
pub const DEFAULT_DETAIL_TIMEOUT_SECS: u64 = 15;

/// Bounds on detail fetching for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchPolicy {
    /// First N distinct identifiers are fetched; the rest are ignored.
    pub max_detail_fetches: usize,
    /// Concurrent fetch limit (at least 1).
    pub concurrency: usize,
    /// Per-fetch timeout; expiry is treated like any other failure.
    pub detail_timeout: Duration,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_detail_fetches: DEFAULT_MAX_DETAIL_FETCHES,
            concurrency: DEFAULT_DETAIL_CONCURRENCY,
            detail_timeout: Duration::from_secs(DEFAULT_DETAIL_TIMEOUT_SECS),
        }
    }
}

/// Extracts distinct identifiers in search-result order, keeping the first `cap`.
///
/// The first occurrence of an identifier wins. Hits without an identifier are
/// skipped. Selection is positional, not relevance-based. Each selected hit is
/// traced with its search-result title.
#[must_use]
pub fn distinct_identifiers(hits: &[SearchHit], cap: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut selected = Vec::new();
    for hit in hits {
        if selected.len() >= cap {
            break;
        }
        let Some(identifier) = hit.identifier.as_deref().map(str::trim) else {
            continue;
        };
        if identifier.is_empty() || !seen.insert(identifier) {
            continue;
        }
        trace!(
            identifier,
            title = hit.title.as_deref().unwrap_or_default(),
            "Selected search hit for enrichment"
        );
        selected.push(identifier.to_string());
    }
    selected
}

/// Fetches detail metadata for every identifier concurrently.
///
/// Returns the successfully enriched candidates in the same relative order as
/// `identifiers`, independent of completion order. Failures are logged and
/// skipped; this function never fails.
#[instrument(skip(catalog, identifiers, policy), fields(catalog_name = catalog.name(), count = identifiers.len()))]
pub async fn fetch_details(
    catalog: &Arc<dyn JournalCatalog>,
    identifiers: Vec<String>,
    policy: &FetchPolicy,
) -> Vec<Candidate> {
    let semaphore = Arc::new(Semaphore::new(policy.concurrency.max(1)));
    let mut handles = Vec::with_capacity(identifiers.len());

    for identifier in identifiers {
        let catalog = Arc::clone(catalog);
        let semaphore = Arc::clone(&semaphore);
        let budget = policy.detail_timeout;
        let task_identifier = identifier.clone();

        let handle = tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return Err(CatalogError::Cancelled {
                    identifier: task_identifier,
                });
            };
            match tokio::time::timeout(budget, catalog.fetch_detail(&task_identifier)).await {
                Ok(result) => result,
                Err(_) => Err(CatalogError::timeout(&task_identifier, budget)),
            }
        });
        handles.push((identifier, handle));
    }

    let mut enriched = Vec::with_capacity(handles.len());
    for (identifier, handle) in handles {
        match handle.await {
            Ok(Ok(candidate)) => {
                debug!(identifier = %identifier, "Journal detail fetched");
                enriched.push(candidate);
            }
            Ok(Err(error)) => {
                warn!(identifier = %identifier, error = %error, "Skipping journal; detail fetch failed");
            }
            Err(error) => {
                warn!(identifier = %identifier, error = %error, "Skipping journal; detail fetch task panicked");
            }
        }
    }

    debug!(enriched = enriched.len(), "Detail fetch complete");
    enriched
}
