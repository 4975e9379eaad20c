//! The ranking engine.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::order::{sort_international, sort_national};
use crate::catalog::{
    FetchPolicy, JournalCatalog, ScopusCatalog, build_search_query, distinct_identifiers,
    fetch_details,
};
use crate::config::{ConfigError, EngineConfig};
use crate::directory::{CuratedDirectory, LocalDirectory};
use crate::model::{Query, ResultSet, ScoredCandidate};
use crate::scoring::{INTERNATIONAL_FIELD_BASELINE, NATIONAL_FIELD_BASELINE, score_candidate};

/// Ranks national and international journals for a query.
///
/// The engine holds read-only handles to its collaborators and an immutable
/// fetch policy; it keeps no per-request state, so it can be shared across
/// tasks and the same query always produces the same result for the same
/// collaborator responses. Cloning is cheap: clones share the collaborators.
#[derive(Clone)]
pub struct RankingEngine {
    directory: Arc<dyn LocalDirectory>,
    catalog: Option<Arc<dyn JournalCatalog>>,
    policy: FetchPolicy,
}

impl RankingEngine {
    /// Creates an engine with the default fetch policy.
    ///
    /// Pass `None` for `catalog` when no API credential is configured; the
    /// international pool is then always empty.
    #[must_use]
    pub fn new(
        directory: Arc<dyn LocalDirectory>,
        catalog: Option<Arc<dyn JournalCatalog>>,
    ) -> Self {
        Self {
            directory,
            catalog,
            policy: FetchPolicy::default(),
        }
    }

    /// Replaces the fetch policy.
    #[must_use]
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the engine and its collaborators from startup configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Directory`] if the configured directory file
    /// cannot be loaded, or [`ConfigError::Catalog`] if the catalog client
    /// cannot be built.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let directory: Arc<dyn LocalDirectory> = match &config.directory {
            Some(path) => Arc::new(CuratedDirectory::load(path)?),
            None => {
                info!("No curated directory configured; national results will be empty");
                Arc::new(CuratedDirectory::from_candidates(Vec::new()))
            }
        };

        let catalog: Option<Arc<dyn JournalCatalog>> = match &config.api_key {
            Some(api_key) => Some(Arc::new(ScopusCatalog::with_settings(
                api_key.as_str(),
                &config.api_base_url,
                config.timeouts,
                config.search_result_count,
            )?)),
            None => {
                info!("No catalog API key configured; international results will be empty");
                None
            }
        };

        Ok(Self::new(directory, catalog).with_policy(config.fetch_policy.clone()))
    }

    /// Returns true when an external catalog is configured.
    #[must_use]
    pub fn has_catalog(&self) -> bool {
        self.catalog.is_some()
    }

    /// Ranks both pools for a query.
    ///
    /// Collaborator failures never surface here: a failing pool is logged and
    /// returned empty. An empty query returns two empty lists without calling
    /// any collaborator.
    #[instrument(skip(self, query), fields(field = %query.field, keywords = query.keywords.len()))]
    pub async fn rank(&self, query: &Query) -> ResultSet {
        if query.is_empty() {
            debug!("Empty query; skipping collaborators");
            return ResultSet::default();
        }

        let (national, international) =
            tokio::join!(self.rank_national(query), self.rank_international(query));

        info!(
            national = national.len(),
            international = international.len(),
            "Ranking complete"
        );
        ResultSet {
            national,
            international,
        }
    }

    async fn rank_national(&self, query: &Query) -> Vec<ScoredCandidate> {
        let candidates = match self.directory.lookup(&query.field).await {
            Ok(candidates) => candidates,
            Err(error) => {
                warn!(
                    directory = self.directory.name(),
                    error = %error,
                    "Local directory unavailable; national results empty"
                );
                return Vec::new();
            }
        };

        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| score_candidate(query, candidate, NATIONAL_FIELD_BASELINE))
            .collect();
        sort_national(&mut scored);
        debug!(count = scored.len(), "National pool scored");
        scored
    }

    async fn rank_international(&self, query: &Query) -> Vec<ScoredCandidate> {
        let Some(catalog) = &self.catalog else {
            return Vec::new();
        };
        let Some(search_query) = build_search_query(query) else {
            return Vec::new();
        };

        let hits = match catalog.search(&search_query).await {
            Ok(hits) => hits,
            Err(error) => {
                warn!(
                    catalog = catalog.name(),
                    error = %error,
                    "Catalog search failed; international results empty"
                );
                return Vec::new();
            }
        };

        let identifiers = distinct_identifiers(&hits, self.policy.max_detail_fetches);
        debug!(
            hits = hits.len(),
            selected = identifiers.len(),
            "Selected journals for enrichment"
        );

        let mut scored: Vec<ScoredCandidate> = fetch_details(catalog, identifiers, &self.policy)
            .await
            .into_iter()
            .map(|candidate| score_candidate(query, candidate, INTERNATIONAL_FIELD_BASELINE))
            .collect();
        sort_international(&mut scored);
        scored
    }
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field("directory", &self.directory.name())
            .field("catalog", &self.catalog.as_ref().map(|c| c.name()))
            .field("policy", &self.policy)
            .finish()
    }
}
