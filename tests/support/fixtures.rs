//! In-memory collaborators for ranking tests.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use journal_ranker::{
    Candidate, CandidateSource, CatalogError, DirectoryError, JournalCatalog, LocalDirectory,
    SearchHit,
};

/// Directory returning a fixed list in a fixed order, counting lookups.
pub struct StaticDirectory {
    journals: Vec<Candidate>,
    lookups: AtomicUsize,
}

impl StaticDirectory {
    pub fn new(journals: Vec<Candidate>) -> Self {
        Self {
            journals,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocalDirectory for StaticDirectory {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn lookup(&self, _field: &str) -> Result<Vec<Candidate>, DirectoryError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self.journals.clone())
    }
}

/// Catalog returning every journal as a search hit, failing the listed identifiers.
pub struct StaticCatalog {
    journals: Vec<Candidate>,
    failing: HashSet<String>,
    searches: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl StaticCatalog {
    pub fn new(journals: Vec<Candidate>) -> Self {
        Self {
            journals,
            failing: HashSet::new(),
            searches: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(mut self, identifier: &str) -> Self {
        self.failing.insert(identifier.to_string());
        self
    }

    pub fn searches(&self) -> usize {
        self.searches.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JournalCatalog for StaticCatalog {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, CatalogError> {
        self.searches.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .journals
            .iter()
            .map(|journal| SearchHit {
                identifier: Some(journal.identifier.clone()),
                title: Some(journal.name.clone()),
            })
            .collect())
    }

    async fn fetch_detail(&self, identifier: &str) -> Result<Candidate, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(identifier) {
            return Err(CatalogError::http_status("static", "detail", 503));
        }
        self.journals
            .iter()
            .find(|journal| journal.identifier == identifier)
            .cloned()
            .ok_or_else(|| CatalogError::not_found("static", identifier))
    }
}

pub fn terms(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

pub fn national(id: &str, broad_field: &str, scope: &[&str]) -> Candidate {
    Candidate::new(
        id,
        format!("Jurnal {id}"),
        broad_field,
        terms(scope),
        CandidateSource::Local,
    )
}

pub fn international(id: &str, scope: &[&str], cite_score: f64) -> Candidate {
    let scope = terms(scope);
    let broad_field = scope.first().cloned().unwrap_or_else(|| "Unknown".to_string());
    Candidate::new(
        id,
        format!("Journal {id}"),
        broad_field,
        scope,
        CandidateSource::External,
    )
    .with_secondary_metric(cite_score)
}
