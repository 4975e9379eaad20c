//! Journal candidates and their scored form.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which pool a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateSource {
    /// Local curated directory (national journals).
    Local,
    /// External bibliographic catalog (international journals).
    External,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::External => write!(f, "external"),
        }
    }
}

/// A journal considered for recommendation.
///
/// Only `scope` and `broad_field` take part in scoring. The remaining fields
/// are display metadata supplied by the collaborator and passed through to
/// the response unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Opaque identifier, unique within its pool (ISSN for external journals).
    pub identifier: String,
    /// Display name.
    pub name: String,
    /// Publisher display name.
    pub publisher: String,
    /// Coarse subject label.
    pub broad_field: String,
    /// Specific topical terms describing what the journal publishes.
    pub scope: Vec<String>,
    /// Pool the candidate came from.
    pub source: CandidateSource,
    /// Citation metric used only to break score ties.
    pub secondary_metric: Option<f64>,
    /// Accreditation or metric label shown to the user (e.g. `S2`, `CiteScore: 3.1`).
    pub rank_label: String,
    /// SCImago Journal Rank, when the catalog reports one.
    pub sjr: Option<f64>,
    /// Outbound link to the journal profile.
    pub url: Option<String>,
    /// Typical review turnaround, free text.
    pub avg_processing_time: Option<String>,
}

impl Candidate {
    /// Creates a candidate with empty display metadata.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        broad_field: impl Into<String>,
        scope: Vec<String>,
        source: CandidateSource,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            publisher: String::new(),
            broad_field: broad_field.into(),
            scope,
            source,
            secondary_metric: None,
            rank_label: String::new(),
            sjr: None,
            url: None,
            avg_processing_time: None,
        }
    }

    /// Sets the publisher.
    #[must_use]
    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = publisher.into();
        self
    }

    /// Sets the tie-break metric.
    #[must_use]
    pub fn with_secondary_metric(mut self, metric: f64) -> Self {
        self.secondary_metric = Some(metric);
        self
    }

    /// Labels this candidate's subject area for field matching.
    ///
    /// Local journals are curated with an authoritative `broad_field`.
    /// External journals are matched on their subject areas (`scope`) only;
    /// their `broad_field` is just the first subject area or a placeholder.
    pub fn field_labels(&self) -> impl Iterator<Item = &str> {
        let labels: &[String] = match self.source {
            CandidateSource::Local => std::slice::from_ref(&self.broad_field),
            CandidateSource::External => &self.scope,
        };
        labels.iter().map(String::as_str)
    }
}

/// A candidate with its query-scoped relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// The journal.
    #[serde(flatten)]
    pub candidate: Candidate,
    /// Relevance in `0..=100`.
    pub match_score: u8,
}

impl ScoredCandidate {
    /// Returns the tie-break metric, treating a missing or non-finite value as zero.
    #[must_use]
    pub fn secondary_metric_or_zero(&self) -> f64 {
        self.candidate
            .secondary_metric
            .filter(|metric| metric.is_finite())
            .unwrap_or(0.0)
    }
}

/// Ranked output of one request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Journals from the local curated directory.
    pub national: Vec<ScoredCandidate>,
    /// Journals from the external catalog.
    pub international: Vec<ScoredCandidate>,
}

impl ResultSet {
    /// Returns true when neither pool produced a candidate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.national.is_empty() && self.international.is_empty()
    }
}
