//! JSON-file-backed curated directory of national journals.
//!
//! The file is a JSON array of journal records:
//!
//! ```json
//! [
//!   {
//!     "id": "jk-001",
//!     "name": "Jurnal Komunikasi",
//!     "rank": "S2",
//!     "publisher": "Universitas Contoh",
//!     "broad_field": "Communication",
//!     "specific_focus": ["Media Studies", "Journalism"],
//!     "url": "https://example.ac.id/jk",
//!     "avg_processing_time": "2-3 months"
//!   }
//! ]
//! ```
//!
//! `specific_focus` may also be a single string.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use super::{DirectoryError, LocalDirectory};
use crate::model::{Candidate, CandidateSource};
use crate::scoring::fields_overlap;

/// One journal record as stored in the directory file.
#[derive(Debug, Deserialize)]
struct DirectoryRecord {
    #[serde(alias = "issn")]
    id: String,
    name: String,
    #[serde(default)]
    rank: Option<String>,
    #[serde(default)]
    publisher: Option<String>,
    broad_field: String,
    #[serde(default)]
    specific_focus: Option<FocusTerms>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    avg_processing_time: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FocusTerms {
    One(String),
    Many(Vec<String>),
}

impl FocusTerms {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(term) => vec![term],
            Self::Many(terms) => terms,
        }
    }
}

impl From<DirectoryRecord> for Candidate {
    fn from(record: DirectoryRecord) -> Self {
        let scope = record
            .specific_focus
            .map(FocusTerms::into_vec)
            .unwrap_or_default();
        Self {
            identifier: record.id,
            name: record.name,
            publisher: record.publisher.unwrap_or_else(|| "Unknown".to_string()),
            broad_field: record.broad_field,
            scope,
            source: CandidateSource::Local,
            secondary_metric: None,
            rank_label: record.rank.unwrap_or_default(),
            sjr: None,
            url: record.url,
            avg_processing_time: record.avg_processing_time,
        }
    }
}

/// In-memory curated directory, loaded once at startup.
///
/// Lookups never mutate the directory, so one instance serves every request.
#[derive(Debug, Clone, Default)]
pub struct CuratedDirectory {
    journals: Vec<Candidate>,
}

impl CuratedDirectory {
    /// Creates a directory from already-built candidates.
    ///
    /// Every candidate is re-tagged as [`CandidateSource::Local`].
    #[must_use]
    pub fn from_candidates(journals: Vec<Candidate>) -> Self {
        let journals = journals
            .into_iter()
            .map(|mut journal| {
                journal.source = CandidateSource::Local;
                journal
            })
            .collect();
        Self { journals }
    }

    /// Parses a directory from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Parse`] if the text is not a JSON array of records.
    pub fn from_json_str(raw: &str, origin: &Path) -> Result<Self, DirectoryError> {
        let records: Vec<DirectoryRecord> =
            serde_json::from_str(raw).map_err(|source| DirectoryError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        Ok(Self {
            journals: records.into_iter().map(Candidate::from).collect(),
        })
    }

    /// Loads a directory from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Io`] if the file cannot be read and
    /// [`DirectoryError::Parse`] if its content is invalid.
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, DirectoryError> {
        let raw = fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let directory = Self::from_json_str(&raw, path)?;
        info!(journals = directory.len(), "Loaded curated journal directory");
        Ok(directory)
    }

    /// Returns the number of journals in the directory.
    #[must_use]
    pub fn len(&self) -> usize {
        self.journals.len()
    }

    /// Returns true if the directory holds no journals.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.journals.is_empty()
    }

    fn matches(journal: &Candidate, field: &str) -> bool {
        std::iter::once(&journal.broad_field)
            .chain(&journal.scope)
            .filter(|term| !term.trim().is_empty())
            .any(|term| fields_overlap(term, field))
    }
}

#[async_trait]
impl LocalDirectory for CuratedDirectory {
    fn name(&self) -> &'static str {
        "curated"
    }

    /// Returns journals whose broad field or scope overlaps `field`, in file
    /// order. A blank field returns the whole directory.
    #[instrument(skip(self), fields(directory = "curated"))]
    async fn lookup(&self, field: &str) -> Result<Vec<Candidate>, DirectoryError> {
        if field.trim().is_empty() {
            return Ok(self.journals.clone());
        }

        let found: Vec<Candidate> = self
            .journals
            .iter()
            .filter(|journal| Self::matches(journal, field))
            .cloned()
            .collect();
        debug!(found = found.len(), total = self.journals.len(), "Directory lookup");
        Ok(found)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    fn sample_json() -> &'static str {
        r#"[
            {
                "id": "jk-001",
                "name": "Jurnal Komunikasi",
                "rank": "S2",
                "publisher": "Universitas Contoh",
                "broad_field": "Communication Studies",
                "specific_focus": ["Media Studies", "Journalism"],
                "url": "https://example.ac.id/jk",
                "avg_processing_time": "2-3 months"
            },
            {
                "issn": "1234-0002",
                "name": "Jurnal Hukum",
                "broad_field": "Law",
                "specific_focus": "Constitutional Law"
            },
            {
                "id": "je-003",
                "name": "Jurnal Ekonomi",
                "broad_field": "Economics",
                "specific_focus": ["Marketing Communication"]
            }
        ]"#
    }

    fn directory() -> CuratedDirectory {
        CuratedDirectory::from_json_str(sample_json(), Path::new("journals.json")).unwrap()
    }

    #[test]
    fn test_from_json_str_maps_all_fields() {
        let directory = directory();
        assert_eq!(directory.len(), 3);
        let first = &directory.journals[0];
        assert_eq!(first.identifier, "jk-001");
        assert_eq!(first.rank_label, "S2");
        assert_eq!(first.publisher, "Universitas Contoh");
        assert_eq!(first.scope, vec!["Media Studies", "Journalism"]);
        assert_eq!(first.source, CandidateSource::Local);
        assert_eq!(first.avg_processing_time.as_deref(), Some("2-3 months"));
    }

    #[test]
    fn test_from_json_str_single_focus_and_defaults() {
        let directory = directory();
        let law = &directory.journals[1];
        assert_eq!(law.identifier, "1234-0002");
        assert_eq!(law.scope, vec!["Constitutional Law"]);
        assert_eq!(law.publisher, "Unknown");
        assert!(law.rank_label.is_empty());
        assert!(law.url.is_none());
    }

    #[test]
    fn test_from_json_str_rejects_non_array() {
        let result = CuratedDirectory::from_json_str(r#"{"name": "x"}"#, Path::new("bad.json"));
        assert!(matches!(result, Err(DirectoryError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_lookup_filters_by_broad_field_and_scope() {
        let directory = directory();
        let found = directory.lookup("communication").await.unwrap();
        let ids: Vec<&str> = found.iter().map(|c| c.identifier.as_str()).collect();
        assert_eq!(ids, vec!["jk-001", "je-003"]);
    }

    #[tokio::test]
    async fn test_lookup_blank_field_returns_all() {
        let directory = directory();
        assert_eq!(directory.lookup("  ").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_lookup_ignores_blank_scope_terms() {
        let json = r#"[{"id":"jb-001","name":"Blank Scope","broad_field":"Law","specific_focus":["", "Criminal Law"]}]"#;
        let directory = CuratedDirectory::from_json_str(json, Path::new("blank.json")).unwrap();
        assert!(directory.lookup("Astrophysics").await.unwrap().is_empty());
        assert_eq!(directory.lookup("criminal").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_unknown_field_returns_empty() {
        let directory = directory();
        assert!(directory.lookup("Astrophysics").await.unwrap().is_empty());
    }

    #[test]
    fn test_load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample_json().as_bytes()).unwrap();
        let directory = CuratedDirectory::load(file.path()).unwrap();
        assert_eq!(directory.len(), 3);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = CuratedDirectory::load(Path::new("/nonexistent/journals.json"));
        assert!(matches!(result, Err(DirectoryError::Io { .. })));
    }

    #[test]
    fn test_from_candidates_forces_local_source() {
        let directory = CuratedDirectory::from_candidates(vec![Candidate::new(
            "x",
            "X",
            "Law",
            Vec::new(),
            CandidateSource::External,
        )]);
        assert_eq!(directory.journals[0].source, CandidateSource::Local);
    }
}
