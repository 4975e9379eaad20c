//! Elsevier Scopus catalog client.
//!
//! [`ScopusCatalog`] searches the Scopus document index for journal sources
//! matching a boolean query, then enriches each journal by ISSN through the
//! serial-title API (CiteScore, SJR, subject areas, profile link).
//!
//! Scopus responses are loosely shaped: metrics arrive as numbers or numeric
//! strings, and single-element arrays are sometimes collapsed to objects. The
//! response types below absorb both forms and fall back to documented defaults.

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::http_client::{HttpTimeouts, build_catalog_http_client};
use super::{CatalogError, JournalCatalog, SearchHit};
use crate::model::{Candidate, CandidateSource};
use crate::user_agent;

/// Default Elsevier API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.elsevier.com";

/// Default number of documents requested per search.
pub const DEFAULT_SEARCH_COUNT: u32 = 8;

/// Header carrying the API key (kept out of URLs so it never reaches logs).
const API_KEY_HEADER: &str = "X-ELS-APIKey";

/// Link relation of the journal's Scopus source profile.
const SOURCE_PROFILE_REL: &str = "scopus-source";

const CATALOG_NAME: &str = "scopus";
const UNKNOWN: &str = "Unknown";
const PROCESSING_TIME_VARIES: &str = "Varies";

// ==================== Scopus Response Types ====================

/// Either a single value or a list of values.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(values) => values,
            Self::One(value) => vec![value],
        }
    }
}

/// A metric that may be encoded as a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    /// Numeric value, if finite. `"NaN"` and `"inf"` parse as floats but are
    /// treated as missing.
    fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|value| value.is_finite())
    }

    fn label(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.trim().to_string(),
        }
    }
}

/// Top-level document search response.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(rename = "search-results")]
    pub search_results: Option<SearchResults>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResults {
    pub entry: Option<OneOrMany<SearchEntry>>,
}

/// One document hit. Scopus reports an empty result set as a single entry
/// carrying only an `error` field.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchEntry {
    #[serde(rename = "prism:issn")]
    pub issn: Option<String>,
    #[serde(rename = "prism:eIssn")]
    pub eissn: Option<String>,
    #[serde(rename = "prism:publicationName")]
    pub publication_name: Option<String>,
}

/// Top-level serial-title response.
#[derive(Debug, Deserialize)]
pub(crate) struct SerialResponse {
    #[serde(rename = "serial-metadata-response")]
    pub metadata: Option<SerialMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SerialMetadata {
    pub entry: Option<OneOrMany<SerialEntry>>,
}

/// Journal metadata from the serial-title API.
#[derive(Debug, Deserialize)]
pub(crate) struct SerialEntry {
    #[serde(rename = "dc:title")]
    pub title: Option<String>,
    #[serde(rename = "dc:publisher")]
    pub publisher: Option<String>,
    #[serde(rename = "source-id")]
    pub source_id: Option<MetricValue>,
    #[serde(rename = "citeScoreYearInfoList")]
    pub cite_score: Option<CiteScoreInfo>,
    #[serde(rename = "SJRList")]
    pub sjr_list: Option<SjrList>,
    #[serde(rename = "subject-area")]
    pub subject_areas: Option<OneOrMany<SubjectArea>>,
    pub link: Option<OneOrMany<SerialLink>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CiteScoreInfo {
    #[serde(rename = "citeScoreCurrentMetric")]
    pub current: Option<MetricValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SjrList {
    #[serde(rename = "SJR")]
    pub sjr: Option<OneOrMany<ValueNode>>,
}

/// A `{"$": value}` node.
#[derive(Debug, Deserialize)]
pub(crate) struct ValueNode {
    #[serde(rename = "$")]
    pub value: Option<MetricValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubjectArea {
    #[serde(rename = "$")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SerialLink {
    #[serde(rename = "@ref")]
    pub rel: Option<String>,
    #[serde(rename = "@href")]
    pub href: Option<String>,
}

// ==================== ScopusCatalog ====================

/// Journal catalog backed by the Elsevier Scopus APIs.
///
/// One search request per ranking request plus one serial-title request per
/// enriched journal. No retries: a failed call is final for that request.
pub struct ScopusCatalog {
    client: Client,
    base_url: String,
    api_key: String,
    search_count: u32,
}

impl ScopusCatalog {
    /// Creates a client against the public Elsevier API with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] if the API key is invalid or the
    /// HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CatalogError> {
        Self::build(
            api_key.into(),
            DEFAULT_BASE_URL,
            HttpTimeouts::default(),
            DEFAULT_SEARCH_COUNT,
        )
    }

    /// Creates a client against a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] if the API key or base URL is
    /// invalid or the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl AsRef<str>,
    ) -> Result<Self, CatalogError> {
        Self::build(
            api_key.into(),
            base_url.as_ref(),
            HttpTimeouts::default(),
            DEFAULT_SEARCH_COUNT,
        )
    }

    /// Creates a fully configured client.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ClientBuild`] if the API key or base URL is
    /// invalid or the HTTP client cannot be built.
    #[instrument(skip(api_key))]
    pub fn with_settings(
        api_key: impl Into<String>,
        base_url: &str,
        timeouts: HttpTimeouts,
        search_count: u32,
    ) -> Result<Self, CatalogError> {
        Self::build(api_key.into(), base_url, timeouts, search_count)
    }

    fn build(
        api_key: String,
        base_url: &str,
        timeouts: HttpTimeouts,
        search_count: u32,
    ) -> Result<Self, CatalogError> {
        let api_key = api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(CatalogError::client_build(CATALOG_NAME, "API key is empty"));
        }
        if api_key.chars().any(char::is_control) {
            return Err(CatalogError::client_build(
                CATALOG_NAME,
                "API key contains invalid control characters",
            ));
        }
        if let Err(error) = Url::parse(base_url) {
            return Err(CatalogError::client_build(
                CATALOG_NAME,
                &format!("invalid base URL '{base_url}': {error}"),
            ));
        }

        let client = build_catalog_http_client(
            CATALOG_NAME,
            user_agent::default_catalog_user_agent(),
            timeouts,
        )?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            search_count: search_count.max(1),
        })
    }

    fn endpoint(&self, operation: &str, path: &str) -> Result<Url, CatalogError> {
        Url::parse(&format!("{}{path}", self.base_url)).map_err(|error| {
            CatalogError::client_build(CATALOG_NAME, &format!("invalid {operation} URL: {error}"))
        })
    }

    /// Sends a GET and decodes a JSON body, mapping every failure to [`CatalogError`].
    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: Url,
    ) -> Result<T, CatalogError> {
        debug!(operation, path = url.path(), "Calling Scopus API");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|error| {
                warn!(operation, error = %error, "Scopus request failed");
                CatalogError::request(CATALOG_NAME, operation, &error.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!(operation, status = status.as_u16(), "Scopus API error status");
            return Err(CatalogError::http_status(
                CATALOG_NAME,
                operation,
                status.as_u16(),
            ));
        }

        response.json::<T>().await.map_err(|error| {
            warn!(operation, error = %error, "Failed to parse Scopus response JSON");
            CatalogError::malformed(CATALOG_NAME, operation, &error.to_string())
        })
    }
}

impl std::fmt::Debug for ScopusCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopusCatalog")
            .field("base_url", &self.base_url)
            .field("search_count", &self.search_count)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl JournalCatalog for ScopusCatalog {
    fn name(&self) -> &'static str {
        CATALOG_NAME
    }

    #[instrument(skip(self), fields(catalog = CATALOG_NAME))]
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, CatalogError> {
        let mut url = self.endpoint("search", "/content/search/scopus")?;
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("count", &self.search_count.to_string())
            .append_pair("sort", "relevancy");

        let body: SearchResponse = self.get_json("search", url).await?;
        let hits = search_hits(body);
        debug!(hits = hits.len(), "Scopus search complete");
        Ok(hits)
    }

    #[instrument(skip(self), fields(catalog = CATALOG_NAME))]
    async fn fetch_detail(&self, identifier: &str) -> Result<Candidate, CatalogError> {
        let path = format!(
            "/content/serial/title/issn/{}",
            urlencoding::encode(identifier)
        );
        let url = self.endpoint("detail", &path)?;

        let body: SerialResponse = self.get_json("detail", url).await?;
        let entry = body
            .metadata
            .and_then(|metadata| metadata.entry)
            .and_then(|entries| entries.into_vec().into_iter().next())
            .ok_or_else(|| CatalogError::not_found(CATALOG_NAME, identifier))?;

        Ok(candidate_from_serial(identifier, entry))
    }
}

// ==================== Extraction Helpers ====================

/// Converts a search response into hits, preserving result order.
fn search_hits(body: SearchResponse) -> Vec<SearchHit> {
    body.search_results
        .and_then(|results| results.entry)
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .map(|entry| SearchHit {
            identifier: non_blank(entry.issn).or_else(|| non_blank(entry.eissn)),
            title: non_blank(entry.publication_name),
        })
        .collect()
}

/// Builds a candidate from serial metadata, applying documented defaults.
///
/// | Field | Source | Default |
/// |---|---|---|
/// | name | `dc:title` | `Unknown` |
/// | publisher | `dc:publisher` | `Unknown` |
/// | secondary metric | `citeScoreCurrentMetric` | `0` |
/// | rank label | `CiteScore: <metric>` | `CiteScore: N/A` |
/// | sjr | `SJRList.SJR[0].$` | absent |
/// | scope | `subject-area[].$` | empty |
/// | broad field | first subject area | `Unknown` |
/// | url | `scopus-source` link | source-id or ISSN profile URL |
fn candidate_from_serial(identifier: &str, entry: SerialEntry) -> Candidate {
    let cite_score = entry.cite_score.and_then(|info| info.current);
    let cite_value = cite_score.as_ref().and_then(MetricValue::as_f64);
    let rank_label = match (&cite_score, cite_value) {
        (Some(raw), Some(_)) => format!("CiteScore: {}", raw.label()),
        _ => "CiteScore: N/A".to_string(),
    };

    let sjr = entry
        .sjr_list
        .and_then(|list| list.sjr)
        .and_then(|nodes| nodes.into_vec().into_iter().next())
        .and_then(|node| node.value)
        .and_then(|value| value.as_f64());

    let scope: Vec<String> = entry
        .subject_areas
        .map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|area| non_blank(area.name))
        .collect();

    let links = entry.link.map(OneOrMany::into_vec).unwrap_or_default();
    let url = profile_link(&links)
        .unwrap_or_else(|| fallback_link(identifier, entry.source_id.as_ref()));

    Candidate {
        identifier: identifier.to_string(),
        name: non_blank(entry.title).unwrap_or_else(|| UNKNOWN.to_string()),
        publisher: non_blank(entry.publisher).unwrap_or_else(|| UNKNOWN.to_string()),
        broad_field: scope.first().cloned().unwrap_or_else(|| UNKNOWN.to_string()),
        scope,
        source: CandidateSource::External,
        secondary_metric: Some(cite_value.unwrap_or(0.0)),
        rank_label,
        sjr,
        url: Some(url),
        avg_processing_time: Some(PROCESSING_TIME_VARIES.to_string()),
    }
}

/// Returns the journal's source-profile link, if the response carries one.
fn profile_link(links: &[SerialLink]) -> Option<String> {
    links
        .iter()
        .find(|link| link.rel.as_deref() == Some(SOURCE_PROFILE_REL))
        .and_then(|link| link.href.clone())
        .filter(|href| !href.trim().is_empty())
}

/// Builds a profile URL when the response lacks a source-profile link.
fn fallback_link(identifier: &str, source_id: Option<&MetricValue>) -> String {
    match source_id.map(MetricValue::label).filter(|id| !id.is_empty()) {
        Some(source_id) => format!("https://www.scopus.com/sourceid/{source_id}"),
        None => format!(
            "https://www.scopus.com/sources?query={}",
            urlencoding::encode(identifier)
        ),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
