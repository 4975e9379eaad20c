//! Shared User-Agent string for outbound catalog traffic.

/// Tool identifier used in the User-Agent header.
const TOOL_NAME: &str = "journal-ranker";

/// Default User-Agent for catalog requests (identifies the tool and version).
#[must_use]
pub(crate) fn default_catalog_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{TOOL_NAME}/{version} (academic-journal-recommender)")
}
