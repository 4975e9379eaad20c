//! Boolean search-query construction for the external catalog.

use crate::model::Query;

/// Number of leading keywords included in the catalog search.
pub const TOP_KEYWORDS: usize = 3;

/// Restricts results to journal-type sources.
const JOURNAL_SOURCE_CLAUSE: &str = "SRCTYPE(j)";

/// Builds the catalog search expression for a query.
///
/// The field is required (`AND`), at least one of the first [`TOP_KEYWORDS`]
/// keywords is required (`OR` inside the clause), and results are limited to
/// journals:
///
/// ```text
/// TITLE-ABS-KEY("Communication") AND TITLE-ABS-KEY("media" OR "film") AND SRCTYPE(j)
/// ```
///
/// A clause with no input is omitted. Returns `None` when neither a field nor
/// a keyword remains after sanitizing.
#[must_use]
pub fn build_search_query(query: &Query) -> Option<String> {
    let field = sanitize_term(&query.field);
    let keywords: Vec<String> = query
        .meaningful_keywords()
        .map(sanitize_term)
        .filter(|keyword| !keyword.is_empty())
        .take(TOP_KEYWORDS)
        .collect();

    if field.is_empty() && keywords.is_empty() {
        return None;
    }

    let mut clauses = Vec::with_capacity(3);
    if !field.is_empty() {
        clauses.push(format!("TITLE-ABS-KEY(\"{field}\")"));
    }
    if !keywords.is_empty() {
        let alternatives = keywords
            .iter()
            .map(|keyword| format!("\"{keyword}\""))
            .collect::<Vec<_>>()
            .join(" OR ");
        clauses.push(format!("TITLE-ABS-KEY({alternatives})"));
    }
    clauses.push(JOURNAL_SOURCE_CLAUSE.to_string());

    Some(clauses.join(" AND "))
}

/// Removes characters that would break out of a quoted phrase.
fn sanitize_term(term: &str) -> String {
    term.replace(['"', '\\'], "").trim().to_string()
}
