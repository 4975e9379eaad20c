//! Ranking query: a research field plus extracted keywords.

/// A recommendation query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Free-text research field; may be empty.
    pub field: String,
    /// Ordered keywords; earlier keywords take precedence when truncating.
    pub keywords: Vec<String>,
}

impl Query {
    /// Creates a query from a field and keywords.
    #[must_use]
    pub fn new(field: impl Into<String>, keywords: Vec<String>) -> Self {
        Self {
            field: field.into(),
            keywords,
        }
    }

    /// Returns true if the field has non-whitespace content.
    #[must_use]
    pub fn has_field(&self) -> bool {
        !self.field.trim().is_empty()
    }

    /// Returns the keywords that carry non-whitespace content, in order.
    pub fn meaningful_keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
    }

    /// Returns true when neither a field nor any keyword is present.
    ///
    /// Empty queries are answered without calling any collaborator.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.has_field() && self.meaningful_keywords().next().is_none()
    }
}
