//! Recommendation request schema.

use serde::Deserialize;

use super::ApiError;
use crate::model::Query;

/// Keywords as sent by clients: a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum KeywordsInput {
    One(String),
    Many(Vec<String>),
}

impl KeywordsInput {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(keyword) => vec![keyword],
            Self::Many(keywords) => keywords,
        }
    }
}

/// Body of a recommendation request.
///
/// `field` and `keywords` may be absent or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub keywords: Option<KeywordsInput>,
}

impl RecommendRequest {
    /// Parses a JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] for malformed JSON, a non-object
    /// body, or fields of the wrong type.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|error| ApiError::invalid_request(format!("malformed JSON: {error}")))?;
        if !value.is_object() {
            return Err(ApiError::invalid_request("expected a JSON object"));
        }
        serde_json::from_value(value).map_err(|error| ApiError::invalid_request(error.to_string()))
    }

    /// Converts the request into a ranking query.
    #[must_use]
    pub fn into_query(self) -> Query {
        Query::new(
            self.field.unwrap_or_default(),
            self.keywords.map(KeywordsInput::into_vec).unwrap_or_default(),
        )
    }
}
