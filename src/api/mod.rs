//! Transport-agnostic request handling.
//!
//! [`handle_request`] turns a JSON request body into a status code and a JSON
//! response body. Any HTTP server or CLI front end can wrap it.
//!
//! | Outcome | Status | Body |
//! |---|---|---|
//! | Ranked | `200` | `{"national": [...], "international": [...]}` |
//! | Empty query | `200` | `{"national": [], "international": []}` |
//! | Malformed request | `400` | `{"error": "<message>"}` |
//! | Internal failure | `500` | `{"error": "Internal Server Error"}` |

mod error;
mod request;

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE};
pub use request::{KeywordsInput, RecommendRequest};

use reqwest::StatusCode;
use serde_json::{Value, json};
use tracing::{error, instrument, warn};

use crate::model::ResultSet;
use crate::ranking::RankingEngine;

/// A status-coded JSON response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    fn ok(body: Value) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn from_error(error: &ApiError) -> Self {
        Self {
            status: error.status(),
            body: json!({ "error": error.client_message() }),
        }
    }
}

/// Handles one recommendation request.
///
/// A malformed body is rejected before any collaborator is called. Ranking
/// runs on its own task, so a panic inside a collaborator becomes a 500
/// instead of unwinding into the caller. Must be called from within a tokio
/// runtime.
#[instrument(skip(engine, body), fields(body_len = body.len()))]
pub async fn handle_request(engine: &RankingEngine, body: &str) -> ApiResponse {
    let request = match RecommendRequest::from_json(body) {
        Ok(request) => request,
        Err(err) => {
            warn!(error = %err, "Rejected recommendation request");
            return ApiResponse::from_error(&err);
        }
    };

    let engine = engine.clone();
    let query = request.into_query();
    let result = match tokio::spawn(async move { engine.rank(&query).await }).await {
        Ok(result) => result,
        Err(join_error) => {
            let err = ApiError::internal("ranking journals", join_error.to_string());
            error!(error = %err, "Ranking task failed");
            return ApiResponse::from_error(&err);
        }
    };

    match render(&result) {
        Ok(body) => ApiResponse::ok(body),
        Err(err) => {
            error!(error = %err, "Failed to build recommendation response");
            ApiResponse::from_error(&err)
        }
    }
}

/// Serializes a result set into the response body.
///
/// # Errors
///
/// Returns [`ApiError::Internal`] if serialization fails.
pub fn render(result: &ResultSet) -> Result<Value, ApiError> {
    serde_json::to_value(result)
        .map_err(|err| ApiError::internal("serializing ranking result", err.to_string()))
}
