//! Request-layer errors and their HTTP status mapping.

use reqwest::StatusCode;
use thiserror::Error;

/// Message returned to clients for unexpected failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Errors surfaced by the request layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body is not a valid recommendation request.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// An unexpected failure while producing the response.
    #[error("internal error while {context}: {reason}")]
    Internal { context: String, reason: String },
}

impl ApiError {
    /// Creates an invalid-request error.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(context: &str, reason: impl Into<String>) -> Self {
        Self::Internal {
            context: context.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message shown to the client.
    ///
    /// Internal details stay in the logs.
    #[must_use]
    pub fn client_message(&self) -> String {
        match self {
            Self::InvalidRequest { .. } => self.to_string(),
            Self::Internal { .. } => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}
