//! Error types for external catalog operations.
//!
//! Follows the What/Why/Fix message pattern used across the project. None of
//! these errors fail a ranking request; the orchestrator logs them and treats
//! the affected search or journal as absent.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while searching the catalog or fetching journal details.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// The HTTP client could not be constructed.
    #[error("cannot initialize {catalog} client: {reason}\n  Suggestion: {suggestion}")]
    ClientBuild {
        /// Catalog name
        catalog: String,
        /// Why construction failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The request never produced a response (DNS, connect, TLS, read).
    #[error("{catalog} {operation} request failed: {reason}\n  Suggestion: Check your network connection")]
    Request {
        /// Catalog name
        catalog: String,
        /// Operation being performed (`search` or `detail`)
        operation: String,
        /// Transport error description
        reason: String,
    },

    /// The catalog answered with a non-success status.
    #[error("{catalog} {operation} returned HTTP {status}: {reason}\n  Suggestion: {suggestion}")]
    HttpStatus {
        /// Catalog name
        catalog: String,
        /// Operation being performed
        operation: String,
        /// HTTP status code
        status: u16,
        /// Human-readable reason
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The response body did not match the expected schema.
    #[error("unexpected {catalog} {operation} response format: {reason}")]
    MalformedResponse {
        /// Catalog name
        catalog: String,
        /// Operation being performed
        operation: String,
        /// Parse error description
        reason: String,
    },

    /// The catalog has no record for the identifier.
    #[error("no {catalog} record for '{identifier}'")]
    NotFound {
        /// Catalog name
        catalog: String,
        /// Identifier that was looked up
        identifier: String,
    },

    /// The detail fetch exceeded its time budget.
    #[error("detail fetch for '{identifier}' timed out after {timeout_ms}ms")]
    Timeout {
        /// Identifier that was looked up
        identifier: String,
        /// Budget in milliseconds
        timeout_ms: u128,
    },

    /// The fetch was abandoned before it started.
    #[error("detail fetch for '{identifier}' was cancelled")]
    Cancelled {
        /// Identifier that was looked up
        identifier: String,
    },
}

impl CatalogError {
    /// Creates a `ClientBuild` error.
    #[must_use]
    pub fn client_build(catalog: &str, reason: &str) -> Self {
        Self::ClientBuild {
            catalog: catalog.to_string(),
            reason: reason.to_string(),
            suggestion: "Check the catalog configuration (base URL, API key)".to_string(),
        }
    }

    /// Creates a `Request` error.
    #[must_use]
    pub fn request(catalog: &str, operation: &str, reason: &str) -> Self {
        Self::Request {
            catalog: catalog.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates an `HttpStatus` error with a reason derived from the status code.
    #[must_use]
    pub fn http_status(catalog: &str, operation: &str, status: u16) -> Self {
        let (reason, suggestion) = match status {
            401 | 403 => (
                "API key rejected".to_string(),
                "Check ELSEVIER_API_KEY and its entitlements".to_string(),
            ),
            404 => (
                "resource not found".to_string(),
                "The identifier may not be indexed by the catalog".to_string(),
            ),
            429 => (
                "rate limit exceeded".to_string(),
                "Try again in a few seconds".to_string(),
            ),
            s if s >= 500 => (
                "catalog unavailable".to_string(),
                "Try again later".to_string(),
            ),
            s => (format!("unexpected status {s}"), "Try again later".to_string()),
        };
        Self::HttpStatus {
            catalog: catalog.to_string(),
            operation: operation.to_string(),
            status,
            reason,
            suggestion,
        }
    }

    /// Creates a `MalformedResponse` error.
    #[must_use]
    pub fn malformed(catalog: &str, operation: &str, reason: &str) -> Self {
        Self::MalformedResponse {
            catalog: catalog.to_string(),
            operation: operation.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `NotFound` error.
    #[must_use]
    pub fn not_found(catalog: &str, identifier: &str) -> Self {
        Self::NotFound {
            catalog: catalog.to_string(),
            identifier: identifier.to_string(),
        }
    }

    /// Creates a `Timeout` error.
    #[must_use]
    pub fn timeout(identifier: &str, budget: Duration) -> Self {
        Self::Timeout {
            identifier: identifier.to_string(),
            timeout_ms: budget.as_millis(),
        }
    }
}
