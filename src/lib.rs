//! Journal Ranker Library
//!
//! Recommends academic journals for a paper, given its research field and
//! extracted keywords. Candidates come from two pools: a local curated
//! directory of national journals and an external bibliographic catalog of
//! international journals. Every candidate gets a comparable relevance score
//! and each pool is ranked.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`model`] - Query, candidate, and result types
//! - [`scoring`] - Fuzzy keyword/scope similarity and field-match boost
//! - [`directory`] - Local curated directory collaborator
//! - [`catalog`] - External catalog collaborator, search query, detail fetch policy
//! - [`ranking`] - Ranking orchestrator
//! - [`api`] - JSON request/response contract
//! - [`config`] - Startup configuration from file and environment

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod catalog;
pub mod config;
pub mod directory;
pub mod model;
pub mod ranking;
pub mod scoring;
#[cfg(test)]
pub(crate) mod test_support;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use api::{ApiError, ApiResponse, RecommendRequest, handle_request};
pub use catalog::{CatalogError, FetchPolicy, JournalCatalog, ScopusCatalog, SearchHit};
pub use config::{ConfigError, EngineConfig, FileConfig};
pub use directory::{CuratedDirectory, DirectoryError, LocalDirectory};
pub use model::{Candidate, CandidateSource, Query, ResultSet, ScoredCandidate};
pub use ranking::RankingEngine;
pub use scoring::score;
