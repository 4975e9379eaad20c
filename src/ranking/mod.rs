//! Ranking orchestrator.
//!
//! [`RankingEngine`] answers one query by running the national pipeline
//! (curated directory) and the international pipeline (external catalog)
//! concurrently, scoring every candidate and sorting each pool.

mod engine;
mod order;

pub use engine::RankingEngine;
pub use order::{sort_international, sort_national};
