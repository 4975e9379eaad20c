//! Core data types shared by the scorer, collaborators, and orchestrator.

mod candidate;
mod query;

pub use candidate::{Candidate, CandidateSource, ResultSet, ScoredCandidate};
pub use query::Query;
