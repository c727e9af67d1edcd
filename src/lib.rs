//! Mentor Match - compatibility scoring for mentor/mentee matching
//!
//! This library scores mentor/mentee pairs over in-memory profile snapshots
//! and shortlists the best candidates for a user. Storage, transport and
//! authentication belong to the host application.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod telemetry;

// Re-export commonly used types
pub use crate::core::{CompatibilityEngine, RankingOptions};
pub use error::MatchingError;
pub use models::{ExistingMatches, MatchingWeights, MentorshipMatch, Profile, RankedCandidate, ScoreBreakdown};
