use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{MatchStatus, ProfileId};

/// Errors raised by the matching engine and the match lifecycle
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("Weights must sum to 1.0 (got {sum:.3})")]
    InvalidWeights { sum: f64 },

    #[error("Weight for {factor} must be a non-negative number (got {value})")]
    InvalidWeight { factor: &'static str, value: f64 },

    #[error("Invalid profile {profile_id}: {source}")]
    InvalidProfile {
        profile_id: ProfileId,
        #[source]
        source: validator::ValidationErrors,
    },

    #[error("Role mismatch: {0}")]
    RoleMismatch(String),

    #[error("User {0} cannot be matched with themselves")]
    SelfMatch(ProfileId),

    #[error("Match request already exists for mentor {mentor_id} and mentee {mentee_id}")]
    AlreadyMatched {
        mentor_id: ProfileId,
        mentee_id: ProfileId,
    },

    #[error("Mentor {0} has reached their mentee limit")]
    CapacityExhausted(ProfileId),

    #[error("User {0} is not part of this match")]
    NotParticipant(ProfileId),

    #[error("Only the mentor can accept a match request (user {0})")]
    NotMentor(ProfileId),

    #[error("Cannot move match from {from:?} to {to:?}")]
    InvalidTransition { from: MatchStatus, to: MatchStatus },

    #[error("Invalid goal update: {0}")]
    InvalidGoalUpdate(#[source] validator::ValidationErrors),

    #[error("Target date {target_date} must be after {today}")]
    InvalidTargetDate {
        target_date: NaiveDate,
        today: NaiveDate,
    },

    #[error("Invalid matching settings: {0}")]
    InvalidSettings(#[source] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl MatchingError {
    /// Weight and settings problems; the previous weights stay in effect
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            MatchingError::InvalidWeights { .. }
                | MatchingError::InvalidWeight { .. }
                | MatchingError::InvalidSettings(_)
                | MatchingError::Config(_)
        )
    }
}
