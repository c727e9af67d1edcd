use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchingWeights, Profile};

/// Normalized (0-1) sub-scores for one mentor/mentee pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub skills: f64,
    pub experience: f64,
    pub industry: f64,
    pub communication: f64,
    pub timezone: f64,
    pub availability: f64,
}

impl ScoreBreakdown {
    /// Weighted total scaled to 0-100
    pub fn weighted_total(&self, weights: &MatchingWeights) -> f64 {
        let total = (self.skills * weights.skills
            + self.experience * weights.experience
            + self.industry * weights.industry
            + self.communication * weights.communication
            + self.timezone * weights.timezone
            + self.availability * weights.availability)
            * 100.0;

        total.min(100.0).max(0.0)
    }
}

/// One shortlisted candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(rename = "user")]
    pub candidate: Profile,
    #[serde(rename = "compatibility_score")]
    pub score: f64,
    #[serde(rename = "match_reasons")]
    pub reasons: Vec<String>,
}
