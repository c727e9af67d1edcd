use crate::models::{Profile, ScoreBreakdown};
use crate::core::scoring::calculate_breakdown;

pub const STRONG_SKILL_ALIGNMENT: &str = "Strong skill alignment";
pub const IDEAL_EXPERIENCE: &str = "Ideal experience level match";
pub const SAME_INDUSTRY: &str = "Same industry/function";
pub const COMPATIBLE_COMMUNICATION: &str = "Compatible communication styles";
pub const SAME_TIMEZONE: &str = "Same or compatible time zones";

/// Human-readable reasons for a pairing, in a fixed order
pub fn match_reasons(mentor: &Profile, mentee: &Profile) -> Vec<String> {
    reasons_from_breakdown(&calculate_breakdown(mentor, mentee))
}

/// Each factor contributes a phrase when it clears its threshold
pub fn reasons_from_breakdown(breakdown: &ScoreBreakdown) -> Vec<String> {
    [
        (breakdown.skills > 0.7, STRONG_SKILL_ALIGNMENT),
        (breakdown.experience > 0.8, IDEAL_EXPERIENCE),
        (breakdown.industry > 0.8, SAME_INDUSTRY),
        (breakdown.communication > 0.8, COMPATIBLE_COMMUNICATION),
        (breakdown.timezone > 0.8, SAME_TIMEZONE),
    ]
    .into_iter()
    .filter(|(passed, _)| *passed)
    .map(|(_, reason)| reason.to_string())
    .collect()
}
