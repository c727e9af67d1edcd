use crate::models::{AvailabilityStatus, MatchingWeights, Profile, ScoreBreakdown};
use crate::core::tables::{
    experience_points, is_related_category, styles_compatible, DEFAULT_EXPERIENCE_POINTS,
};

/// Only the mentee's highest-priority goals are considered
const GOALS_CONSIDERED: usize = 3;

const EXACT_MATCH_POINTS: f64 = 15.0;
const MAX_PROFICIENCY_BONUS: f64 = 5.0;
const PRIMARY_SKILL_BONUS: f64 = 5.0;
const RELATED_MATCH_POINTS: f64 = 8.0;
const MULTI_MATCH_CAP: f64 = 30.0;
const PRIMARY_GOAL_BONUS: f64 = 10.0;
const MAX_SKILL_POINTS: f64 = 40.0;

/// Calculate a compatibility score (0-100) for a mentor/mentee pair
///
/// Scoring formula:
/// score = (
///     skills * 0.40 +          # mentor covers the mentee's goals
///     experience * 0.20 +      # level lookup table
///     industry * 0.15 +        # same industry and/or function
///     communication * 0.10 +   # same or compatible style
///     timezone * 0.10 +        # same zone
///     availability * 0.05      # mentor capacity status
/// ) * 100
///
/// The default weights are shown; any validated set may be passed.
pub fn calculate_compatibility(
    mentor: &Profile,
    mentee: &Profile,
    weights: &MatchingWeights,
) -> f64 {
    calculate_breakdown(mentor, mentee).weighted_total(weights)
}

/// Compute all six normalized sub-scores
pub fn calculate_breakdown(mentor: &Profile, mentee: &Profile) -> ScoreBreakdown {
    ScoreBreakdown {
        skills: skill_match(mentor, mentee),
        experience: experience_match(mentor, mentee),
        industry: industry_match(mentor, mentee),
        communication: communication_match(mentor, mentee),
        timezone: timezone_match(mentor, mentee),
        availability: availability_match(mentor),
    }
}

/// Skill score (0-1) over the mentee's top three goals
///
/// Per goal: an exact skill earns 15 + proficiency (max 5) + 5 if primary,
/// otherwise a skill in a related category earns 8. Two or more exact hits
/// cap the subtotal at 30, then meeting the top goal adds 10. Capped at 40.
pub fn skill_match(mentor: &Profile, mentee: &Profile) -> f64 {
    let goals = mentee.goals_by_priority();
    let top_goals = &goals[..goals.len().min(GOALS_CONSIDERED)];

    let mut points = 0.0;
    let mut exact_matches = 0;

    for goal in top_goals {
        if let Some(assignment) = mentor.skill(goal.skill.id) {
            exact_matches += 1;

            points += EXACT_MATCH_POINTS
                + f64::from(assignment.proficiency).min(MAX_PROFICIENCY_BONUS);
            if assignment.is_primary {
                points += PRIMARY_SKILL_BONUS;
            }
        } else if has_related_skill(mentor, goal.skill.category.as_deref()) {
            points += RELATED_MATCH_POINTS;
        }
    }

    if exact_matches >= 2 {
        points = f64::min(points, MULTI_MATCH_CAP);
    }

    let primary_goal_met = top_goals
        .first()
        .is_some_and(|goal| mentor.skill(goal.skill.id).is_some());
    if primary_goal_met {
        points += PRIMARY_GOAL_BONUS;
    }

    points.min(MAX_SKILL_POINTS) / MAX_SKILL_POINTS
}

/// Goals without a category never earn partial credit
fn has_related_skill(mentor: &Profile, goal_category: Option<&str>) -> bool {
    let Some(goal_category) = goal_category else {
        return false;
    };

    mentor.skills.iter().any(|assignment| {
        assignment
            .skill
            .category
            .as_deref()
            .is_some_and(|category| is_related_category(goal_category, category))
    })
}

/// Experience score (0-1) from the level table, out of 20 points
#[inline]
pub fn experience_match(mentor: &Profile, mentee: &Profile) -> f64 {
    let points = match (mentee.experience_level, mentor.experience_level) {
        (Some(mentee_level), Some(mentor_level)) => experience_points(mentee_level, mentor_level),
        _ => DEFAULT_EXPERIENCE_POINTS,
    };

    f64::from(points) / 20.0
}

/// Industry/function score (0-1): both 15, industry 10, function 8 (of 15)
#[inline]
pub fn industry_match(mentor: &Profile, mentee: &Profile) -> f64 {
    let same_industry = same_value(&mentor.industry, &mentee.industry);
    let same_function = same_value(&mentor.function, &mentee.function);

    match (same_industry, same_function) {
        (true, true) => 15.0 / 15.0,
        (true, false) => 10.0 / 15.0,
        (false, true) => 8.0 / 15.0,
        (false, false) => 0.0,
    }
}

/// Communication score (0-1): identical 10, compatible 7, other 2 (of 10)
#[inline]
pub fn communication_match(mentor: &Profile, mentee: &Profile) -> f64 {
    match (mentor.communication_style, mentee.communication_style) {
        (Some(a), Some(b)) if a == b => 10.0 / 10.0,
        (Some(a), Some(b)) if styles_compatible(a, b) => 7.0 / 10.0,
        (Some(_), Some(_)) => 2.0 / 10.0,
        _ => 0.0,
    }
}

/// Timezone score (0-1): same zone 10, any other zone 5 (of 10)
///
/// Zones are compared by name only; no offset arithmetic.
#[inline]
pub fn timezone_match(mentor: &Profile, mentee: &Profile) -> f64 {
    match (&mentor.time_zone, &mentee.time_zone) {
        (Some(a), Some(b)) if a == b => 10.0 / 10.0,
        (Some(_), Some(_)) => 5.0 / 10.0,
        _ => 0.0,
    }
}

/// Availability score (0-1) from the mentor's capacity status
#[inline]
pub fn availability_match(mentor: &Profile) -> f64 {
    match mentor.capacity.as_ref().map(|c| c.availability_status) {
        Some(AvailabilityStatus::Available) => 5.0 / 5.0,
        Some(AvailabilityStatus::Limited) => 3.0 / 5.0,
        Some(AvailabilityStatus::Full) | None => 0.0,
    }
}

/// Missing values never match, not even each other
#[inline]
fn same_value(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}
