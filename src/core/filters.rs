use crate::models::{ExistingMatches, Profile};

/// Check if `candidate` can be offered as a mentor to `mentee`
///
/// The candidate must be an active mentor with a free slot and no existing
/// match in the (candidate, mentee) direction.
#[inline]
pub fn is_eligible_mentor(
    candidate: &Profile,
    mentee: &Profile,
    existing: &ExistingMatches,
) -> bool {
    // Skip self, inactive users and non-mentors
    if candidate.id == mentee.id || !candidate.is_active || !candidate.is_mentor() {
        return false;
    }

    if !candidate.has_capacity() {
        return false;
    }

    !existing.contains(candidate.id, mentee.id)
}

/// Check if `candidate` can be offered as a mentee to `mentor`
///
/// Capacity is the mentor's concern and is checked once per ranking, not
/// per candidate.
#[inline]
pub fn is_eligible_mentee(
    candidate: &Profile,
    mentor: &Profile,
    existing: &ExistingMatches,
) -> bool {
    if candidate.id == mentor.id || !candidate.is_active || !candidate.is_mentee() {
        return false;
    }

    !existing.contains(mentor.id, candidate.id)
}
