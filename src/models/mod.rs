// Model exports
pub mod domain;
pub mod responses;

pub use domain::{
    AvailabilityStatus, CommunicationStyle, ExistingMatches, ExperienceLevel, Goal, GoalStatus,
    GoalUpdate, MatchStatus, MatchingWeights, MentorCapacity, MentorshipMatch, Profile, ProfileId,
    Role, Skill, SkillAssignment, WEIGHT_SUM_TOLERANCE,
};
pub use responses::{RankedCandidate, ScoreBreakdown};
