use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

use crate::error::MatchingError;

pub type ProfileId = u64;

/// Allowed deviation of the weight sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Which side(s) of a mentorship a user can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
    Both,
}

impl Role {
    pub fn is_mentor(self) -> bool {
        matches!(self, Role::Mentor | Role::Both)
    }

    pub fn is_mentee(self) -> bool {
        matches!(self, Role::Mentee | Role::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Executive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStyle {
    Direct,
    Supportive,
    Structured,
    Flexible,
    Casual,
}

/// Mentor availability, derived from capacity occupancy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Limited,
    Full,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Active,
    OnHold,
    Completed,
    Discontinued,
}

/// A skill from the shared catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// A skill held by a user, with the pivot attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SkillAssignment {
    pub skill: Skill,
    #[validate(range(min = 1, max = 5))]
    pub proficiency: u8,
    #[serde(default)]
    pub is_primary: bool,
}

/// A mentee's learning objective for one skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Goal {
    pub skill: Skill,
    #[validate(range(min = 1, max = 3))]
    pub priority: u8,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub progress_notes: Option<String>,
}

/// Fields a participant may change on a goal; `None` leaves a field as is
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
pub struct GoalUpdate {
    #[serde(default)]
    pub status: Option<GoalStatus>,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub progress_notes: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

impl Goal {
    /// An active goal whose target date has passed
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status == GoalStatus::Active && self.target_date.is_some_and(|date| date < today)
    }
}

/// Mentor slot bookkeeping
///
/// Records without an `availability_status` get one derived from occupancy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CapacityRecord")]
pub struct MentorCapacity {
    pub max_mentees: u32,
    pub current_mentees: u32,
    pub availability_status: AvailabilityStatus,
}

#[derive(Deserialize)]
struct CapacityRecord {
    #[serde(default = "default_max_mentees")]
    max_mentees: u32,
    #[serde(default)]
    current_mentees: u32,
    #[serde(default)]
    availability_status: Option<AvailabilityStatus>,
}

impl From<CapacityRecord> for MentorCapacity {
    fn from(record: CapacityRecord) -> Self {
        match record.availability_status {
            Some(availability_status) => Self {
                max_mentees: record.max_mentees,
                current_mentees: record.current_mentees,
                availability_status,
            },
            None => Self::with_occupancy(record.max_mentees, record.current_mentees),
        }
    }
}

fn default_max_mentees() -> u32 { 2 }

impl Default for MentorCapacity {
    fn default() -> Self {
        Self::new(default_max_mentees())
    }
}

impl MentorCapacity {
    pub fn new(max_mentees: u32) -> Self {
        Self::with_occupancy(max_mentees, 0)
    }

    /// Build a capacity record whose status is derived from occupancy
    pub fn with_occupancy(max_mentees: u32, current_mentees: u32) -> Self {
        let mut capacity = Self {
            max_mentees,
            current_mentees,
            availability_status: AvailabilityStatus::Available,
        };
        capacity.refresh_status();
        capacity
    }

    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.current_mentees < self.max_mentees
    }

    pub fn available_slots(&self) -> u32 {
        self.max_mentees.saturating_sub(self.current_mentees)
    }

    pub fn increment(&mut self) {
        self.current_mentees = self.current_mentees.saturating_add(1);
        self.refresh_status();
    }

    pub fn decrement(&mut self) {
        self.current_mentees = self.current_mentees.saturating_sub(1);
        self.refresh_status();
    }

    /// full at max occupancy, limited from 75%, available below
    fn refresh_status(&mut self) {
        let current = f64::from(self.current_mentees);
        let max = f64::from(self.max_mentees);

        self.availability_status = if self.current_mentees >= self.max_mentees {
            AvailabilityStatus::Full
        } else if current >= max * 0.75 {
            AvailabilityStatus::Limited
        } else {
            AvailabilityStatus::Available
        };
    }
}

/// Read-only snapshot of a user as seen by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub communication_style: Option<CommunicationStyle>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub skills: Vec<SkillAssignment>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub capacity: Option<MentorCapacity>,
}

fn default_true() -> bool { true }

impl Profile {
    pub fn is_mentor(&self) -> bool {
        self.role.is_mentor()
    }

    pub fn is_mentee(&self) -> bool {
        self.role.is_mentee()
    }

    /// Mentors without a capacity record have no free slots
    pub fn has_capacity(&self) -> bool {
        self.capacity.as_ref().is_some_and(MentorCapacity::has_capacity)
    }

    pub fn skill(&self, skill_id: u64) -> Option<&SkillAssignment> {
        self.skills.iter().find(|assignment| assignment.skill.id == skill_id)
    }

    /// Goals ordered by priority, ties kept in declaration order
    pub fn goals_by_priority(&self) -> Vec<&Goal> {
        let mut goals: Vec<&Goal> = self.goals.iter().collect();
        goals.sort_by_key(|goal| goal.priority);
        goals
    }

    /// Validate skill proficiencies and goal priorities
    pub fn check(&self) -> Result<(), MatchingError> {
        let invalid = |source| MatchingError::InvalidProfile {
            profile_id: self.id,
            source,
        };

        for assignment in &self.skills {
            assignment.validate().map_err(invalid)?;
        }
        for goal in &self.goals {
            goal.validate().map_err(invalid)?;
        }

        Ok(())
    }
}

/// A mentorship between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorshipMatch {
    pub mentor_id: ProfileId,
    pub mentee_id: ProfileId,
    pub compatibility_score: f64,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub matched_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl MentorshipMatch {
    pub fn pending(mentor_id: ProfileId, mentee_id: ProfileId, compatibility_score: f64) -> Self {
        Self {
            mentor_id,
            mentee_id,
            compatibility_score,
            status: MatchStatus::Pending,
            matched_at: None,
            completed_at: None,
        }
    }

    pub fn involves(&self, user_id: ProfileId) -> bool {
        self.mentor_id == user_id || self.mentee_id == user_id
    }
}

/// Directional (mentor, mentee) pairs that already have a match
#[derive(Debug, Clone, Default)]
pub struct ExistingMatches {
    pairs: HashSet<(ProfileId, ProfileId)>,
}

impl ExistingMatches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mentor_id: ProfileId, mentee_id: ProfileId) -> bool {
        self.pairs.insert((mentor_id, mentee_id))
    }

    /// Only the exact (mentor, mentee) direction is checked
    #[inline]
    pub fn contains(&self, mentor_id: ProfileId, mentee_id: ProfileId) -> bool {
        self.pairs.contains(&(mentor_id, mentee_id))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> FromIterator<&'a MentorshipMatch> for ExistingMatches {
    fn from_iter<I: IntoIterator<Item = &'a MentorshipMatch>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|m| (m.mentor_id, m.mentee_id))
                .collect(),
        }
    }
}

impl FromIterator<(ProfileId, ProfileId)> for ExistingMatches {
    fn from_iter<I: IntoIterator<Item = (ProfileId, ProfileId)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingWeights {
    pub skills: f64,
    pub experience: f64,
    pub industry: f64,
    pub communication: f64,
    pub timezone: f64,
    pub availability: f64,
}

impl Default for MatchingWeights {
    fn default() -> Self {
        Self {
            skills: 0.40,
            experience: 0.20,
            industry: 0.15,
            communication: 0.10,
            timezone: 0.10,
            availability: 0.05,
        }
    }
}

impl MatchingWeights {
    pub fn sum(&self) -> f64 {
        self.skills
            + self.experience
            + self.industry
            + self.communication
            + self.timezone
            + self.availability
    }

    fn factors(&self) -> [(&'static str, f64); 6] {
        [
            ("skills", self.skills),
            ("experience", self.experience),
            ("industry", self.industry),
            ("communication", self.communication),
            ("timezone", self.timezone),
            ("availability", self.availability),
        ]
    }

    /// Every weight must be finite and non-negative, and the sum within
    /// `WEIGHT_SUM_TOLERANCE` of 1.0
    pub fn validate(&self) -> Result<(), MatchingError> {
        for (factor, value) in self.factors() {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchingError::InvalidWeight { factor, value });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MatchingError::InvalidWeights { sum });
        }

        Ok(())
    }
}
