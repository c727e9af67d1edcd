use chrono::{DateTime, NaiveDate, Utc};
use validator::Validate;

use crate::error::MatchingError;
use crate::models::{Goal, GoalUpdate, MatchStatus, MentorCapacity, MentorshipMatch, ProfileId};

/// Status transitions for a match snapshot
///
/// `capacity` is always the capacity record of the match's mentor. A failed
/// transition leaves both the match and the capacity untouched.
impl MentorshipMatch {
    /// Mentor accepts a pending request and takes up one slot
    pub fn accept(
        &mut self,
        actor: ProfileId,
        capacity: &mut MentorCapacity,
        now: DateTime<Utc>,
    ) -> Result<(), MatchingError> {
        self.ensure_participant(actor)?;
        if actor != self.mentor_id {
            return Err(MatchingError::NotMentor(actor));
        }
        self.ensure_transition(&[MatchStatus::Pending], MatchStatus::Active)?;
        if !capacity.has_capacity() {
            return Err(MatchingError::CapacityExhausted(self.mentor_id));
        }

        self.status = MatchStatus::Active;
        self.matched_at.get_or_insert(now);
        capacity.increment();

        tracing::info!("Match {} -> {} accepted", self.mentor_id, self.mentee_id);
        Ok(())
    }

    /// Either side turns down a pending request
    pub fn decline(&mut self, actor: ProfileId) -> Result<(), MatchingError> {
        self.ensure_participant(actor)?;
        self.ensure_transition(&[MatchStatus::Pending], MatchStatus::Discontinued)?;

        self.status = MatchStatus::Discontinued;
        Ok(())
    }

    pub fn hold(&mut self, actor: ProfileId) -> Result<(), MatchingError> {
        self.ensure_participant(actor)?;
        self.ensure_transition(&[MatchStatus::Active], MatchStatus::OnHold)?;

        self.status = MatchStatus::OnHold;
        Ok(())
    }

    pub fn resume(&mut self, actor: ProfileId) -> Result<(), MatchingError> {
        self.ensure_participant(actor)?;
        self.ensure_transition(&[MatchStatus::OnHold], MatchStatus::Active)?;

        self.status = MatchStatus::Active;
        Ok(())
    }

    /// Finish a running mentorship and free the mentor's slot
    pub fn complete(
        &mut self,
        actor: ProfileId,
        capacity: &mut MentorCapacity,
        now: DateTime<Utc>,
    ) -> Result<(), MatchingError> {
        self.ensure_participant(actor)?;
        self.ensure_transition(
            &[MatchStatus::Active, MatchStatus::OnHold],
            MatchStatus::Completed,
        )?;

        self.status = MatchStatus::Completed;
        self.completed_at = Some(now);
        capacity.decrement();

        tracing::info!("Match {} -> {} completed", self.mentor_id, self.mentee_id);
        Ok(())
    }

    /// End a running mentorship early and free the mentor's slot
    pub fn discontinue(
        &mut self,
        actor: ProfileId,
        capacity: &mut MentorCapacity,
    ) -> Result<(), MatchingError> {
        self.ensure_participant(actor)?;
        self.ensure_transition(
            &[MatchStatus::Active, MatchStatus::OnHold],
            MatchStatus::Discontinued,
        )?;

        self.status = MatchStatus::Discontinued;
        capacity.decrement();
        Ok(())
    }

    fn ensure_participant(&self, actor: ProfileId) -> Result<(), MatchingError> {
        if self.involves(actor) {
            Ok(())
        } else {
            Err(MatchingError::NotParticipant(actor))
        }
    }

    fn ensure_transition(&self, from: &[MatchStatus], to: MatchStatus) -> Result<(), MatchingError> {
        if from.contains(&self.status) {
            Ok(())
        } else {
            Err(MatchingError::InvalidTransition {
                from: self.status,
                to,
            })
        }
    }
}

impl Goal {
    /// Apply a participant's changes to a goal owned by `mentee_id`
    ///
    /// The mentee may update their own goals, and so may a mentor with an
    /// active match to that mentee. A new target date must be after `today`.
    /// A rejected update leaves the goal untouched.
    pub fn update(
        &mut self,
        actor: ProfileId,
        mentee_id: ProfileId,
        matches: &[MentorshipMatch],
        changes: GoalUpdate,
        today: NaiveDate,
    ) -> Result<(), MatchingError> {
        let mentors_mentee = matches.iter().any(|m| {
            m.mentor_id == actor && m.mentee_id == mentee_id && m.status == MatchStatus::Active
        });
        if actor != mentee_id && !mentors_mentee {
            return Err(MatchingError::NotParticipant(actor));
        }

        changes.validate().map_err(MatchingError::InvalidGoalUpdate)?;
        if let Some(target_date) = changes.target_date {
            if target_date <= today {
                return Err(MatchingError::InvalidTargetDate { target_date, today });
            }
        }

        if let Some(status) = changes.status {
            self.status = status;
        }
        if let Some(notes) = changes.progress_notes {
            self.progress_notes = Some(notes);
        }
        if let Some(target_date) = changes.target_date {
            self.target_date = Some(target_date);
        }

        tracing::debug!("Goal for skill {} of mentee {} updated by {}", self.skill.id, mentee_id, actor);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityStatus, GoalStatus, Skill};

    const MENTOR: ProfileId = 1;
    const MENTEE: ProfileId = 2;
    const STRANGER: ProfileId = 3;

    fn pending() -> MentorshipMatch {
        MentorshipMatch::pending(MENTOR, MENTEE, 82.5)
    }

    #[test]
    fn test_full_lifecycle() {
        let mut capacity = MentorCapacity::new(2);
        let mut m = pending();
        let now = Utc::now();

        m.accept(MENTOR, &mut capacity, now).unwrap();
        assert_eq!(m.status, MatchStatus::Active);
        assert_eq!(m.matched_at, Some(now));
        assert_eq!(capacity.current_mentees, 1);

        m.hold(MENTEE).unwrap();
        assert_eq!(m.status, MatchStatus::OnHold);
        m.resume(MENTOR).unwrap();
        assert_eq!(m.status, MatchStatus::Active);

        m.complete(MENTEE, &mut capacity, now).unwrap();
        assert_eq!(m.status, MatchStatus::Completed);
        assert_eq!(m.completed_at, Some(now));
        assert_eq!(capacity.current_mentees, 0);
        assert_eq!(capacity.availability_status, AvailabilityStatus::Available);
    }

    #[test]
    fn test_only_mentor_accepts() {
        let mut capacity = MentorCapacity::new(2);
        let mut m = pending();

        assert!(matches!(
            m.accept(MENTEE, &mut capacity, Utc::now()),
            Err(MatchingError::NotMentor(MENTEE))
        ));
        assert!(matches!(
            m.accept(STRANGER, &mut capacity, Utc::now()),
            Err(MatchingError::NotParticipant(STRANGER))
        ));
        assert_eq!(m.status, MatchStatus::Pending);
    }

    #[test]
    fn test_accept_requires_capacity() {
        let mut capacity = MentorCapacity::with_occupancy(2, 2);
        let mut m = pending();

        assert!(matches!(
            m.accept(MENTOR, &mut capacity, Utc::now()),
            Err(MatchingError::CapacityExhausted(MENTOR))
        ));
        assert_eq!(m.status, MatchStatus::Pending);
        assert_eq!(capacity.current_mentees, 2);
    }

    #[test]
    fn test_decline_pending() {
        let mut m = pending();
        m.decline(MENTEE).unwrap();
        assert_eq!(m.status, MatchStatus::Discontinued);
    }

    #[test]
    fn test_cannot_complete_pending() {
        let mut capacity = MentorCapacity::with_occupancy(2, 1);
        let mut m = pending();

        assert!(matches!(
            m.complete(MENTOR, &mut capacity, Utc::now()),
            Err(MatchingError::InvalidTransition {
                from: MatchStatus::Pending,
                to: MatchStatus::Completed,
            })
        ));
        assert_eq!(capacity.current_mentees, 1);
    }

    #[test]
    fn test_discontinue_frees_slot() {
        let mut capacity = MentorCapacity::new(1);
        let mut m = pending();

        m.accept(MENTOR, &mut capacity, Utc::now()).unwrap();
        assert_eq!(capacity.availability_status, AvailabilityStatus::Full);

        m.discontinue(MENTEE, &mut capacity).unwrap();
        assert_eq!(m.status, MatchStatus::Discontinued);
        assert!(capacity.has_capacity());
    }

    fn goal() -> Goal {
        Goal {
            skill: Skill { id: 7, name: "Rust".to_string(), category: None },
            priority: 1,
            status: GoalStatus::Active,
            description: None,
            target_date: None,
            progress_notes: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()
    }

    fn active() -> MentorshipMatch {
        let mut m = pending();
        m.status = MatchStatus::Active;
        m
    }

    #[test]
    fn test_mentee_updates_own_goal() {
        let mut g = goal();
        let changes = GoalUpdate {
            status: Some(GoalStatus::Completed),
            progress_notes: Some("Shipped the service".to_string()),
            target_date: NaiveDate::from_ymd_opt(2025, 12, 1),
        };

        g.update(MENTEE, MENTEE, &[], changes, today()).unwrap();
        assert_eq!(g.status, GoalStatus::Completed);
        assert_eq!(g.progress_notes.as_deref(), Some("Shipped the service"));
        assert_eq!(g.target_date, NaiveDate::from_ymd_opt(2025, 12, 1));
    }

    #[test]
    fn test_goal_update_by_mentor_needs_active_match() {
        let changes = GoalUpdate {
            progress_notes: Some("Reviewed first PR".to_string()),
            ..GoalUpdate::default()
        };

        let mut g = goal();
        assert!(matches!(
            g.update(MENTOR, MENTEE, &[pending()], changes.clone(), today()),
            Err(MatchingError::NotParticipant(MENTOR))
        ));
        assert!(matches!(
            g.update(STRANGER, MENTEE, &[active()], changes.clone(), today()),
            Err(MatchingError::NotParticipant(STRANGER))
        ));
        assert_eq!(g.progress_notes, None);

        g.update(MENTOR, MENTEE, &[active()], changes, today()).unwrap();
        assert_eq!(g.progress_notes.as_deref(), Some("Reviewed first PR"));
    }

    #[test]
    fn test_goal_target_date_must_be_in_future() {
        let mut g = goal();
        let changes = GoalUpdate {
            status: Some(GoalStatus::Abandoned),
            target_date: Some(today()),
            ..GoalUpdate::default()
        };

        assert!(matches!(
            g.update(MENTEE, MENTEE, &[], changes, today()),
            Err(MatchingError::InvalidTargetDate { .. })
        ));
        assert_eq!(g.status, GoalStatus::Active);
        assert_eq!(g.target_date, None);
    }

    #[test]
    fn test_goal_progress_notes_length_limited() {
        let mut g = goal();
        let changes = GoalUpdate {
            progress_notes: Some("x".repeat(1001)),
            ..GoalUpdate::default()
        };

        assert!(matches!(
            g.update(MENTEE, MENTEE, &[], changes, today()),
            Err(MatchingError::InvalidGoalUpdate(_))
        ));
        assert_eq!(g.progress_notes, None);
    }
}
