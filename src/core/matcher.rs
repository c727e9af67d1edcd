use parking_lot::RwLock;
use rayon::prelude::*;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::MatchingError;
use crate::models::{
    ExistingMatches, MatchingWeights, MentorshipMatch, Profile, RankedCandidate, Role,
    ScoreBreakdown,
};
use crate::core::{
    filters::{is_eligible_mentee, is_eligible_mentor},
    reasons::reasons_from_breakdown,
    scoring::calculate_breakdown,
};

/// Shortlist parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingOptions {
    /// Candidates scoring below this are dropped
    pub min_score: f64,
    pub shortlist_size: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            min_score: 60.0,
            shortlist_size: 3,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Seeking {
    Mentors,
    Mentees,
}

/// Compatibility scoring and candidate ranking
///
/// The weight set is an immutable snapshot behind a lock; updates swap the
/// whole snapshot, so readers always see a validated set. Clones share the
/// same weights.
///
/// # Ranking Stages
/// 1. Role dispatch (mentee path wins for users with both roles)
/// 2. Eligibility filtering (active, role, capacity, existing match)
/// 3. Parallel scoring with one weight snapshot
/// 4. Threshold, stable sort by score, truncate
#[derive(Debug, Clone)]
pub struct CompatibilityEngine {
    weights: Arc<RwLock<Arc<MatchingWeights>>>,
    options: RankingOptions,
}

impl CompatibilityEngine {
    pub fn new(weights: MatchingWeights) -> Result<Self, MatchingError> {
        weights.validate()?;

        Ok(Self {
            weights: Arc::new(RwLock::new(Arc::new(weights))),
            options: RankingOptions::default(),
        })
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: Arc::new(RwLock::new(Arc::new(MatchingWeights::default()))),
            options: RankingOptions::default(),
        }
    }

    /// Build an engine from loaded settings, validating weights and ranking options
    pub fn from_settings(settings: &Settings) -> Result<Self, MatchingError> {
        settings.matching.check()?;

        let engine = Self::new(settings.scoring.weights.clone().into())?
            .with_options(settings.matching.ranking_options());

        tracing::info!(
            "Engine initialized with weights: {:?}, options: {:?}",
            engine.weights(),
            engine.options
        );

        Ok(engine)
    }

    pub fn with_options(mut self, options: RankingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> RankingOptions {
        self.options
    }

    /// Current weight snapshot
    pub fn weights(&self) -> Arc<MatchingWeights> {
        Arc::clone(&self.weights.read())
    }

    /// Replace the weights
    ///
    /// Invalid sets are rejected and the previous weights stay in effect.
    pub fn set_weights(&self, weights: MatchingWeights) -> Result<(), MatchingError> {
        if let Err(e) = weights.validate() {
            tracing::warn!("Rejected weight update {:?}: {}", weights, e);
            return Err(e);
        }

        *self.weights.write() = Arc::new(weights);
        tracing::info!("Scoring weights updated: {:?}", weights);

        Ok(())
    }

    /// Compatibility score (0-100) for a mentor/mentee pair
    pub fn score(&self, mentor: &Profile, mentee: &Profile) -> f64 {
        self.breakdown(mentor, mentee).weighted_total(&self.weights())
    }

    pub fn breakdown(&self, mentor: &Profile, mentee: &Profile) -> ScoreBreakdown {
        calculate_breakdown(mentor, mentee)
    }

    pub fn reasons(&self, mentor: &Profile, mentee: &Profile) -> Vec<String> {
        reasons_from_breakdown(&self.breakdown(mentor, mentee))
    }

    /// Shortlist the best candidates for `user` from `pool`
    ///
    /// # Arguments
    /// * `user` - The user asking for matches
    /// * `pool` - Candidate profiles, in the host's preferred order
    /// * `existing` - Pairs that already have a match
    ///
    /// # Returns
    /// At most `shortlist_size` candidates scoring at least `min_score`,
    /// best first. Ties keep their pool order.
    pub fn rank(
        &self,
        user: &Profile,
        pool: &[Profile],
        existing: &ExistingMatches,
    ) -> Vec<RankedCandidate> {
        match user.role {
            Role::Mentee | Role::Both => self.shortlist(user, pool, existing, Seeking::Mentors),
            Role::Mentor => {
                if !user.has_capacity() {
                    tracing::debug!("Mentor {} has no free slots, skipping ranking", user.id);
                    return Vec::new();
                }
                self.shortlist(user, pool, existing, Seeking::Mentees)
            }
        }
    }

    fn shortlist(
        &self,
        user: &Profile,
        pool: &[Profile],
        existing: &ExistingMatches,
        seeking: Seeking,
    ) -> Vec<RankedCandidate> {
        // One snapshot for the whole pool
        let weights = self.weights();
        let min_score = self.options.min_score;

        let mut ranked: Vec<RankedCandidate> = pool
            .par_iter()
            .filter(|candidate| {
                let eligible = match seeking {
                    Seeking::Mentors => is_eligible_mentor(candidate, user, existing),
                    Seeking::Mentees => is_eligible_mentee(candidate, user, existing),
                };
                if !eligible {
                    tracing::trace!("Candidate {} is not eligible for user {}", candidate.id, user.id);
                }
                eligible
            })
            .filter_map(|candidate| {
                let (mentor, mentee) = match seeking {
                    Seeking::Mentors => (candidate, user),
                    Seeking::Mentees => (user, candidate),
                };

                let breakdown = calculate_breakdown(mentor, mentee);
                let score = breakdown.weighted_total(&weights);

                if score >= min_score {
                    Some(RankedCandidate {
                        candidate: candidate.clone(),
                        score,
                        reasons: reasons_from_breakdown(&breakdown),
                    })
                } else {
                    tracing::trace!("Candidate {} scored {:.1} for user {}", candidate.id, score, user.id);
                    None
                }
            })
            .collect();

        tracing::debug!(
            "Ranked {} of {} candidates for user {} ({:?})",
            ranked.len(),
            pool.len(),
            user.id,
            seeking
        );

        // Stable: equal scores keep pool order
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked.truncate(self.options.shortlist_size);
        ranked
    }

    /// Build a pending match request from `requester` to `target`
    ///
    /// A requester who can be a mentee always requests a mentor.
    pub fn request_match(
        &self,
        requester: &Profile,
        target: &Profile,
        existing: &ExistingMatches,
    ) -> Result<MentorshipMatch, MatchingError> {
        if requester.id == target.id {
            return Err(MatchingError::SelfMatch(requester.id));
        }

        let (mentor, mentee) = match requester.role {
            Role::Mentee | Role::Both => {
                if !target.is_mentor() {
                    return Err(MatchingError::RoleMismatch(
                        "You can only request mentors.".to_string(),
                    ));
                }
                (target, requester)
            }
            Role::Mentor => {
                if !target.is_mentee() {
                    return Err(MatchingError::RoleMismatch(
                        "You can only request mentees.".to_string(),
                    ));
                }
                (requester, target)
            }
        };

        if existing.contains(mentor.id, mentee.id) {
            return Err(MatchingError::AlreadyMatched {
                mentor_id: mentor.id,
                mentee_id: mentee.id,
            });
        }

        let score = self.score(mentor, mentee);
        tracing::info!(
            "Match requested: mentor {} / mentee {} (score {:.1})",
            mentor.id,
            mentee.id,
            score
        );

        Ok(MentorshipMatch::pending(mentor.id, mentee.id, score))
    }
}

impl Default for CompatibilityEngine {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CommunicationStyle, ExperienceLevel, Goal, GoalStatus, MentorCapacity, Skill,
        SkillAssignment,
    };

    fn backend_skill() -> Skill {
        Skill {
            id: 1,
            name: "Rust".to_string(),
            category: Some("Backend Development".to_string()),
        }
    }

    fn skilled(mut profile: Profile) -> Profile {
        profile.skills.push(SkillAssignment {
            skill: backend_skill(),
            proficiency: 4,
            is_primary: true,
        });
        profile
    }

    fn create_candidate(id: u64, role: Role, industry: &str, style: CommunicationStyle) -> Profile {
        Profile {
            id,
            name: format!("User {}", id),
            role,
            experience_level: Some(ExperienceLevel::Mid),
            industry: Some(industry.to_string()),
            function: Some("Engineering".to_string()),
            communication_style: Some(style),
            time_zone: Some("Africa/Lagos".to_string()),
            is_active: true,
            skills: vec![],
            goals: vec![],
            capacity: role.is_mentor().then(|| MentorCapacity::new(2)),
        }
    }

    fn create_mentee() -> Profile {
        let mut mentee = create_candidate(100, Role::Mentee, "Technology", CommunicationStyle::Direct);
        mentee.experience_level = Some(ExperienceLevel::Junior);
        mentee.goals.push(Goal {
            skill: backend_skill(),
            priority: 1,
            status: GoalStatus::Active,
            description: None,
            target_date: None,
            progress_notes: None,
        });
        mentee
    }

    #[test]
    fn test_rank_basic() {
        let engine = CompatibilityEngine::with_default_weights();
        let mentee = create_mentee();

        let candidates = vec![
            skilled(create_candidate(1, Role::Mentor, "Technology", CommunicationStyle::Direct)), // Strong
            create_candidate(2, Role::Mentor, "Finance", CommunicationStyle::Casual),              // Weak
            skilled(create_candidate(3, Role::Mentee, "Technology", CommunicationStyle::Direct)), // Wrong role
        ];

        let result = engine.rank(&mentee, &candidates, &ExistingMatches::new());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].candidate.id, 1);
    }

    #[test]
    fn test_respects_shortlist_size() {
        let engine = CompatibilityEngine::with_default_weights();
        let mentee = create_mentee();

        let candidates: Vec<Profile> = (0..20)
            .map(|i| skilled(create_candidate(i, Role::Mentor, "Technology", CommunicationStyle::Direct)))
            .collect();

        let result = engine.rank(&mentee, &candidates, &ExistingMatches::new());

        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|r| r.score >= 60.0));
        // all tied, so pool order is kept
        let ids: Vec<u64> = result.iter().map(|r| r.candidate.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_custom_options() {
        let engine = CompatibilityEngine::with_default_weights().with_options(RankingOptions {
            min_score: 0.0,
            shortlist_size: 5,
        });
        let mentee = create_mentee();

        let candidates: Vec<Profile> = (0..8)
            .map(|i| create_candidate(i, Role::Mentor, "Finance", CommunicationStyle::Casual))
            .collect();

        assert_eq!(engine.rank(&mentee, &candidates, &ExistingMatches::new()).len(), 5);
    }

    #[test]
    fn test_set_weights_keeps_previous_on_error() {
        let engine = CompatibilityEngine::with_default_weights();
        let bad = MatchingWeights {
            skills: 0.30,
            ..MatchingWeights::default()
        };

        let err = engine.set_weights(bad).unwrap_err();
        assert!(err.is_configuration_error());
        assert_eq!(*engine.weights(), MatchingWeights::default());
    }

    #[test]
    fn test_clones_share_weights() {
        let engine = CompatibilityEngine::with_default_weights();
        let clone = engine.clone();

        let weights = MatchingWeights {
            skills: 0.20,
            experience: 0.20,
            industry: 0.20,
            communication: 0.20,
            timezone: 0.10,
            availability: 0.10,
        };
        engine.set_weights(weights).unwrap();

        assert_eq!(*clone.weights(), weights);
    }

    #[test]
    fn test_request_match_direction() {
        let engine = CompatibilityEngine::with_default_weights();
        let mentee = create_mentee();
        let mentor = create_candidate(1, Role::Mentor, "Technology", CommunicationStyle::Direct);

        let from_mentee = engine.request_match(&mentee, &mentor, &ExistingMatches::new()).unwrap();
        assert_eq!((from_mentee.mentor_id, from_mentee.mentee_id), (1, 100));

        let from_mentor = engine.request_match(&mentor, &mentee, &ExistingMatches::new()).unwrap();
        assert_eq!((from_mentor.mentor_id, from_mentor.mentee_id), (1, 100));
        assert_eq!(from_mentor.compatibility_score, engine.score(&mentor, &mentee));
    }

    #[test]
    fn test_request_match_rejections() {
        let engine = CompatibilityEngine::with_default_weights();
        let mentee = create_mentee();
        let other_mentee = create_candidate(2, Role::Mentee, "Technology", CommunicationStyle::Direct);
        let mentor = create_candidate(1, Role::Mentor, "Technology", CommunicationStyle::Direct);
        let existing: ExistingMatches = [(1, 100)].into_iter().collect();

        assert!(matches!(
            engine.request_match(&mentee, &other_mentee, &ExistingMatches::new()),
            Err(MatchingError::RoleMismatch(_))
        ));
        assert!(matches!(
            engine.request_match(&mentee, &mentor, &existing),
            Err(MatchingError::AlreadyMatched { mentor_id: 1, mentee_id: 100 })
        ));
        assert!(matches!(
            engine.request_match(&mentee, &mentee, &ExistingMatches::new()),
            Err(MatchingError::SelfMatch(100))
        ));
    }

    #[derive(Default)]
    struct MessageVisitor(String);

    impl tracing::field::Visit for MessageVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = format!("{:?}", value);
            }
        }
    }

    /// Collects TRACE messages from every thread, rayon workers included
    struct TraceRecorder(Arc<parking_lot::Mutex<Vec<String>>>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for TraceRecorder {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::TRACE {
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                self.0.lock().push(visitor.0);
            }
        }
    }

    #[test]
    fn test_skipped_candidates_are_traced() {
        use tracing_subscriber::layer::SubscriberExt;

        let messages = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(TraceRecorder(Arc::clone(&messages)));
        tracing::subscriber::set_global_default(subscriber).unwrap();

        let engine = CompatibilityEngine::with_default_weights();
        let mut mentee = create_mentee();
        mentee.id = 9001;

        let mut full = skilled(create_candidate(1, Role::Mentor, "Technology", CommunicationStyle::Direct));
        full.capacity = Some(MentorCapacity::with_occupancy(2, 2));
        let mut inactive = skilled(create_candidate(2, Role::Mentor, "Technology", CommunicationStyle::Direct));
        inactive.is_active = false;
        let weak = create_candidate(3, Role::Mentor, "Finance", CommunicationStyle::Casual);

        let result = engine.rank(&mentee, &[full, inactive, weak], &ExistingMatches::new());
        assert!(result.is_empty());

        let recorded = messages.lock();
        let skipped: Vec<&String> = recorded.iter().filter(|m| m.contains("user 9001")).collect();
        assert_eq!(skipped.len(), 3, "{:?}", skipped);
        assert!(skipped.iter().any(|m| m.contains("Candidate 1 is not eligible")));
        assert!(skipped.iter().any(|m| m.contains("Candidate 2 is not eligible")));
        assert!(skipped.iter().any(|m| m.contains("Candidate 3 scored")));
    }
}
