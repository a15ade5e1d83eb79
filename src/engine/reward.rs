//! Attempt resolution: XP, star and lives deltas
//!
//! The random pieces of the reward flow (star count, success gate) live
//! behind injectable policies so tests can force deterministic outcomes. The
//! engine computes deltas and side effects only; persistence is the caller's
//! responsibility.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::effects::SideEffect;
use crate::domain::{level_for_xp, Lesson, LessonProgress, Profile};
use crate::error::EngineError;
use crate::store::{ProfilePatch, ProgressFields};

/// Result of the upstream outcome gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    Failure,
}

/// Chooses how many stars a successful attempt earns
pub trait StarPolicy: Send {
    fn award(&mut self) -> u8;
}

/// Default reward policy: uniform pick among 1..=3 stars
#[derive(Debug, Default)]
pub struct UniformStars;

impl StarPolicy for UniformStars {
    fn award(&mut self) -> u8 {
        rand::rng().random_range(1..=3)
    }
}

/// Fixed star count, for deterministic callers and tests
#[derive(Debug)]
pub struct FixedStars(pub u8);

impl StarPolicy for FixedStars {
    fn award(&mut self) -> u8 {
        self.0
    }
}

/// Decides whether an attempt counts as success before rewards are resolved
pub trait OutcomePolicy: Send {
    fn resolve(&mut self) -> AttemptOutcome;
}

/// Probabilistic gate; the product default succeeds ~70% of the time
#[derive(Debug, Clone, Copy)]
pub struct ProbabilisticOutcome {
    pub success_rate: f64,
}

impl Default for ProbabilisticOutcome {
    fn default() -> Self {
        Self { success_rate: 0.7 }
    }
}

impl OutcomePolicy for ProbabilisticOutcome {
    fn resolve(&mut self) -> AttemptOutcome {
        if rand::rng().random_bool(self.success_rate.clamp(0.0, 1.0)) {
            AttemptOutcome::Success
        } else {
            AttemptOutcome::Failure
        }
    }
}

/// Forced outcome, for tests
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome(pub AttemptOutcome);

impl OutcomePolicy for FixedOutcome {
    fn resolve(&mut self) -> AttemptOutcome {
        self.0
    }
}

/// Computed deltas for one resolved attempt, plus the writes to persist them
#[derive(Debug)]
pub struct AttemptResolution {
    pub outcome: AttemptOutcome,
    pub xp_delta: u32,
    pub stars_awarded: u8,
    pub lives_delta: i32,
    pub new_level: u32,
    pub new_lives: u32,
    pub effects: Vec<SideEffect>,
}

/// Resolves attempt outcomes into profile/progress deltas
pub struct RewardEngine {
    stars: Box<dyn StarPolicy>,
}

impl Default for RewardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RewardEngine {
    pub fn new() -> Self {
        Self {
            stars: Box::new(UniformStars),
        }
    }

    pub fn with_star_policy(stars: Box<dyn StarPolicy>) -> Self {
        Self { stars }
    }

    /// Resolve an attempt against `lesson`.
    ///
    /// `progress` is the freshly fetched record for this (user, lesson) pair,
    /// if any; callers must not pass cached state here, or a second attempt
    /// racing a slow write could be double-rewarded.
    pub fn resolve_attempt(
        &mut self,
        profile: &Profile,
        lesson: &Lesson,
        progress: Option<&LessonProgress>,
        outcome: AttemptOutcome,
        now: DateTime<Utc>,
    ) -> Result<AttemptResolution, EngineError> {
        if profile.lives == 0 {
            return Err(EngineError::InsufficientLives);
        }
        if progress.is_some_and(|p| p.completed) {
            return Err(EngineError::AlreadyCompleted {
                lesson: lesson.title.clone(),
            });
        }

        match outcome {
            AttemptOutcome::Success => {
                let stars = self.stars.award().clamp(1, 3);
                let new_xp = profile.xp + lesson.xp_reward;
                let new_level = level_for_xp(new_xp);

                let effects = vec![
                    SideEffect::UpdateProfile {
                        user_id: profile.id.clone(),
                        patch: ProfilePatch {
                            xp: Some(new_xp),
                            level: Some(new_level),
                            ..Default::default()
                        },
                    },
                    SideEffect::UpsertProgress {
                        user_id: profile.id.clone(),
                        lesson_id: lesson.id.clone(),
                        fields: ProgressFields {
                            completed: true,
                            stars,
                            completed_at: Some(now),
                        },
                    },
                ];

                Ok(AttemptResolution {
                    outcome,
                    xp_delta: lesson.xp_reward,
                    stars_awarded: stars,
                    lives_delta: 0,
                    new_level,
                    new_lives: profile.lives,
                    effects,
                })
            }
            AttemptOutcome::Failure => {
                let new_lives = profile.lives.saturating_sub(1);
                let effects = vec![SideEffect::UpdateProfile {
                    user_id: profile.id.clone(),
                    patch: ProfilePatch {
                        lives: Some(new_lives),
                        ..Default::default()
                    },
                }];

                Ok(AttemptResolution {
                    outcome,
                    xp_delta: 0,
                    stars_awarded: 0,
                    lives_delta: new_lives as i32 - profile.lives as i32,
                    new_level: profile.level,
                    new_lives,
                    effects,
                })
            }
        }
    }
}
