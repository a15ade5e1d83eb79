//! Persistence contract and SQLite implementation
//!
//! The core consumes a narrow CRUD contract ([`ProgressStore`]) and carries
//! no persistence technology itself; [`SqliteStore`] is the bundled
//! implementation backing the CLI (`~/.yatina/yatina.db`).
//!
//! Store calls are best-effort, at-least-once: callers re-fetch the profile
//! after a write before trusting it for further decisions.

mod seed;
mod sqlite;

pub use seed::{demo_profiles, starter_lessons, starter_questions, trivia_questions};
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Lesson, LessonProgress, Profile, QuizQuestion};
use crate::error::StoreError;

/// Partial profile update; unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub xp: Option<u32>,
    pub level: Option<u32>,
    pub lives: Option<u32>,
    pub growth_stage: Option<u32>,
    pub last_growth_visit: Option<DateTime<Utc>>,
}

/// Fields written when upserting a lesson progress record
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressFields {
    pub completed: bool,
    pub stars: u8,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Filter for question bank queries
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    /// Restrict to one lesson's questions; None selects the trivia bank
    pub lesson_id: Option<String>,
    pub limit: Option<usize>,
}

/// Minimal CRUD contract the core expects from its persistence collaborator
#[async_trait]
pub trait ProgressStore: Send + Sync {
    async fn get_profile(&self, user_id: &str) -> Result<Profile, StoreError>;
    async fn create_profile(&self, profile: &Profile) -> Result<(), StoreError>;
    async fn update_profile(&self, user_id: &str, patch: ProfilePatch) -> Result<(), StoreError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, StoreError>;

    /// Lessons ordered by `order_index`
    async fn list_lessons(&self) -> Result<Vec<Lesson>, StoreError>;
    async fn list_progress(&self, user_id: &str) -> Result<Vec<LessonProgress>, StoreError>;
    async fn upsert_progress(
        &self,
        user_id: &str,
        lesson_id: &str,
        fields: ProgressFields,
    ) -> Result<(), StoreError>;

    async fn list_questions(&self, filter: &QuestionFilter) -> Result<Vec<QuizQuestion>, StoreError>;
}
