//! Lessons and per-user completion records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of learnable content, ordered into an unlock chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub description: String,
    pub language: String,
    /// Unique position in the unlock chain
    pub order_index: u32,
    pub xp_reward: u32,
    /// Cosmetic marker icon name
    pub icon: String,
    /// Cosmetic marker color
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// Completion record for one (user, lesson) pair
///
/// Created on the first resolved attempt; once `completed` is set the record
/// is immutable except by an explicit reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub id: String,
    pub user_id: String,
    pub lesson_id: String,
    pub completed: bool,
    /// 0..=3 stars earned on the completing attempt
    pub stars: u8,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Sum stars across completed lessons (profile stats display)
pub fn total_stars(progress: &[LessonProgress]) -> u32 {
    progress
        .iter()
        .filter(|p| p.completed)
        .map(|p| p.stars as u32)
        .sum()
}
