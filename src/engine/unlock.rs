//! Lesson unlock policy
//!
//! Sequential mode gates each lesson on its predecessor's completion; open
//! mode marks everything accessible (used by exploratory sections). Both
//! behaviors exist in the product, selected by configuration.

use serde::{Deserialize, Serialize};

use crate::domain::{Lesson, LessonProgress};

/// How lesson access is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockMode {
    /// Each lesson requires the previous one to be completed
    #[default]
    Sequential,
    /// Every lesson is accessible
    Open,
}

/// Whether `lesson` may be attempted. Pure function of its inputs.
///
/// In sequential mode the lesson with the lowest `order_index` is always
/// unlocked; any other lesson is unlocked iff the lesson at `order_index - 1`
/// exists and has a completed progress record. A missing or incomplete
/// predecessor means locked.
pub fn is_unlocked(
    mode: UnlockMode,
    lesson: &Lesson,
    lessons: &[Lesson],
    progress: &[LessonProgress],
) -> bool {
    if mode == UnlockMode::Open {
        return true;
    }

    let first = lessons.iter().map(|l| l.order_index).min();
    if Some(lesson.order_index) == first {
        return true;
    }

    let Some(previous) = lessons
        .iter()
        .find(|l| l.order_index + 1 == lesson.order_index)
    else {
        return false;
    };

    progress
        .iter()
        .any(|p| p.lesson_id == previous.id && p.completed)
}
