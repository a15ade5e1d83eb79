//! Core domain types for yatina

mod lesson;
mod profile;
mod question;

pub use lesson::{total_stars, Lesson, LessonProgress};
pub use profile::{clamp_lives, level_for_xp, Profile, MAX_LIVES, XP_PER_LEVEL};
pub use question::{ClassifiedItem, Pair, QuestionBody, QuestionKind, QuizQuestion};
