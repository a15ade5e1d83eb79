//! Collectible achievement artwork
//!
//! Each marka card is an image split into parts; a part is revealed once its
//! gating lesson is completed. The first part of the starter card is granted
//! from the beginning. Markas without artwork yet are listed as placeholders.

use crate::domain::{Lesson, LessonProgress};

/// One revealable slice of a collectible image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectiblePart {
    pub id: &'static str,
    /// Title of the lesson that reveals this part; None is revealed from the
    /// start
    pub unlock_lesson: Option<&'static str>,
}

/// A marka collectible card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collectible {
    pub name: &'static str,
    pub parts: &'static [CollectiblePart],
    /// Placeholder cards are shown locked until their artwork ships
    pub available: bool,
}

/// The collectible catalog; only the starter card is collectable so far
pub const COLLECTIBLES: [Collectible; 6] = [
    Collectible {
        name: "Desaguadero Marka",
        available: true,
        parts: &[
            CollectiblePart {
                id: "parte1",
                unlock_lesson: None,
            },
            CollectiblePart {
                id: "parte2",
                unlock_lesson: Some("Colores"),
            },
            CollectiblePart {
                id: "parte3",
                unlock_lesson: Some("Animales"),
            },
        ],
    },
    Collectible {
        name: "Yunguyo Marka",
        available: false,
        parts: &[],
    },
    Collectible {
        name: "Juli Marka",
        available: false,
        parts: &[],
    },
    Collectible {
        name: "Ilave Marka",
        available: false,
        parts: &[],
    },
    Collectible {
        name: "Conima Marka",
        available: false,
        parts: &[],
    },
    Collectible {
        name: "Chucuito Marka",
        available: false,
        parts: &[],
    },
];

/// Whether a part is revealed. Pure function of the catalog and the user's
/// progress records; a gating lesson that is missing from the catalog keeps
/// the part locked.
pub fn part_unlocked(
    part: &CollectiblePart,
    lessons: &[Lesson],
    progress: &[LessonProgress],
) -> bool {
    let Some(title) = part.unlock_lesson else {
        return true;
    };
    let Some(lesson) = lessons.iter().find(|l| l.title == title) else {
        return false;
    };
    progress
        .iter()
        .any(|p| p.lesson_id == lesson.id && p.completed)
}

/// (revealed, total) parts for one collectible
pub fn unlocked_parts(
    collectible: &Collectible,
    lessons: &[Lesson],
    progress: &[LessonProgress],
) -> (usize, usize) {
    let revealed = collectible
        .parts
        .iter()
        .filter(|part| part_unlocked(part, lessons, progress))
        .count();
    (revealed, collectible.parts.len())
}
