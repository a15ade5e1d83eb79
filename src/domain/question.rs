//! Quiz question bank types
//!
//! The correct-answer shape differs per question type, so it is modeled as a
//! tagged union and matched exhaustively when checking answers. Questions
//! serialize with a `type` tag, which is also the storage format.

use serde::{Deserialize, Serialize};

/// A left/right pair for matching questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub left: String,
    pub right: String,
}

impl Pair {
    pub fn new(left: &str, right: &str) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

/// An item with the category it belongs to (classification questions)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedItem {
    pub item: String,
    pub category: String,
}

impl ClassifiedItem {
    pub fn new(item: &str, category: &str) -> Self {
        Self {
            item: item.to_string(),
            category: category.to_string(),
        }
    }
}

/// Question type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    Completion,
    Matching,
    TrueFalse,
    TextInput,
    Classification,
}

/// Type-specific question payload and correct answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum QuestionBody {
    /// Pick one option; exact match against the answer text
    MultipleChoice { options: Vec<String>, answer: String },
    /// Drag one option into the blank slot; compared trimmed, case-folded
    Completion { options: Vec<String>, answer: String },
    /// Connect every left item to its right counterpart
    Matching { pairs: Vec<Pair> },
    TrueFalse { answer: bool },
    /// Free text; compared trimmed, case-folded
    TextInput { answer: String },
    /// Assign every item to its category
    Classification {
        categories: Vec<String>,
        items: Vec<ClassifiedItem>,
    },
}

impl QuestionBody {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Self::Completion { .. } => QuestionKind::Completion,
            Self::Matching { .. } => QuestionKind::Matching,
            Self::TrueFalse { .. } => QuestionKind::TrueFalse,
            Self::TextInput { .. } => QuestionKind::TextInput,
            Self::Classification { .. } => QuestionKind::Classification,
        }
    }
}

/// A question as stored in the bank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    /// Lesson this question belongs to; None for the standalone trivia bank
    pub lesson_id: Option<String>,
    pub prompt: String,
    #[serde(flatten)]
    pub body: QuestionBody,
}
