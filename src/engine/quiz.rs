//! Quiz session state machine
//!
//! Each question moves through `Answering -> Checked`, then either the next
//! question or `Completed`. Answer checking is exhaustive over the question
//! body variants. Wrong answers in lesson mode cost a life (emitted as a
//! side effect, clamped at zero); recovery mode instead restores a life per
//! correct answer, capped at the maximum.
//!
//! The session is transient and owned by the caller; abandoning it discards
//! all state and persists nothing.

use std::collections::BTreeMap;

use crate::domain::{Pair, QuestionBody, QuestionKind, QuizQuestion, MAX_LIVES};
use crate::engine::effects::SideEffect;
use crate::error::EngineError;
use crate::store::ProfilePatch;

/// Candidate answer for the current question, shaped per question type
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerInput {
    /// Selected option text (multiple-choice)
    Choice(String),
    /// True/false selection
    Bool(bool),
    /// Typed free text
    Text(String),
    /// Option dropped into the single blank slot (completion)
    Slot(String),
    /// Submitted left-right connections (matching)
    Connections(Vec<Pair>),
    /// Item -> category assignments (classification)
    Assignments(BTreeMap<String, String>),
}

impl AnswerInput {
    fn fits(&self, kind: QuestionKind) -> bool {
        matches!(
            (self, kind),
            (Self::Choice(_), QuestionKind::MultipleChoice)
                | (Self::Bool(_), QuestionKind::TrueFalse)
                | (Self::Text(_), QuestionKind::TextInput)
                | (Self::Slot(_), QuestionKind::Completion)
                | (Self::Connections(_), QuestionKind::Matching)
                | (Self::Assignments(_), QuestionKind::Classification)
        )
    }
}

/// Where the session currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Answering,
    Checked { correct: bool },
    Completed,
}

/// What a session does with lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizMode {
    /// Wrong answers deduct a life
    #[default]
    Lesson,
    /// Correct answers restore a life (cultural trivia)
    Recovery,
}

/// Final numbers exposed for display/share
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSummary {
    pub score: u32,
    pub total: u32,
    /// round(score / total * 100)
    pub percentage: u32,
    pub lives_recovered: u32,
}

/// Result of checking the current answer
#[derive(Debug)]
pub struct CheckResult {
    pub correct: bool,
    pub effects: Vec<SideEffect>,
}

/// Result of advancing past a checked question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    /// Now answering the question at this index
    Next(usize),
    Completed(QuizSummary),
}

/// An in-flight quiz for one user
#[derive(Debug)]
pub struct QuizSession {
    user_id: String,
    questions: Vec<QuizQuestion>,
    mode: QuizMode,
    index: usize,
    score: u32,
    /// Local lives snapshot; persisted lives follow via side effects
    lives: u32,
    lives_recovered: u32,
    draft: Option<AnswerInput>,
    phase: Phase,
}

impl QuizSession {
    /// Start a lesson quiz with the user's current lives snapshot
    pub fn new(
        user_id: &str,
        questions: Vec<QuizQuestion>,
        lives: u32,
    ) -> Result<Self, EngineError> {
        Self::with_mode(user_id, questions, lives, QuizMode::Lesson)
    }

    /// Start a lives-recovery trivia session
    pub fn recovery(
        user_id: &str,
        questions: Vec<QuizQuestion>,
        lives: u32,
    ) -> Result<Self, EngineError> {
        Self::with_mode(user_id, questions, lives, QuizMode::Recovery)
    }

    fn with_mode(
        user_id: &str,
        questions: Vec<QuizQuestion>,
        lives: u32,
        mode: QuizMode,
    ) -> Result<Self, EngineError> {
        if questions.is_empty() {
            return Err(EngineError::InvalidAnswerState(
                "a session needs at least one question".to_string(),
            ));
        }
        Ok(Self {
            user_id: user_id.to_string(),
            questions,
            mode,
            index: 0,
            score: 0,
            lives: lives.min(MAX_LIVES),
            lives_recovered: 0,
            draft: None,
            phase: Phase::Answering,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.phase {
            Phase::Completed => None,
            _ => self.questions.get(self.index),
        }
    }

    /// Store the candidate answer for the current question. Does not yet
    /// transition state; rejects inputs whose shape does not fit the
    /// question type, and any call outside the Answering phase.
    pub fn submit_answer(&mut self, input: AnswerInput) -> Result<(), EngineError> {
        if self.phase != Phase::Answering {
            return Err(EngineError::InvalidAnswerState(
                "answer already checked".to_string(),
            ));
        }
        let question = &self.questions[self.index];
        if !input.fits(question.body.kind()) {
            return Err(EngineError::InvalidAnswerState(format!(
                "input shape does not fit a {:?} question",
                question.body.kind()
            )));
        }
        self.draft = Some(input);
        Ok(())
    }

    /// Whether checking is allowed right now (the UI disables the button
    /// otherwise). Free-text questions may be checked empty; every other
    /// type needs a non-empty submission.
    pub fn can_check(&self) -> bool {
        if self.phase != Phase::Answering {
            return false;
        }
        let question = &self.questions[self.index];
        match (&question.body, self.draft.as_ref()) {
            (QuestionBody::TextInput { .. }, _) => true,
            (_, None) => false,
            (QuestionBody::Matching { .. }, Some(AnswerInput::Connections(c))) => !c.is_empty(),
            (QuestionBody::Classification { .. }, Some(AnswerInput::Assignments(a))) => {
                !a.is_empty()
            }
            (_, Some(_)) => true,
        }
    }

    /// Transition Answering -> Checked, scoring the draft answer.
    ///
    /// Incorrect answers in lesson mode emit a life-deduction effect while
    /// lives remain; correct answers in recovery mode emit a restoration
    /// effect below the cap.
    pub fn check_answer(&mut self) -> Result<CheckResult, EngineError> {
        if self.phase != Phase::Answering {
            return Err(EngineError::InvalidAnswerState(
                "not in the answering phase".to_string(),
            ));
        }
        if !self.can_check() {
            return Err(EngineError::InvalidAnswerState(
                "no answer submitted yet".to_string(),
            ));
        }

        let question = &self.questions[self.index];
        let correct = answer_is_correct(&question.body, self.draft.as_ref());

        let mut effects = Vec::new();
        if correct {
            self.score += 1;
            if self.mode == QuizMode::Recovery && self.lives < MAX_LIVES {
                self.lives += 1;
                self.lives_recovered += 1;
                effects.push(self.lives_patch());
            }
        } else if self.mode == QuizMode::Lesson && self.lives > 0 {
            self.lives -= 1;
            effects.push(self.lives_patch());
        }

        self.phase = Phase::Checked { correct };
        Ok(CheckResult { correct, effects })
    }

    /// From Checked: move to the next question (clearing all transient
    /// per-question state) or complete the session on the last one.
    pub fn advance(&mut self) -> Result<Advanced, EngineError> {
        let Phase::Checked { .. } = self.phase else {
            return Err(EngineError::InvalidAnswerState(
                "current answer has not been checked".to_string(),
            ));
        };

        self.draft = None;
        if self.index + 1 >= self.questions.len() {
            self.phase = Phase::Completed;
            Ok(Advanced::Completed(self.summary()))
        } else {
            self.index += 1;
            self.phase = Phase::Answering;
            Ok(Advanced::Next(self.index))
        }
    }

    pub fn summary(&self) -> QuizSummary {
        let total = self.questions.len() as u32;
        QuizSummary {
            score: self.score,
            total,
            percentage: ((self.score as f64 / total as f64) * 100.0).round() as u32,
            lives_recovered: self.lives_recovered,
        }
    }

    fn lives_patch(&self) -> SideEffect {
        SideEffect::UpdateProfile {
            user_id: self.user_id.clone(),
            patch: ProfilePatch {
                lives: Some(self.lives),
                ..Default::default()
            },
        }
    }
}

/// Per-type answer validation; exhaustive over the body variants
fn answer_is_correct(body: &QuestionBody, draft: Option<&AnswerInput>) -> bool {
    match (body, draft) {
        (QuestionBody::MultipleChoice { answer, .. }, Some(AnswerInput::Choice(candidate))) => {
            candidate == answer
        }
        (QuestionBody::TrueFalse { answer }, Some(AnswerInput::Bool(candidate))) => {
            candidate == answer
        }
        (QuestionBody::TextInput { answer }, Some(AnswerInput::Text(candidate))) => {
            folded(candidate) == folded(answer)
        }
        // Unanswered free text counts as an empty, wrong answer
        (QuestionBody::TextInput { .. }, None) => false,
        (QuestionBody::Completion { answer, .. }, Some(AnswerInput::Slot(candidate))) => {
            folded(candidate) == folded(answer)
        }
        (QuestionBody::Matching { pairs }, Some(AnswerInput::Connections(connections))) => {
            // Every required pair connected, and nothing extra
            pairs
                .iter()
                .all(|pair| connections.iter().any(|c| c == pair))
                && connections.len() == pairs.len()
        }
        (
            QuestionBody::Classification { items, .. },
            Some(AnswerInput::Assignments(assignments)),
        ) => {
            items
                .iter()
                .all(|item| assignments.get(&item.item) == Some(&item.category))
                && assignments.len() == items.len()
        }
        _ => false,
    }
}

fn folded(s: &str) -> String {
    s.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClassifiedItem;

    fn question(id: &str, body: QuestionBody) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            lesson_id: Some("lesson-1".to_string()),
            prompt: id.to_string(),
            body,
        }
    }

    fn choice_question(id: &str, answer: &str) -> QuizQuestion {
        question(
            id,
            QuestionBody::MultipleChoice {
                options: vec![answer.to_string(), "otra".to_string()],
                answer: answer.to_string(),
            },
        )
    }

    #[test]
    fn test_empty_bank_is_rejected() {
        assert!(QuizSession::new("u1", Vec::new(), 3).is_err());
    }

    #[test]
    fn test_check_before_submit_is_blocked() {
        let mut session = QuizSession::new("u1", vec![choice_question("q1", "Kamisaraki")], 3).unwrap();
        assert!(!session.can_check());
        assert!(matches!(
            session.check_answer(),
            Err(EngineError::InvalidAnswerState(_))
        ));
    }

    #[test]
    fn test_mismatched_input_shape_is_rejected() {
        let mut session = QuizSession::new("u1", vec![choice_question("q1", "Kamisaraki")], 3).unwrap();
        assert!(session.submit_answer(AnswerInput::Bool(true)).is_err());
    }

    #[test]
    fn test_text_input_folds_case_and_whitespace() {
        let mut session = QuizSession::new(
            "u1",
            vec![question(
                "q1",
                QuestionBody::TextInput {
                    answer: "Waliki".to_string(),
                },
            )],
            3,
        )
        .unwrap();
        session
            .submit_answer(AnswerInput::Text("  waLIKI ".to_string()))
            .unwrap();
        assert!(session.check_answer().unwrap().correct);
    }

    #[test]
    fn test_unanswered_text_input_checks_as_wrong() {
        let mut session = QuizSession::new(
            "u1",
            vec![question(
                "q1",
                QuestionBody::TextInput {
                    answer: "Waliki".to_string(),
                },
            )],
            3,
        )
        .unwrap();
        assert!(session.can_check());
        let result = session.check_answer().unwrap();
        assert!(!result.correct);
    }

    #[test]
    fn test_matching_requires_exact_connection_count() {
        let pairs = vec![
            Pair::new("A", "1"),
            Pair::new("B", "2"),
            Pair::new("C", "3"),
        ];
        let mut session = QuizSession::new(
            "u1",
            vec![question("q1", QuestionBody::Matching { pairs })],
            3,
        )
        .unwrap();

        // Individually correct but one connection missing
        session
            .submit_answer(AnswerInput::Connections(vec![
                Pair::new("A", "1"),
                Pair::new("B", "2"),
            ]))
            .unwrap();
        assert!(!session.check_answer().unwrap().correct);
    }

    #[test]
    fn test_matching_empty_connections_block_check() {
        let mut session = QuizSession::new(
            "u1",
            vec![question(
                "q1",
                QuestionBody::Matching {
                    pairs: vec![Pair::new("A", "1")],
                },
            )],
            3,
        )
        .unwrap();
        session
            .submit_answer(AnswerInput::Connections(Vec::new()))
            .unwrap();
        assert!(!session.can_check());
        assert!(session.check_answer().is_err());
    }

    #[test]
    fn test_classification_requires_every_item_assigned() {
        let items = vec![
            ClassifiedItem::new("Kamisaraki", "Saludo"),
            ClassifiedItem::new("Aski urukipana", "Saludo"),
            ClassifiedItem::new("Jikisiñkama", "Despedida"),
            ClassifiedItem::new("Qharürkama", "Despedida"),
        ];
        let body = QuestionBody::Classification {
            categories: vec!["Saludo".to_string(), "Despedida".to_string()],
            items: items.clone(),
        };

        let mut session = QuizSession::new("u1", vec![question("q1", body.clone())], 3).unwrap();
        let full: BTreeMap<String, String> = items
            .iter()
            .map(|i| (i.item.clone(), i.category.clone()))
            .collect();
        session
            .submit_answer(AnswerInput::Assignments(full.clone()))
            .unwrap();
        assert!(session.check_answer().unwrap().correct);

        // Leaving one unassigned fails
        let mut partial = full;
        partial.remove("Qharürkama");
        let mut session = QuizSession::new("u1", vec![question("q1", body)], 3).unwrap();
        session
            .submit_answer(AnswerInput::Assignments(partial))
            .unwrap();
        assert!(!session.check_answer().unwrap().correct);
    }

    #[test]
    fn test_wrong_answer_deducts_life_clamped_at_zero() {
        let mut session = QuizSession::new(
            "u1",
            vec![choice_question("q1", "si"), choice_question("q2", "si")],
            1,
        )
        .unwrap();

        session
            .submit_answer(AnswerInput::Choice("no".to_string()))
            .unwrap();
        let result = session.check_answer().unwrap();
        assert!(!result.correct);
        assert_eq!(session.lives(), 0);
        assert_eq!(result.effects.len(), 1);

        // Already at zero: no further deduction effect
        session.advance().unwrap();
        session
            .submit_answer(AnswerInput::Choice("no".to_string()))
            .unwrap();
        let result = session.check_answer().unwrap();
        assert!(result.effects.is_empty());
        assert_eq!(session.lives(), 0);
    }

    #[test]
    fn test_recovery_mode_restores_lives_up_to_cap() {
        let mut session = QuizSession::recovery(
            "u1",
            vec![choice_question("q1", "si"), choice_question("q2", "si")],
            MAX_LIVES - 1,
        )
        .unwrap();

        session
            .submit_answer(AnswerInput::Choice("si".to_string()))
            .unwrap();
        let result = session.check_answer().unwrap();
        assert!(result.correct);
        assert_eq!(session.lives(), MAX_LIVES);
        assert_eq!(result.effects.len(), 1);

        // At the cap: correct answers no longer restore
        session.advance().unwrap();
        session
            .submit_answer(AnswerInput::Choice("si".to_string()))
            .unwrap();
        let result = session.check_answer().unwrap();
        assert!(result.correct);
        assert!(result.effects.is_empty());
        assert_eq!(session.summary().lives_recovered, 1);
    }

    #[test]
    fn test_advance_clears_transient_state_and_completes() {
        let mut session = QuizSession::new(
            "u1",
            vec![choice_question("q1", "si"), choice_question("q2", "si")],
            3,
        )
        .unwrap();

        session
            .submit_answer(AnswerInput::Choice("si".to_string()))
            .unwrap();
        session.check_answer().unwrap();
        assert_eq!(session.advance().unwrap(), Advanced::Next(1));
        // Draft cleared: checking again needs a fresh submission
        assert!(!session.can_check());

        session
            .submit_answer(AnswerInput::Choice("no".to_string()))
            .unwrap();
        session.check_answer().unwrap();
        let Advanced::Completed(summary) = session.advance().unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(summary.score, 1);
        assert_eq!(summary.percentage, 50);
        assert_eq!(session.phase(), Phase::Completed);
        assert!(session.current_question().is_none());
    }
}
