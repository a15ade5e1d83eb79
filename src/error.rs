//! Error taxonomy for the learning core
//!
//! Validation preconditions fail fast with a typed error so the UI layer
//! decides messaging; nothing is silently swallowed.

use thiserror::Error;

/// Failures inside the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to prepare data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("{what} not found")]
    NotFound { what: String },

    #[error("stored record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }
}

/// Failures raised by the engines
#[derive(Debug, Error)]
pub enum EngineError {
    /// Attempt started with zero lives; the caller must block it upstream
    #[error("no lives left")]
    InsufficientLives,

    /// The lesson already has a completed progress record
    #[error("lesson '{lesson}' is already completed")]
    AlreadyCompleted { lesson: String },

    /// A quiz command was issued in a phase or shape it does not allow
    #[error("invalid answer state: {0}")]
    InvalidAnswerState(String),

    /// A store call failed; session state stays usable, retry on next interaction
    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),
}
