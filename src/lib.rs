//! yatina - gamified Aymara language-learning core
//!
//! The engine behind the learning app: lesson unlock chains, XP/star/lives
//! rewards, the daily-streak frog growth simulator, the quiz state machine
//! with per-type answer validation, and the community ranking views.
//!
//! Engines are pure and return explicit persistence side effects; the store
//! contract in [`store`] is the only I/O seam.

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod store;

pub use domain::*;
