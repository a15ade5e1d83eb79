//! Stateful subsystems of the learning core
//!
//! Each engine computes new state plus an explicit list of persistence side
//! effects; the caller sequences I/O through [`effects::apply_effects`].

pub mod collectible;
pub mod effects;
pub mod growth;
pub mod quiz;
pub mod ranking;
pub mod reward;
pub mod unlock;

pub use collectible::{part_unlocked, unlocked_parts, Collectible, CollectiblePart, COLLECTIBLES};
pub use effects::{apply_effects, SideEffect};
pub use growth::{compute_next_stage, stage_name, GrowthConfig, GrowthUpdate, StageGallery, MAX_STAGE};
pub use quiz::{Advanced, AnswerInput, CheckResult, Phase, QuizMode, QuizSession, QuizSummary};
pub use ranking::{
    assign_fallback, default_fallback, merge_dedup, top_by_attribute, top_global, RankAttribute,
    ORIGIN_CITIES, RESIDENCE_CITIES,
};
pub use reward::{
    AttemptOutcome, AttemptResolution, FixedOutcome, FixedStars, OutcomePolicy,
    ProbabilisticOutcome, RewardEngine, StarPolicy, UniformStars,
};
pub use unlock::{is_unlocked, UnlockMode};
