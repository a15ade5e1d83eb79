//! `yatina attempt` - resolve a lesson attempt and persist the outcome

use anyhow::{bail, Result};
use chrono::Utc;
use tracing::warn;
use yatina::config::Settings;
use yatina::engine::{
    apply_effects, is_unlocked, AttemptOutcome, OutcomePolicy, ProbabilisticOutcome, RewardEngine,
};
use yatina::store::{ProgressStore, SqliteStore};

pub async fn attempt_command(
    store: &SqliteStore,
    settings: &Settings,
    user: &str,
    lesson_title: &str,
) -> Result<()> {
    let profile = super::find_profile(store, user).await?;
    let lessons = store.list_lessons().await?;
    let progress = store.list_progress(&profile.id).await?;

    let Some(lesson) = lessons.iter().find(|l| l.title == lesson_title) else {
        bail!("no lesson titled '{lesson_title}'");
    };
    if !is_unlocked(settings.unlock_mode, lesson, &lessons, &progress) {
        bail!("'{}' is locked; complete the previous lesson first", lesson.title);
    }

    let outcome = ProbabilisticOutcome {
        success_rate: settings.success_rate,
    }
    .resolve();
    let record = progress.iter().find(|p| p.lesson_id == lesson.id);

    let mut engine = RewardEngine::new();
    let resolution = engine.resolve_attempt(&profile, lesson, record, outcome, Utc::now())?;

    if let Err(err) = apply_effects(store, &resolution.effects).await {
        // Local state is ahead of the store; the next interaction retries
        warn!(%err, "failed to persist attempt outcome");
        bail!("attempt resolved but could not be saved: {err}");
    }

    // Refresh-after-write before reporting authoritative numbers
    let profile = store.get_profile(&profile.id).await?;
    match resolution.outcome {
        AttemptOutcome::Success => println!(
            "Excellent! {} stars, +{} XP (level {})",
            resolution.stars_awarded, resolution.xp_delta, profile.level
        ),
        AttemptOutcome::Failure => println!(
            "Try again! You lost a life ({} left).",
            profile.lives
        ),
    }
    Ok(())
}
