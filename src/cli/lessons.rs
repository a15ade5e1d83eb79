//! `yatina lessons` - list the lesson chain with unlock and completion state

use anyhow::Result;
use yatina::engine::{is_unlocked, UnlockMode};
use yatina::store::{ProgressStore, SqliteStore};

pub async fn lessons_command(store: &SqliteStore, user: &str, mode: UnlockMode) -> Result<()> {
    let profile = super::find_profile(store, user).await?;
    let lessons = store.list_lessons().await?;
    let progress = store.list_progress(&profile.id).await?;

    for lesson in &lessons {
        let record = progress.iter().find(|p| p.lesson_id == lesson.id);
        let marker = if record.is_some_and(|p| p.completed) {
            let stars = record.map(|p| p.stars).unwrap_or(0);
            format!("done {}", "*".repeat(stars as usize))
        } else if is_unlocked(mode, lesson, &lessons, &progress) {
            "open".to_string()
        } else {
            "locked".to_string()
        };
        println!(
            "{:>2}. {:<20} [{}] (+{} XP)",
            lesson.order_index, lesson.title, marker, lesson.xp_reward
        );
    }
    Ok(())
}
