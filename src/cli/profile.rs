//! `yatina profile` - show a learner's stats

use anyhow::Result;
use yatina::engine::{unlocked_parts, COLLECTIBLES};
use yatina::store::{ProgressStore, SqliteStore};
use yatina::{total_stars, MAX_LIVES};

pub async fn profile_command(store: &SqliteStore, user: &str) -> Result<()> {
    let profile = super::find_profile(store, user).await?;
    let lessons = store.list_lessons().await?;
    let progress = store.list_progress(&profile.id).await?;
    let completed = progress.iter().filter(|p| p.completed).count();

    println!("{}", profile.username);
    println!("  Level:   {}", profile.level);
    println!(
        "  XP:      {} ({} to next level)",
        profile.xp,
        profile.xp_to_next_level()
    );
    println!("  Lives:   {} / {MAX_LIVES}", profile.lives);
    println!("  Stars:   {}", total_stars(&progress));
    println!("  Lessons: {completed} completed");
    for collectible in COLLECTIBLES.iter().filter(|c| c.available) {
        let (revealed, total) = unlocked_parts(collectible, &lessons, &progress);
        println!("  {}: {revealed}/{total} parts revealed", collectible.name);
    }
    println!(
        "  Member since {}",
        profile.created_at.format("%Y-%m-%d")
    );
    Ok(())
}
