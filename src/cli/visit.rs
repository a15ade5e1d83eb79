//! `yatina visit` - daily frog check-in

use anyhow::Result;
use chrono::Utc;
use yatina::config::Settings;
use yatina::engine::{compute_next_stage, stage_name, MAX_STAGE};
use yatina::store::{ProfilePatch, ProgressStore, SqliteStore};

pub async fn visit_command(store: &SqliteStore, settings: &Settings, user: &str) -> Result<()> {
    let profile = super::find_profile(store, user).await?;
    let update = compute_next_stage(
        profile.growth_stage,
        profile.last_growth_visit,
        Utc::now(),
        settings.growth,
    );

    if update.changed {
        store
            .update_profile(
                &profile.id,
                ProfilePatch {
                    growth_stage: Some(update.stage),
                    last_growth_visit: Some(update.last_visit),
                    ..Default::default()
                },
            )
            .await?;
    }

    let profile = store.get_profile(&profile.id).await?;
    println!(
        "Your frog is at stage {} of {}: {}",
        profile.growth_stage + 1,
        MAX_STAGE + 1,
        stage_name(profile.growth_stage)
    );
    if !update.changed {
        println!("Already visited today. Come back tomorrow to keep it growing!");
    } else if update.stage == 0 && profile.last_growth_visit.is_some() {
        println!("A day was missed, so it is back to the egg.");
    }
    Ok(())
}
