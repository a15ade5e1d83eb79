//! `yatina init` - seed content and optionally create a profile

use anyhow::Result;
use tracing::info;
use yatina::store::{ProgressStore, SqliteStore};
use yatina::Profile;

pub async fn init_command(store: &SqliteStore, username: Option<String>) -> Result<()> {
    store.seed_defaults()?;
    info!("seeded starter lessons, question banks and demo profiles");
    println!("Starter content is in place.");

    if let Some(username) = username {
        let existing = store.list_profiles().await?;
        if existing.iter().any(|p| p.username == username) {
            println!("Profile '{username}' already exists.");
            return Ok(());
        }
        let profile = Profile::new(&username);
        store.create_profile(&profile).await?;
        println!("Created profile '{}' ({})", profile.username, profile.id);
    }
    Ok(())
}
