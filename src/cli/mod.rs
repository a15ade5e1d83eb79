//! CLI command implementations

pub mod attempt;
pub mod init;
pub mod lessons;
pub mod profile;
pub mod ranking;
pub mod visit;

use anyhow::{bail, Result};
use yatina::store::{ProgressStore, SqliteStore};
use yatina::Profile;

/// Resolve a user by id or username
pub(crate) async fn find_profile(store: &SqliteStore, user: &str) -> Result<Profile> {
    let profiles = store.list_profiles().await?;
    match profiles
        .into_iter()
        .find(|p| p.id == user || p.username == user)
    {
        Some(profile) => Ok(profile),
        None => bail!("no profile named '{user}'; run `yatina init --username {user}` first"),
    }
}
