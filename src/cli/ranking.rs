//! `yatina ranking` - community leaderboards by origin or residence

use anyhow::Result;
use yatina::engine::{
    assign_fallback, default_fallback, top_by_attribute, top_global, RankAttribute,
};
use yatina::store::{ProgressStore, SqliteStore};

pub async fn ranking_command(store: &SqliteStore, attribute: RankAttribute, top: usize) -> Result<()> {
    let mut profiles = store.list_profiles().await?;
    assign_fallback(&mut profiles, attribute, default_fallback(attribute));

    let label = match attribute {
        RankAttribute::Origin => "origin",
        RankAttribute::Residence => "residence",
    };

    println!("Top {top} by {label}:");
    for (city, members) in top_by_attribute(&profiles, attribute, top) {
        println!("  {city}");
        for (rank, member) in members.iter().enumerate() {
            println!("    {}. {:<20} {} XP", rank + 1, member.username, member.xp);
        }
    }

    println!("\nGlobal top:");
    for member in top_global(&profiles, attribute, attribute.known_cities(), 2) {
        println!("  {:<20} {} XP", member.username, member.xp);
    }
    Ok(())
}
