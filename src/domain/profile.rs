//! User profile and level arithmetic

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of lives a profile can hold
pub const MAX_LIVES: u32 = 5;

/// XP required per level step
pub const XP_PER_LEVEL: u32 = 100;

/// A learner's persisted profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub username: String,
    pub xp: u32,
    /// Derived from xp; kept denormalized for display queries
    pub level: u32,
    pub lives: u32,
    /// Authoritative frog growth stage (0..=4)
    pub growth_stage: u32,
    pub last_growth_visit: Option<DateTime<Utc>>,
    pub origin_city: Option<String>,
    pub residence_city: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Level for a given XP total: one level per 100 XP, starting at 1
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// Clamp a lives delta result into the valid 0..=MAX_LIVES range
pub fn clamp_lives(lives: i64) -> u32 {
    lives.clamp(0, MAX_LIVES as i64) as u32
}

impl Profile {
    /// Create a fresh profile with full lives and no growth history
    pub fn new(username: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            xp: 0,
            level: 1,
            lives: MAX_LIVES,
            growth_stage: 0,
            last_growth_visit: None,
            origin_city: None,
            residence_city: None,
            created_at: Utc::now(),
        }
    }

    /// XP earned within the current level (for progress bars)
    pub fn xp_into_level(&self) -> u32 {
        self.xp % XP_PER_LEVEL
    }

    /// XP still needed to reach the next level
    pub fn xp_to_next_level(&self) -> u32 {
        XP_PER_LEVEL - self.xp_into_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_xp() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(250), 3);
    }

    #[test]
    fn test_clamp_lives() {
        assert_eq!(clamp_lives(-2), 0);
        assert_eq!(clamp_lives(3), 3);
        assert_eq!(clamp_lives(9), MAX_LIVES);
    }

    #[test]
    fn test_new_profile_defaults() {
        let profile = Profile::new("amaru");
        assert_eq!(profile.level, 1);
        assert_eq!(profile.lives, MAX_LIVES);
        assert!(profile.last_growth_visit.is_none());
    }
}
