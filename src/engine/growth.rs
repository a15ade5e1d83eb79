//! Frog growth simulator
//!
//! The creature advances one stage per consecutive calendar-day visit and
//! falls back to the egg after a missed day. Day boundaries are calendar
//! dates, not elapsed 24h blocks, so a 23:59 visit followed by a 00:01 visit
//! counts as consecutive days.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final growth stage (adult frog)
pub const MAX_STAGE: u32 = 4;

/// Display names for stages 0..=4
pub const STAGE_NAMES: [&str; 5] = [
    "Huevo",
    "Embriones",
    "Renacuajo (2 patas)",
    "Renacuajo (4 patas)",
    "Rana Adulta",
];

/// Name for a stage, clamped to the last one
pub fn stage_name(stage: u32) -> &'static str {
    STAGE_NAMES[stage.min(MAX_STAGE) as usize]
}

/// Growth tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthConfig {
    /// Stage granted on the first-ever visit. The product starts new users
    /// at stage 1 as an onboarding convenience (two days assumed).
    pub start_stage: u32,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self { start_stage: 1 }
    }
}

/// Outcome of a visit; `changed` tells the caller whether to persist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthUpdate {
    pub stage: u32,
    pub last_visit: DateTime<Utc>,
    pub changed: bool,
}

/// Advance the growth state for a visit at `now`. Pure and deterministic.
///
/// Same calendar day: no change. Exactly one day later: stage + 1 capped at
/// [`MAX_STAGE`]. Two or more days later: reset to 0. A null `last_visit`
/// initializes to the configured start stage.
pub fn compute_next_stage(
    stage: u32,
    last_visit: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    config: GrowthConfig,
) -> GrowthUpdate {
    let Some(last) = last_visit else {
        return GrowthUpdate {
            stage: config.start_stage.min(MAX_STAGE),
            last_visit: now,
            changed: true,
        };
    };

    let days = (now.date_naive() - last.date_naive()).num_days();
    if days <= 0 {
        // Repeat visit within the day (or clock skew): idempotent
        GrowthUpdate {
            stage,
            last_visit: last,
            changed: false,
        }
    } else if days == 1 {
        GrowthUpdate {
            stage: (stage + 1).min(MAX_STAGE),
            last_visit: now,
            changed: true,
        }
    } else {
        GrowthUpdate {
            stage: 0,
            last_visit: now,
            changed: true,
        }
    }
}

/// Browsing cursor over stages 0..=4 for the gallery view
///
/// Never mutates the authoritative stage; stages beyond it are locked and
/// rendered hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageGallery {
    viewing: u32,
    authoritative: u32,
}

impl StageGallery {
    pub fn new(authoritative: u32) -> Self {
        let authoritative = authoritative.min(MAX_STAGE);
        Self {
            viewing: authoritative,
            authoritative,
        }
    }

    pub fn viewing(&self) -> u32 {
        self.viewing
    }

    pub fn prev(&mut self) {
        self.viewing = self.viewing.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.viewing = (self.viewing + 1).min(MAX_STAGE);
    }

    /// The viewed stage is ahead of what the creature has reached
    pub fn is_locked(&self) -> bool {
        self.viewing > self.authoritative
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_first_visit_starts_at_configured_stage() {
        let now = at(2025, 6, 10, 9);
        let update = compute_next_stage(0, None, now, GrowthConfig::default());
        assert_eq!(update.stage, 1);
        assert!(update.changed);
        assert_eq!(update.last_visit, now);
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let last = at(2025, 6, 10, 8);
        let update = compute_next_stage(2, Some(last), at(2025, 6, 10, 22), GrowthConfig::default());
        assert_eq!(update.stage, 2);
        assert!(!update.changed);
        assert_eq!(update.last_visit, last);
    }

    #[test]
    fn test_next_calendar_day_advances() {
        // 23:00 then 01:00 next day is still a consecutive-day visit
        let update = compute_next_stage(
            2,
            Some(at(2025, 6, 10, 23)),
            at(2025, 6, 11, 1),
            GrowthConfig::default(),
        );
        assert_eq!(update.stage, 3);
        assert!(update.changed);
    }

    #[test]
    fn test_advance_caps_at_max_stage() {
        let update = compute_next_stage(
            MAX_STAGE,
            Some(at(2025, 6, 10, 9)),
            at(2025, 6, 11, 9),
            GrowthConfig::default(),
        );
        assert_eq!(update.stage, MAX_STAGE);
        assert!(update.changed); // last_visit still moves forward
    }

    #[test]
    fn test_missed_day_resets_to_egg() {
        let update = compute_next_stage(
            3,
            Some(at(2025, 6, 10, 9)),
            at(2025, 6, 12, 9),
            GrowthConfig::default(),
        );
        assert_eq!(update.stage, 0);
        assert!(update.changed);
    }

    #[test]
    fn test_gallery_clamps_and_locks() {
        let mut gallery = StageGallery::new(2);
        assert_eq!(gallery.viewing(), 2);
        assert!(!gallery.is_locked());

        gallery.next();
        assert_eq!(gallery.viewing(), 3);
        assert!(gallery.is_locked());

        gallery.next();
        gallery.next(); // clamped at 4
        assert_eq!(gallery.viewing(), MAX_STAGE);

        for _ in 0..10 {
            gallery.prev();
        }
        assert_eq!(gallery.viewing(), 0);
        assert!(!gallery.is_locked());
    }
}
