//! Persistence side effects produced by the engines
//!
//! Engines compute state and never touch the store directly. Each command
//! returns the writes the caller must sequence, so I/O and rendering stay
//! outside the core. A failed write leaves in-memory state ahead of the
//! store; callers retry on the next interaction and re-fetch the profile
//! before trusting it again.

use tracing::debug;

use crate::error::EngineError;
use crate::store::{ProfilePatch, ProgressFields, ProgressStore};

/// A single required persistence write
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    UpdateProfile {
        user_id: String,
        patch: ProfilePatch,
    },
    UpsertProgress {
        user_id: String,
        lesson_id: String,
        fields: ProgressFields,
    },
}

/// Apply effects in order, stopping at the first failure
pub async fn apply_effects(
    store: &dyn ProgressStore,
    effects: &[SideEffect],
) -> Result<(), EngineError> {
    for effect in effects {
        debug!(?effect, "applying side effect");
        match effect {
            SideEffect::UpdateProfile { user_id, patch } => {
                store.update_profile(user_id, patch.clone()).await?;
            }
            SideEffect::UpsertProgress {
                user_id,
                lesson_id,
                fields,
            } => {
                store
                    .upsert_progress(user_id, lesson_id, fields.clone())
                    .await?;
            }
        }
    }
    Ok(())
}
