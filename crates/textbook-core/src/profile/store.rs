//! Profile store backed by a single key-value slot.

use std::sync::Arc;

use super::model::Profile;
use crate::error::Result;
use crate::storage::KeyValueSlot;

/// Storage key used for the reader profile.
pub const DEFAULT_PROFILE_KEY: &str = "ai_textbook_user";

/// Owns the one persisted [`Profile`] on this device.
///
/// Any component may `load`; only the auth flow (`save`) and logout (`clear`)
/// should write. The store never notifies anyone: announcing a login or logout
/// is the caller's job.
#[derive(Clone)]
pub struct ProfileStore {
    slot: Arc<dyn KeyValueSlot>,
    key: String,
}

impl ProfileStore {
    pub fn new(slot: Arc<dyn KeyValueSlot>) -> Self {
        Self::with_key(slot, DEFAULT_PROFILE_KEY)
    }

    pub fn with_key(slot: Arc<dyn KeyValueSlot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    /// Serializes `profile` into the slot, replacing any previous record.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        let json = serde_json::to_string(profile)?;
        self.slot.set(&self.key, &json)?;
        tracing::info!(profile_id = profile.id(), "Saved reader profile");
        Ok(())
    }

    /// Reads the stored profile.
    ///
    /// An empty slot, an unreadable slot and a record that fails to parse are
    /// all reported as `None`. Failures go to the log only. A record stored
    /// without an id is given one and written back.
    pub fn load(&self) -> Option<Profile> {
        let raw = match self.slot.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, "Failed to read profile slot: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<Profile>(&raw) {
            Ok(mut profile) => {
                if profile.assign_missing_id() {
                    if let Err(e) = self.save(&profile) {
                        tracing::warn!(key = %self.key, "Failed to store assigned profile id: {}", e);
                    }
                }
                Some(profile)
            }
            Err(e) => {
                tracing::warn!(key = %self.key, "Ignoring unparsable stored profile: {}", e);
                None
            }
        }
    }

    /// Removes the stored profile entirely.
    pub fn clear(&self) -> Result<()> {
        self.slot.remove(&self.key)?;
        tracing::info!(key = %self.key, "Cleared reader profile");
        Ok(())
    }
}

impl std::fmt::Debug for ProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileStore").field("key", &self.key).finish()
    }
}
