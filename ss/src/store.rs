//! Core two-slot store implementation

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

/// Current Unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Which of the two named instances to address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// In-progress instance, may carry unresolved fields
    Working,
    /// Confirmed-complete instance
    Final,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Working => write!(f, "working"),
            Self::Final => write!(f, "final"),
        }
    }
}

/// A saved value plus its save timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry<S> {
    value: S,
    saved_at: i64,
}

/// Errors from snapshot/restore
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Two-slot state store
///
/// Saves are wholesale overwrites - no field-level merge. Loads clone the
/// saved value, or fall back to `S::default()` for a never-saved slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Store<S> {
    working: Option<Entry<S>>,
    finalized: Option<Entry<S>>,
}

impl<S: Default + Clone> Store<S> {
    /// Create an empty store with neither slot saved
    pub fn new() -> Self {
        Self {
            working: None,
            finalized: None,
        }
    }

    fn entry(&self, slot: Slot) -> &Option<Entry<S>> {
        match slot {
            Slot::Working => &self.working,
            Slot::Final => &self.finalized,
        }
    }

    /// Overwrite the selected slot with a new value
    pub fn save(&mut self, value: S, slot: Slot) {
        debug!(%slot, "save: overwriting slot");
        let entry = Some(Entry {
            value,
            saved_at: now_ms(),
        });
        match slot {
            Slot::Working => self.working = entry,
            Slot::Final => self.finalized = entry,
        }
    }

    /// Load a clone of the selected slot
    ///
    /// A slot that was never saved yields `S::default()` - never an error.
    pub fn load(&self, slot: Slot) -> S {
        match self.entry(slot) {
            Some(entry) => entry.value.clone(),
            None => {
                debug!(%slot, "load: slot never saved, returning default");
                S::default()
            }
        }
    }

    /// Whether the selected slot has ever been saved
    pub fn is_saved(&self, slot: Slot) -> bool {
        self.entry(slot).is_some()
    }

    /// Unix-ms timestamp of the last save to the selected slot
    pub fn saved_at(&self, slot: Slot) -> Option<i64> {
        self.entry(slot).as_ref().map(|e| e.saved_at)
    }

    /// Clear both slots back to the never-saved state
    pub fn reset(&mut self) {
        debug!("reset: clearing both slots");
        self.working = None;
        self.finalized = None;
    }
}

impl<S: Default + Clone + Serialize + DeserializeOwned> Store<S> {
    /// Serialize the whole store to JSON for an external persistence layer
    pub fn snapshot(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rebuild a store from a snapshot produced by [`Store::snapshot`]
    pub fn restore(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}
