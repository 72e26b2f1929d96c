//! Device-local key-value storage.
//!
//! The slot is the one piece of shared mutable state in the client. Everything
//! that persists goes through [`KeyValueSlot`] so the backing store can be a
//! file on disk, or memory in tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{Result, TextbookError};

/// Minimal string key-value storage, shaped after browser local storage.
pub trait KeyValueSlot: Send + Sync {
    /// Returns the raw value stored under `key`, or `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory slot. Contents vanish with the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| TextbookError::storage(format!("Memory slot poisoned: {}", e)))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| TextbookError::storage(format!("Memory slot poisoned: {}", e)))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| TextbookError::storage(format!("Memory slot poisoned: {}", e)))?;
        entries.remove(key);
        Ok(())
    }
}
