//! In-memory history slot.

use crate::domain::ports::HistoryStorage;
use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

/// A storage backend that lives only as long as the process.
///
/// # Use Cases
///
/// - Sessions started with `--no-persist`
/// - Tests that need a real backend rather than a mock
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        debug!("Using MemoryStorage (history is not persisted)");
        Self::default()
    }

    /// Creates a backend with `key` already holding `value`.
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.to_string(), value.to_string());
        }
        storage
    }
}

impl HistoryStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
