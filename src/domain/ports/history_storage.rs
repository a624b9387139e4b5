//! Port for the durable history slot.

use crate::error::StorageError;

/// Key of the slot holding the serialized history.
pub const HISTORY_KEY: &str = "urlHistory";

/// String-keyed durable storage, one value per key.
///
/// Reads and writes are synchronous. Writes replace the whole value and are
/// last-write-wins; there is no transactional guard between processes.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::FileStorage`] - One JSON file per key
/// - [`crate::infrastructure::storage::MemoryStorage`] - Process-local, not durable
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait HistoryStorage: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the slot exists
    /// - `Ok(None)` if nothing was ever written
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the backend cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
