//! Backends for the history slot.
//!
//! Provides two [`crate::domain::ports::HistoryStorage`] implementations:
//! - [`FileStorage`] - Durable, one JSON file per key
//! - [`MemoryStorage`] - Process-local, for ephemeral sessions and tests

mod file_storage;
mod memory_storage;

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
