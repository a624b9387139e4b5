//! Port trait definitions for the domain layer.
//!
//! Ports abstract the two side effects of the client core: the durable slot
//! holding the recent-links history and the remote shortening service.
//!
//! # Architecture
//!
//! - Traits define the contract
//! - Implementations live in `crate::infrastructure`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Ports
//!
//! - [`HistoryStorage`] - String-keyed durable slot
//! - [`ShortenClient`] - Remote shortening request

pub mod history_storage;
pub mod shorten_client;

pub use history_storage::{HISTORY_KEY, HistoryStorage};
pub use shorten_client::ShortenClient;

#[cfg(test)]
pub use history_storage::MockHistoryStorage;
#[cfg(test)]
pub use shorten_client::MockShortenClient;
