//! Core domain entities.
//!
//! Entities are plain data structures without I/O:
//!
//! - [`HistoryItem`] - One successful shortening (original + short URL)
//! - [`History`] - Recent shortenings, most recent first
//! - [`ShortenedResult`] - Decoded success body of the remote service

pub mod history_item;

pub use history_item::{HISTORY_CAPACITY, History, HistoryItem, ShortenedResult};
