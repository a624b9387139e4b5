//! Domain layer containing entities and port definitions.
//!
//! The domain layer has no dependency on infrastructure. Adapters in
//! [`crate::infrastructure`] implement the ports defined here, and services in
//! [`crate::application::services`] consume them.
//!
//! # Architecture
//!
//! - [`entities`] - History entries and the shorten result
//! - [`ports`] - Storage and remote-service trait definitions
//!
//! # Submission Flow
//!
//! 1. The front-end hands user input to the session controller
//! 2. [`ports::ShortenClient::shorten`] asks the remote service for a short URL
//! 3. On success the pair is promoted into the history
//! 4. The history is written through [`ports::HistoryStorage`]

pub mod entities;
pub mod ports;
