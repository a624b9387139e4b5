//! # URL Shortener Client
//!
//! Client core for a URL shortening service: submit a URL, get its short form
//! from the remote service, and keep a small rolling list of recent
//! shortenings that survives restarts.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - History entities and port traits
//! - **Application Layer** ([`application`]) - History store and session controller
//! - **Infrastructure Layer** ([`infrastructure`]) - File/memory storage and the HTTP client
//! - **Utilities** ([`utils`]) - Syntactic URL validation
//!
//! ## Features
//!
//! - Recent-links history capped at 3 entries with dedup and promote-to-front
//! - History persisted after every change, restored at startup
//! - Optional validation gate in front of the remote call
//! - Configurable handling of overlapping submissions
//!
//! ## Quick Start
//!
//! ```bash
//! export SHORTENER_API_URL="http://localhost:8000"
//!
//! cargo run -- shorten https://example.com/some/long/path
//! cargo run -- history
//! ```
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub mod config;

pub use error::{ErrorKind, ShortenError, StorageError};

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        HistoryStore, SessionController, SessionOptions, SessionPhase, SubmitOutcome,
        SubmitPolicy,
    };
    pub use crate::domain::entities::{HISTORY_CAPACITY, History, HistoryItem, ShortenedResult};
    pub use crate::domain::ports::{HISTORY_KEY, HistoryStorage, ShortenClient};
    pub use crate::error::{ErrorKind, ShortenError, StorageError};
    pub use crate::infrastructure::http::HttpShortenClient;
    pub use crate::infrastructure::storage::{FileStorage, MemoryStorage};
    pub use crate::utils::url_validator::is_valid_url;
}
