//! Application layer services.
//!
//! Services consume the domain ports and expose the operations a front-end
//! calls: submitting input and reading the recent-links history.
//!
//! # Available Services
//!
//! - [`services::history_store::HistoryStore`] - Bounded, deduplicating, persisted history
//! - [`services::session_controller::SessionController`] - Submission lifecycle orchestration

pub mod services;
