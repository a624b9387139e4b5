//! Services of the application layer.

pub mod history_store;
pub mod session_controller;

pub use history_store::{HistoryStore, promote_or_insert};
pub use session_controller::{
    SessionController, SessionOptions, SessionPhase, SubmitOutcome, SubmitPolicy,
};
