//! Submission lifecycle: input, shorten request, history update.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::application::services::HistoryStore;
use crate::domain::entities::{History, HistoryItem};
use crate::domain::ports::{HistoryStorage, ShortenClient};
use crate::error::{ErrorKind, ShortenError};
use crate::utils::url_validator::is_valid_url;
use tracing::{debug, error, info};

/// How submissions made while another request is in flight are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitPolicy {
    /// Every submission runs; successes apply in the order responses arrive.
    #[default]
    Concurrent,
    /// Every submission runs; a success older than one already applied is dropped.
    LatestWins,
    /// A submission made while a request is in flight is refused.
    SingleFlight,
}

impl SubmitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitPolicy::Concurrent => "concurrent",
            SubmitPolicy::LatestWins => "latest-wins",
            SubmitPolicy::SingleFlight => "single-flight",
        }
    }
}

impl fmt::Display for SubmitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "concurrent" => Ok(SubmitPolicy::Concurrent),
            "latest-wins" | "latest_wins" => Ok(SubmitPolicy::LatestWins),
            "single-flight" | "single_flight" => Ok(SubmitPolicy::SingleFlight),
            other => Err(format!(
                "unknown submit policy '{other}' (expected concurrent, latest-wins or single-flight)"
            )),
        }
    }
}

/// Controller options.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Run input through the URL validator before sending it.
    ///
    /// Off by default: only empty input is held back and the remote service
    /// is left to reject malformed URLs.
    pub validate_before_submit: bool,
    pub policy: SubmitPolicy,
}

/// Where the controller is in the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Submitting,
}

/// Result of one [`SessionController::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was empty; nothing happened.
    Ignored,
    /// Input failed the validation gate; no request was sent.
    Rejected { input: String },
    /// Another request was in flight under [`SubmitPolicy::SingleFlight`].
    Busy,
    /// The service returned a short URL and the history was updated.
    Shortened(HistoryItem),
    /// The service returned a short URL but a newer submission had already
    /// been applied, so this one was dropped.
    Superseded(HistoryItem),
    /// The request failed; visible state is unchanged.
    Failed(ShortenError),
}

impl SubmitOutcome {
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            SubmitOutcome::Ignored => Some(ErrorKind::EmptySubmission),
            SubmitOutcome::Rejected { .. } => Some(ErrorKind::ValidationRejected),
            SubmitOutcome::Failed(e) => Some(e.kind()),
            _ => None,
        }
    }
}

struct SessionState {
    input: String,
    last_shortened: Option<String>,
    last_error: Option<ShortenError>,
    latest_applied: u64,
}

/// Decrements the in-flight counter when a request finishes, however it ends.
struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Orchestrates a shortening session.
///
/// Holds the current input and the last shortened URL, forwards submissions
/// to a [`ShortenClient`] and records successes in a [`HistoryStore`].
///
/// No lock is held while a request is in flight, so submissions may overlap.
/// What happens then is decided by [`SubmitPolicy`].
pub struct SessionController<C, S>
where
    C: ShortenClient + ?Sized,
    S: HistoryStorage + ?Sized,
{
    client: Arc<C>,
    history: Mutex<HistoryStore<S>>,
    state: Mutex<SessionState>,
    options: SessionOptions,
    next_ticket: AtomicU64,
    in_flight: AtomicUsize,
}

impl<C, S> SessionController<C, S>
where
    C: ShortenClient + ?Sized,
    S: HistoryStorage + ?Sized,
{
    pub fn new(client: Arc<C>, history: HistoryStore<S>, options: SessionOptions) -> Self {
        Self {
            client,
            history: Mutex::new(history),
            state: Mutex::new(SessionState {
                input: String::new(),
                last_shortened: None,
                last_error: None,
                latest_applied: 0,
            }),
            options,
            next_ticket: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn set_input(&self, input: impl Into<String>) {
        self.state().input = input.into();
    }

    pub fn input(&self) -> String {
        self.state().input.clone()
    }

    /// Short URL of the most recent applied success.
    pub fn last_shortened(&self) -> Option<String> {
        self.state().last_shortened.clone()
    }

    /// Most recent request failure, kept for diagnostics only.
    pub fn last_error(&self) -> Option<ShortenError> {
        self.state().last_error.clone()
    }

    /// Snapshot of the recent-links history.
    pub fn history(&self) -> History {
        self.history_store().items().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            SessionPhase::Submitting
        } else {
            SessionPhase::Idle
        }
    }

    /// Replaces the input and submits it.
    pub async fn submit_input(&self, input: impl Into<String>) -> SubmitOutcome {
        self.set_input(input);
        self.submit().await
    }

    /// Submits the current input.
    ///
    /// Empty input is ignored. With the validation gate on, input rejected by
    /// [`is_valid_url`] is not sent. On success the last shortened URL is
    /// updated, the pair is added to the history and the input is cleared.
    /// On failure the error is logged and nothing visible changes.
    pub async fn submit(&self) -> SubmitOutcome {
        let input = self.input();

        if input.is_empty() {
            debug!(kind = %ErrorKind::EmptySubmission, "Ignoring empty submission");
            return SubmitOutcome::Ignored;
        }

        if self.options.validate_before_submit && !is_valid_url(&input) {
            info!(kind = %ErrorKind::ValidationRejected, "Rejected input: {}", input);
            return SubmitOutcome::Rejected { input };
        }

        let Some(_in_flight) = self.begin_request() else {
            debug!("Request already in flight, refusing {}", input);
            return SubmitOutcome::Busy;
        };
        let ticket = self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        debug!(ticket, "Shortening {}", input);

        match self.client.shorten(&input).await {
            Ok(result) => self.apply_success(ticket, HistoryItem::new(input, result.short_url)),
            Err(e) => {
                error!(kind = %e.kind(), ticket, "Failed to shorten {}: {}", input, e);
                self.state().last_error = Some(e.clone());
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn begin_request(&self) -> Option<InFlight<'_>> {
        match self.options.policy {
            SubmitPolicy::SingleFlight => self
                .in_flight
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .ok()?,
            _ => self.in_flight.fetch_add(1, Ordering::SeqCst),
        };
        Some(InFlight(&self.in_flight))
    }

    fn apply_success(&self, ticket: u64, item: HistoryItem) -> SubmitOutcome {
        let mut state = self.state();

        if self.options.policy == SubmitPolicy::LatestWins && ticket < state.latest_applied {
            info!(
                ticket,
                latest = state.latest_applied,
                "Dropping stale result {}",
                item.shortened
            );
            return SubmitOutcome::Superseded(item);
        }

        state.latest_applied = state.latest_applied.max(ticket);
        state.last_shortened = Some(item.shortened.clone());
        state.input.clear();
        self.history_store().add(item.clone());

        info!(ticket, "Shortened {} -> {}", item.original, item.shortened);
        SubmitOutcome::Shortened(item)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn history_store(&self) -> MutexGuard<'_, HistoryStore<S>> {
        self.history.lock().unwrap_or_else(|e| e.into_inner())
    }
}
