//! Error types shared by the client core.
//!
//! Every failure maps onto an [`ErrorKind`] with a stable snake_case code, the
//! same codes used in log records. None of them is fatal: the session
//! controller always returns to idle.

use std::fmt;

/// Failure taxonomy of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input failed the URL validator (only when the validation gate is on).
    ValidationRejected,
    /// Input was empty; the submission is a silent no-op.
    EmptySubmission,
    /// Transport failure, non-2xx status or an undecodable response body.
    RequestFailed,
    /// Stored history could not be parsed and was replaced by an empty list.
    PersistenceCorrupt,
}

impl ErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::ValidationRejected => "validation_rejected",
            ErrorKind::EmptySubmission => "empty_submission",
            ErrorKind::RequestFailed => "request_failed",
            ErrorKind::PersistenceCorrupt => "persistence_corrupt",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors returned by a [`crate::domain::ports::ShortenClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShortenError {
    /// The request did not produce a usable `short_url`.
    ///
    /// `status` is set when the service answered with a non-2xx status.
    #[error("request failed{}: {reason}", status_suffix(.status))]
    RequestFailed { status: Option<u16>, reason: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with status {s}")).unwrap_or_default()
}

impl ShortenError {
    pub fn request_failed(reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: None,
            reason: reason.into(),
        }
    }

    pub fn with_status(status: u16, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: Some(status),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ShortenError::RequestFailed { .. } => ErrorKind::RequestFailed,
        }
    }

    /// HTTP status of the failed response, if the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ShortenError::RequestFailed { status, .. } => *status,
        }
    }
}

/// Errors raised by a [`crate::domain::ports::HistoryStorage`] backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored history is corrupt: {0}")]
    Corrupt(String),

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            StorageError::Corrupt(_) => Some(ErrorKind::PersistenceCorrupt),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Corrupt(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        assert_eq!(ErrorKind::ValidationRejected.code(), "validation_rejected");
        assert_eq!(ErrorKind::EmptySubmission.code(), "empty_submission");
        assert_eq!(ErrorKind::RequestFailed.to_string(), "request_failed");
        assert_eq!(ErrorKind::PersistenceCorrupt.code(), "persistence_corrupt");
    }

    #[test]
    fn test_shorten_error_display() {
        let err = ShortenError::with_status(502, "bad gateway");
        assert_eq!(err.to_string(), "request failed with status 502: bad gateway");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.kind(), ErrorKind::RequestFailed);

        let err = ShortenError::request_failed("connection refused");
        assert_eq!(err.to_string(), "request failed: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_storage_error_from_json() {
        let json_err = serde_json::from_str::<Vec<u8>>("{not json").unwrap_err();
        let err: StorageError = json_err.into();
        assert_eq!(err.kind(), Some(ErrorKind::PersistenceCorrupt));
    }
}
