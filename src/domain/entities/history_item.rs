//! History entry and shorten result entities.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in the recent-links history.
pub const HISTORY_CAPACITY: usize = 3;

/// One successful shortening: the submitted URL and the short URL returned for it.
///
/// Serialized as `{"original": ..., "shortened": ...}`, the shape stored in the
/// `urlHistory` slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    pub original: String,
    pub shortened: String,
}

impl HistoryItem {
    pub fn new(original: impl Into<String>, shortened: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            shortened: shortened.into(),
        }
    }

    /// Returns true if the two entries share either the original or the short URL.
    pub fn conflicts_with(&self, other: &HistoryItem) -> bool {
        self.original == other.original || self.shortened == other.shortened
    }
}

/// Recent shortenings, most recent first.
pub type History = Vec<HistoryItem>;

/// Success body of the remote shorten endpoint.
///
/// Fields other than `short_url` (the service also echoes `original_url` and
/// a visit counter) are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenedResult {
    pub short_url: String,
}
