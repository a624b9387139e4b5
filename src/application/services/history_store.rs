//! Bounded recent-links history with dedup/promote semantics.

use std::sync::Arc;

use crate::domain::entities::{HISTORY_CAPACITY, History, HistoryItem};
use crate::domain::ports::{HISTORY_KEY, HistoryStorage};
use crate::error::StorageError;
use tracing::{debug, warn};

/// Inserts `item` at the front of `history`.
///
/// Every existing entry sharing the original or the short URL is removed
/// first (promote). Only when nothing was removed is the list cut back to
/// [`HISTORY_CAPACITY`]; a promote never grows the list.
///
/// Returns true if an existing entry was promoted.
pub fn promote_or_insert(history: &mut History, item: HistoryItem) -> bool {
    let before = history.len();
    history.retain(|entry| !entry.conflicts_with(&item));
    let promoted = history.len() < before;

    history.insert(0, item);

    if !promoted {
        history.truncate(HISTORY_CAPACITY);
    }

    promoted
}

/// The last few successful shortenings, persisted after every change.
///
/// The list is restored from the `urlHistory` slot when the store is opened
/// and written back in full after each [`HistoryStore::add`].
pub struct HistoryStore<S: HistoryStorage + ?Sized> {
    storage: Arc<S>,
    items: History,
}

impl<S: HistoryStorage + ?Sized> HistoryStore<S> {
    /// Opens the store and restores the persisted history.
    pub fn open(storage: Arc<S>) -> Self {
        let mut store = Self {
            storage,
            items: Vec::new(),
        };
        store.items = store.load();
        store
    }

    /// Reads the persisted history.
    ///
    /// A missing slot yields an empty list. An unreadable or unparsable slot
    /// also yields an empty list; the failure is logged, never returned.
    /// Lists longer than [`HISTORY_CAPACITY`] are cut to their newest entries.
    pub fn load(&self) -> History {
        match self.read_slot() {
            Ok(Some(mut items)) => {
                items.truncate(HISTORY_CAPACITY);
                debug!("Restored {} history entries", items.len());
                items
            }
            Ok(None) => {
                debug!("No stored history, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(
                    kind = e.kind().map(|k| k.code()).unwrap_or("storage_error"),
                    "Discarding stored history: {}", e
                );
                Vec::new()
            }
        }
    }

    /// Adds a successful shortening and persists the result.
    ///
    /// See [`promote_or_insert`] for the ordering rules. A failed write is
    /// logged and the in-memory list keeps the change.
    pub fn add(&mut self, item: HistoryItem) -> &History {
        let promoted = promote_or_insert(&mut self.items, item);
        debug!(promoted, len = self.items.len(), "History updated");

        if let Err(e) = self.persist() {
            warn!("Failed to persist history: {}", e);
        }

        &self.items
    }

    /// Current history, most recent first.
    pub fn items(&self) -> &History {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn read_slot(&self) -> Result<Option<History>, StorageError> {
        let Some(raw) = self.storage.read(HISTORY_KEY)? else {
            return Ok(None);
        };
        let items: History = serde_json::from_str(&raw)?;
        Ok(Some(items))
    }

    fn persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.items)?;
        self.storage.write(HISTORY_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockHistoryStorage;

    fn item(original: &str, shortened: &str) -> HistoryItem {
        HistoryItem::new(original, shortened)
    }

    fn history(pairs: &[(&str, &str)]) -> History {
        pairs.iter().map(|(o, s)| item(o, s)).collect()
    }

    fn empty_storage() -> MockHistoryStorage {
        let mut storage = MockHistoryStorage::new();
        storage.expect_read().returning(|_| Ok(None));
        storage
    }

    #[test]
    fn test_promote_or_insert_into_empty() {
        let mut h = History::new();
        let promoted = promote_or_insert(&mut h, item("a", "A"));

        assert!(!promoted);
        assert_eq!(h, history(&[("a", "A")]));
    }

    #[test]
    fn test_promote_by_original_keeps_relative_order() {
        let mut h = history(&[("c", "C"), ("b", "B"), ("a", "A")]);
        let promoted = promote_or_insert(&mut h, item("b", "B2"));

        assert!(promoted);
        assert_eq!(h, history(&[("b", "B2"), ("c", "C"), ("a", "A")]));
    }

    #[test]
    fn test_promote_by_shortened() {
        let mut h = history(&[("c", "C"), ("b", "B"), ("a", "A")]);
        promote_or_insert(&mut h, item("z", "A"));

        assert_eq!(h, history(&[("z", "A"), ("c", "C"), ("b", "B")]));
    }

    #[test]
    fn test_promote_removes_every_conflicting_entry() {
        let mut h = history(&[("c", "C"), ("b", "B"), ("a", "A")]);
        let promoted = promote_or_insert(&mut h, item("a", "B"));

        assert!(promoted);
        assert_eq!(h, history(&[("a", "B"), ("c", "C")]));
    }

    #[test]
    fn test_shortened_values_stay_unique() {
        let mut h = History::new();
        for (o, s) in [("a", "A"), ("b", "B"), ("a", "B"), ("c", "A"), ("b", "C")] {
            promote_or_insert(&mut h, item(o, s));

            let mut shortened: Vec<_> = h.iter().map(|e| e.shortened.as_str()).collect();
            let mut originals: Vec<_> = h.iter().map(|e| e.original.as_str()).collect();
            shortened.sort_unstable();
            shortened.dedup();
            originals.sort_unstable();
            originals.dedup();
            assert_eq!(shortened.len(), h.len());
            assert_eq!(originals.len(), h.len());
            assert!(h.len() <= HISTORY_CAPACITY);
        }
    }

    #[test]
    fn test_fourth_distinct_entry_evicts_oldest() {
        let mut h = History::new();
        for (o, s) in [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")] {
            promote_or_insert(&mut h, item(o, s));
            assert!(h.len() <= HISTORY_CAPACITY);
        }

        assert_eq!(h, history(&[("d", "D"), ("c", "C"), ("b", "B")]));
    }

    #[test]
    fn test_repeated_add_is_idempotent() {
        let mut h = history(&[("b", "B"), ("a", "A")]);
        promote_or_insert(&mut h, item("a", "A"));
        let after_first = h.clone();
        promote_or_insert(&mut h, item("a", "A"));

        assert_eq!(h, after_first);
        assert_eq!(h, history(&[("a", "A"), ("b", "B")]));
    }

    #[test]
    fn test_concrete_scenario() {
        let mut h = History::new();
        promote_or_insert(&mut h, item("a", "A"));
        promote_or_insert(&mut h, item("b", "B"));
        promote_or_insert(&mut h, item("c", "C"));
        assert_eq!(h, history(&[("c", "C"), ("b", "B"), ("a", "A")]));

        promote_or_insert(&mut h, item("a", "A2"));
        assert_eq!(h, history(&[("a", "A2"), ("c", "C"), ("b", "B")]));
    }

    #[test]
    fn test_open_restores_persisted_history() {
        let mut storage = MockHistoryStorage::new();
        storage
            .expect_read()
            .withf(|key| key == HISTORY_KEY)
            .times(1)
            .returning(|_| {
                Ok(Some(
                    r#"[{"original":"b","shortened":"B"},{"original":"a","shortened":"A"}]"#
                        .to_string(),
                ))
            });

        let store = HistoryStore::open(Arc::new(storage));

        assert_eq!(store.items(), &history(&[("b", "B"), ("a", "A")]));
    }

    #[test]
    fn test_open_with_corrupt_slot_starts_empty() {
        let mut storage = MockHistoryStorage::new();
        storage
            .expect_read()
            .returning(|_| Ok(Some("{not json".to_string())));

        let store = HistoryStore::open(Arc::new(storage));

        assert!(store.is_empty());
    }

    #[test]
    fn test_open_with_wrong_shape_starts_empty() {
        let mut storage = MockHistoryStorage::new();
        storage
            .expect_read()
            .returning(|_| Ok(Some(r#"{"original":"a","shortened":"A"}"#.to_string())));

        let store = HistoryStore::open(Arc::new(storage));

        assert!(store.is_empty());
    }

    #[test]
    fn test_open_with_unreadable_slot_starts_empty() {
        let mut storage = MockHistoryStorage::new();
        storage.expect_read().returning(|_| {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )))
        });

        let store = HistoryStore::open(Arc::new(storage));

        assert!(store.is_empty());
    }

    #[test]
    fn test_open_cuts_oversized_history() {
        let mut storage = MockHistoryStorage::new();
        storage.expect_read().returning(|_| {
            let stored = history(&[("e", "E"), ("d", "D"), ("c", "C"), ("b", "B"), ("a", "A")]);
            Ok(Some(serde_json::to_string(&stored).unwrap()))
        });

        let store = HistoryStore::open(Arc::new(storage));

        assert_eq!(store.items(), &history(&[("e", "E"), ("d", "D"), ("c", "C")]));
    }

    #[test]
    fn test_add_persists_full_list() {
        let mut storage = empty_storage();
        storage
            .expect_write()
            .withf(|key, value| {
                key == HISTORY_KEY && value == r#"[{"original":"a","shortened":"A"}]"#
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let mut store = HistoryStore::open(Arc::new(storage));
        let items = store.add(item("a", "A"));

        assert_eq!(items, &history(&[("a", "A")]));
    }

    #[test]
    fn test_add_writes_after_every_mutation() {
        let mut storage = empty_storage();
        storage.expect_write().times(4).returning(|_, _| Ok(()));

        let mut store = HistoryStore::open(Arc::new(storage));
        store.add(item("a", "A"));
        store.add(item("b", "B"));
        store.add(item("a", "A"));
        store.add(item("a", "A"));

        assert_eq!(store.items(), &history(&[("a", "A"), ("b", "B")]));
    }

    #[test]
    fn test_add_keeps_change_when_write_fails() {
        let mut storage = empty_storage();
        storage.expect_write().returning(|_, _| {
            Err(StorageError::Io(std::io::Error::other("disk full")))
        });

        let mut store = HistoryStore::open(Arc::new(storage));
        store.add(item("a", "A"));

        assert_eq!(store.len(), 1);
    }
}
