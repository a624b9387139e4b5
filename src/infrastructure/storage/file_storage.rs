//! File-backed history slot.

use crate::domain::ports::HistoryStorage;
use crate::error::StorageError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;
use tracing::debug;

/// Suffix of the temp file written before the atomic rename.
const TEMP_SUFFIX: &str = ".part";

/// Stores each key as `<dir>/<key>.json`.
///
/// The directory is created on first write. Each write goes to its own
/// uniquely named temp file that is then renamed over the slot, so a
/// concurrent reader sees either the old or the new value and concurrent
/// writers are last-write-wins.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl HistoryStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(key);

        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No slot file at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        let path = self.slot_path(key);
        let mut temp = Builder::new()
            .prefix(&format!("{key}.json."))
            .suffix(TEMP_SUFFIX)
            .tempfile_in(&self.dir)?;

        temp.write_all(value.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&path).map_err(|e| e.error)?;

        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}
