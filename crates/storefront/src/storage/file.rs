//! JSON file-backed key-value store.
//!
//! The file holds one JSON object mapping each key to its string value. The
//! map is cached in memory for reads. Every change re-reads the file first,
//! so keys written by another process (such as `pharma-cli`) are kept.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use pharmacart_core::storage::{KeyValueStore, StorageError};

/// Key-value store persisted as a single JSON file.
#[derive(Debug)]
pub struct FileStorage {
    entries: RwLock<BTreeMap<String, String>>,
    path: PathBuf,
}

impl FileStorage {
    /// Open the store at `path`, creating parent directories as needed.
    ///
    /// A missing file starts empty. A file that is not a JSON object of
    /// strings is logged and also treated as empty; it is overwritten on the
    /// next change.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let entries = read_entries(&path)?.unwrap_or_default();

        Ok(Self {
            entries: RwLock::new(entries),
            path,
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the map to a sibling temp file, then rename it over the target.
    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let data = serde_json::to_vec_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn update(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(on_disk) = read_entries(&self.path)? {
            *entries = on_disk;
        }
        f(&mut entries);
        self.save(&entries)
    }
}

/// Read the map from `path`.
///
/// A missing file is `None`. A malformed file is logged and also `None`, so
/// the caller keeps what it has and overwrites the file on the next change.
fn read_entries(path: &Path) -> Result<Option<BTreeMap<String, String>>, StorageError> {
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Storage file is malformed, ignoring its contents");
                Ok(None)
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
