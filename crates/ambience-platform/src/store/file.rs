//! JSON-file-backed store for native hosts.
//!
//! The whole map is rewritten on every mutation using an atomic write
//! (write to `.tmp`, then rename) so a crash never leaves a torn file.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use ambience_common::StoreError;
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::paths;

pub struct FileStore {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file starts empty; an
    /// unparsable one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => parse_entries(&path, &content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StoreError::Io(format!(
                    "failed to read {}: {e}",
                    path.display()
                )))
            }
        };

        debug!(path = %path.display(), entries = entries.len(), "Preference file opened");
        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    /// Open the store at the platform default location.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = paths::preferences_file().map_err(|e| StoreError::Io(e.to_string()))?;
        Self::open(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!(
                    "failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json).map_err(|e| {
            StoreError::Io(format!("failed to write {}: {e}", tmp_path.display()))
        })?;

        if let Err(e) = std::fs::rename(&tmp_path, &self.path) {
            // Rename can fail on Windows when the target is open; write in place.
            warn!("atomic rename failed ({e}), falling back to direct write");
            std::fs::write(&self.path, &json).map_err(|e2| {
                StoreError::Io(format!("failed to write {}: {e2}", self.path.display()))
            })?;
        }

        debug!(path = %self.path.display(), "Preferences saved to disk");
        Ok(())
    }

    /// Apply `change` and persist; on a failed write the in-memory map is
    /// restored so memory never runs ahead of disk.
    fn mutate(
        &self,
        key: &str,
        change: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), StoreError> {
        let mut entries = self.entries.borrow_mut();
        let previous = entries.clone();
        change(&mut entries);
        if let Err(e) = self.flush(&entries) {
            *entries = previous;
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: e.to_string(),
            });
        }
        Ok(())
    }
}

fn parse_entries(path: &Path, content: &str) -> BTreeMap<String, String> {
    match serde_json::from_str::<serde_json::Value>(content) {
        Ok(serde_json::Value::Object(map)) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(text) => Some((key, text)),
                serde_json::Value::Null => None,
                other => Some((key, other.to_string())),
            })
            .collect(),
        Ok(_) => {
            warn!(path = %path.display(), "preference file is not a JSON object, starting empty");
            BTreeMap::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "preference file unreadable, starting empty");
            BTreeMap::new()
        }
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.mutate(key, |entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.mutate(key, |entries| {
            entries.remove(key);
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.mutate("*", BTreeMap::clear)
    }
}
