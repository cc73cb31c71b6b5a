//! JSON file-based storage backend.
//!
//! Preferences are kept in memory and written back to disk after every
//! change, using write-to-temp + rename so a crash never leaves a truncated
//! file behind.

use crate::domain::error::{Result, ZmealsError};
use crate::storage::backend::Storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// Top-level structure serialized to disk.
///
/// ```json
/// {
///   "version": 1,
///   "updated_at": 1760880000,
///   "preferences": {
///     "darkMode": "true"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    version: u32,

    /// Unix timestamp of the last write.
    #[serde(default)]
    updated_at: Option<i64>,

    #[serde(default)]
    preferences: BTreeMap<String, String>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            updated_at: None,
            preferences: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// `Send` but not `Sync`; owned by the worker thread.
pub struct JsonStorage {
    file_path: PathBuf,
    data: StorageData,
    /// Set when `data` differs from what is on disk.
    dirty: bool,
}

impl JsonStorage {
    /// Opens the storage file, creating parent directories as needed.
    ///
    /// A missing file starts out empty. So does a file that does not parse:
    /// it is logged and overwritten by the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created, or if the
    /// file exists but cannot be read.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            match Self::load_from_file(&file_path) {
                Ok(data) => data,
                Err(ZmealsError::Storage(e)) => {
                    tracing::warn!(path = ?file_path, error = %e, "unparsable preference file, starting empty");
                    StorageData::default()
                }
                Err(e) => return Err(e),
            }
        } else {
            tracing::debug!("no preference file yet, starting empty");
            StorageData::default()
        };

        tracing::debug!(preference_count = data.preferences.len(), "storage initialized");

        Ok(Self {
            file_path,
            data,
            dirty: false,
        })
    }

    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ZmealsError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version != STORAGE_VERSION {
            tracing::warn!(version = data.version, "unexpected preference file version");
        }

        Ok(data)
    }

    /// Writes pending changes atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temp-file write or the rename fails.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        self.data.updated_at = Some(chrono::Utc::now().timestamp());

        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| ZmealsError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        self.dirty = false;
        tracing::debug!(path = ?self.file_path, "preferences saved");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let value = self.data.preferences.get(key).cloned();
        tracing::debug!(key = key, found = value.is_some(), "preference lookup");
        Ok(value)
    }

    fn set_preference(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_set_preference", key = key, value = value).entered();

        if self.data.preferences.get(key).map(String::as_str) == Some(value) {
            tracing::debug!("preference unchanged");
            return Ok(());
        }

        self.data
            .preferences
            .insert(key.to_string(), value.to_string());
        self.dirty = true;
        self.save_to_file()
    }
}

impl Drop for JsonStorage {
    fn drop(&mut self) {
        if self.dirty {
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save preferences on drop");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::preferences::{load_dark_mode, save_dark_mode};
    use tempfile::TempDir;

    #[test]
    fn missing_file_starts_empty() {
        let dir = TempDir::new().expect("tempdir");
        let storage = JsonStorage::new(dir.path().join("nested/preferences.json")).expect("opens");
        assert_eq!(storage.get_preference("darkMode").expect("readable"), None);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn preference_survives_reopen() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("preferences.json");

        {
            let mut storage = JsonStorage::new(path.clone()).expect("opens");
            save_dark_mode(&mut storage, true).expect("writes");
        }

        let storage = JsonStorage::new(path.clone()).expect("reopens");
        assert_eq!(load_dark_mode(&storage).expect("readable"), Some(true));

        let raw = std::fs::read_to_string(&path).expect("file written");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
        assert_eq!(value["preferences"]["darkMode"], "true");
        assert_eq!(value["version"], 1);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn toggling_twice_restores_stored_value() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("preferences.json");
        let mut storage = JsonStorage::new(path).expect("opens");

        save_dark_mode(&mut storage, false).expect("writes");
        save_dark_mode(&mut storage, true).expect("writes");
        save_dark_mode(&mut storage, false).expect("writes");

        assert_eq!(storage.get_preference("darkMode").expect("readable").as_deref(), Some("false"));
    }

    #[test]
    fn corrupt_file_starts_empty_and_is_rewritten() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("preferences.json");
        std::fs::write(&path, "{not json").expect("fixture");

        let mut storage = JsonStorage::new(path.clone()).expect("opens despite corrupt file");
        assert_eq!(load_dark_mode(&storage).expect("readable"), None);

        save_dark_mode(&mut storage, false).expect("writes");
        let raw = std::fs::read_to_string(&path).expect("file written");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("valid json again");
        assert_eq!(value["preferences"]["darkMode"], "false");
    }
}
