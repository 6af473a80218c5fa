//! JSON-file preference store.
//!
//! Stands in for the mobile app's key-value storage. One flat string map,
//! pretty-printed so the file is hand-editable during development.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use eyre::WrapErr;
use lockkit_core::{PreferenceStore, StoreError, StoreResult};

pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Opens the store at `path`, or at the default location under the
    /// user config dir when no path is given. A missing file is an empty
    /// store; a corrupt one is an error rather than silent data loss.
    pub fn open(path: Option<PathBuf>) -> eyre::Result<Self> {
        let path = match path {
            Some(path) => path,
            None => default_path()?,
        };
        let values = if path.exists() {
            let bytes = fs::read(&path)
                .wrap_err_with(|| format!("failed to read store file {}", path.display()))?;
            serde_json::from_slice(&bytes)
                .wrap_err_with(|| format!("store file {} is not valid JSON", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    fn guard(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> StoreResult<()> {
        let json = serde_json::to_vec_pretty(values)
            .map_err(|err| StoreError::Write(err.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| StoreError::Write(err.to_string()))?;
        }
        fs::write(&self.path, json).map_err(|err| StoreError::Write(err.to_string()))
    }
}

impl PreferenceStore for JsonFileStore {
    fn get(&self, key: String) -> StoreResult<Option<String>> {
        Ok(self.guard().get(&key).cloned())
    }

    fn set(&self, key: String, value: String) -> StoreResult<()> {
        let mut values = self.guard();
        values.insert(key, value);
        self.persist(&values)
    }

    fn remove(&self, key: String) -> StoreResult<()> {
        let mut values = self.guard();
        values.remove(&key);
        self.persist(&values)
    }
}

fn default_path() -> eyre::Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("lockkit").join("preferences.json"))
        .ok_or_else(|| eyre::eyre!("no user config directory available; pass --store"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_survive_a_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");

        let store = JsonFileStore::open(Some(path.clone())).expect("open");
        store
            .set("lockkit.auto_lock_seconds".to_string(), "300".to_string())
            .expect("set");

        let store = JsonFileStore::open(Some(path)).expect("reopen");
        assert_eq!(
            store
                .get("lockkit.auto_lock_seconds".to_string())
                .expect("get"),
            Some("300".to_string())
        );
    }

    #[test]
    fn test_missing_file_is_an_empty_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store =
            JsonFileStore::open(Some(dir.path().join("absent.json"))).expect("open");
        assert_eq!(store.get("lockkit.pin".to_string()).expect("get"), None);
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");

        let store = JsonFileStore::open(Some(path.clone())).expect("open");
        store
            .set("lockkit.pin".to_string(), "4321".to_string())
            .expect("set");
        store.remove("lockkit.pin".to_string()).expect("remove");

        let store = JsonFileStore::open(Some(path)).expect("reopen");
        assert_eq!(store.get("lockkit.pin".to_string()).expect("get"), None);
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("preferences.json");
        fs::write(&path, b"not json").expect("write");

        assert!(JsonFileStore::open(Some(path)).is_err());
    }
}
