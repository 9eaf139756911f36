//! Client-local draft storage.
//!
//! Everything stored here is a disposable cache: the server snapshot is
//! always authoritative, and backend failures are logged and ignored.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use tracing::warn;

use crate::errors::StorageError;

pub const STORE_ID_STORAGE_KEY: &str = "kasetfair-active-store-id";
pub const CLUB_INFO_STORAGE_KEY: &str = "kasetfair-club-info-draft";

/// String key-value backend with synchronous access.
pub trait KeyValueStore {
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store; clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// JSON file holding a flat string map; used by the CLI host.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_vec_pretty(entries)?)?;
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Browser session storage, scoped to the tab like the web app's drafts.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionStore;

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        use gloo_storage::{SessionStorage, Storage};
        SessionStorage::raw()
            .get_item(key)
            .map_err(|_| StorageError::Backend(format!("could not read {key}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        use gloo_storage::{SessionStorage, Storage};
        SessionStorage::raw()
            .set_item(key, value)
            .map_err(|_| StorageError::Backend(format!("could not write {key}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        use gloo_storage::{SessionStorage, Storage};
        SessionStorage::delete(key);
        Ok(())
    }
}

/// Club-info draft as cached between reloads. Attached file bytes are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedClubInfo {
    pub organization_name: String,
    pub president_first_name: String,
    pub president_last_name: String,
    pub president_nisit_id: String,
    pub president_email: String,
    pub president_phone: String,
    #[serde(default)]
    pub application_file_name: Option<String>,
    #[serde(default)]
    pub club_application_media_id: Option<String>,
}

/// Store-scoped view over a [`KeyValueStore`].
///
/// Draft keys carry the active store id so one store's draft never leaks
/// into another's.
#[derive(Debug, Clone)]
pub struct DraftCache<S> {
    store: S,
}

impl<S: KeyValueStore> DraftCache<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn backend(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn active_store_id(&self) -> Option<i64> {
        self.read(STORE_ID_STORAGE_KEY)
            .and_then(|raw| raw.trim().parse().ok())
    }

    pub fn set_active_store_id(&self, store_id: i64) {
        self.write(STORE_ID_STORAGE_KEY, &store_id.to_string());
    }

    pub fn clear_active_store_id(&self) {
        self.delete(STORE_ID_STORAGE_KEY);
    }

    /// Cached club-info draft for the active store.
    #[must_use]
    pub fn load_club_info(&self) -> Option<CachedClubInfo> {
        let key = self.club_info_key()?;
        let raw = self.read(&key)?;
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(err) => {
                warn!(%key, error = %err, "failed to restore club info draft");
                None
            }
        }
    }

    /// Caches the club-info draft; a no-op without an active store.
    pub fn save_club_info(&self, draft: &CachedClubInfo) {
        let Some(key) = self.club_info_key() else {
            return;
        };
        match serde_json::to_string(draft) {
            Ok(raw) => self.write(&key, &raw),
            Err(err) => warn!(%key, error = %err, "failed to persist club info draft"),
        }
    }

    pub fn clear_club_info(&self) {
        if let Some(key) = self.club_info_key() {
            self.delete(&key);
        }
    }

    fn club_info_key(&self) -> Option<String> {
        self.active_store_id()
            .map(|store_id| format!("{CLUB_INFO_STORAGE_KEY}-{store_id}"))
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).unwrap_or_else(|err| {
            warn!(%key, error = %err, "draft cache read failed");
            None
        })
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(%key, error = %err, "draft cache write failed");
        }
    }

    fn delete(&self, key: &str) {
        if let Err(err) = self.store.remove(key) {
            warn!(%key, error = %err, "draft cache delete failed");
        }
    }
}
