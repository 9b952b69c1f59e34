//! Core PreferenceStore implementation

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Flat key-value preference record
pub type Preferences = Map<String, Value>;

/// Errors raised while persisting preferences
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write preferences to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// Preference memory backed by a single JSON document
///
/// The whole document is read when the store is opened and rewritten
/// wholesale on every save. There is no merge with the on-disk copy.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    data: Preferences,
}

impl PreferenceStore {
    /// Open the store at `path`
    ///
    /// A missing file, an unreadable file, or a document that is not a JSON
    /// object all open as an empty store.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        debug!(?path, "PreferenceStore::open: called");
        let data = load(&path);
        info!(path = %path.display(), keys = data.len(), "Opened preference store");
        Self { path, data }
    }

    /// Location of the backing document
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Snapshot of every stored preference
    pub fn all(&self) -> Preferences {
        self.data.clone()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Set a single key and persist
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Result<(), StoreError> {
        let key = key.into();
        debug!(%key, "PreferenceStore::set: called");
        self.data.insert(key, value);
        self.save()
    }

    /// Merge `prefs` over the stored keys and persist
    pub fn update(&mut self, prefs: Preferences) -> Result<(), StoreError> {
        debug!(incoming = prefs.len(), "PreferenceStore::update: called");
        self.data.extend(prefs);
        self.save()
    }

    /// Drop every key and persist the empty document
    pub fn clear(&mut self) -> Result<(), StoreError> {
        debug!("PreferenceStore::clear: called");
        self.data.clear();
        self.save()
    }

    /// Write the in-memory document to disk, replacing whatever is there
    pub fn save(&self) -> Result<(), StoreError> {
        debug!(path = %self.path.display(), "PreferenceStore::save: called");
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

fn load(path: &Path) -> Preferences {
    if !path.exists() {
        debug!(?path, "load: no preference file, starting empty");
        return Preferences::new();
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read preferences, starting empty");
            return Preferences::new();
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            warn!(path = %path.display(), kind = ?other, "Preference document is not an object, starting empty");
            Preferences::new()
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to parse preferences, starting empty");
            Preferences::new()
        }
    }
}
