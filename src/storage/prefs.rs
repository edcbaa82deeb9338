//! Per-project preference store
//!
//! Each entry is a single file `<key>.json` under `CustomProjectPrefs/`,
//! next to the project's data directory. Values are plain text; typed
//! records go through serde_json on top of the text layer.
//!
//! Nothing is cached: every read and write goes straight to disk. There is
//! no locking, so two processes writing the same key end up last-writer-wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Name of the store directory, created next to the project's data directory
pub const PREFS_DIR_NAME: &str = "CustomProjectPrefs";

/// File extension of every entry
pub const ENTRY_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to create preference directory {}", path.display())]
    CreateRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid preference key: {0:?}")]
    InvalidKey(String),

    #[error("Failed to read preference '{key}'")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write preference '{key}'")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("Malformed data in preference '{key}'")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize preference '{key}'")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A structured value that owns one entry in the store
///
/// The default value is what a reader gets back when nothing has been
/// saved yet.
pub trait Record: Serialize + DeserializeOwned + Default {
    /// Key of the entry holding this record
    const KEY: &'static str;
}

/// Key-value store backed by one JSON file per key
#[derive(Debug, Clone)]
pub struct PrefStore {
    root: PathBuf,
}

impl PrefStore {
    /// Resolves the store for a project, creating `CustomProjectPrefs/` if needed
    pub fn resolve(project_root: &Path) -> Result<Self, StoreError> {
        Self::at(project_root.join(PREFS_DIR_NAME))
    }

    /// Opens a store rooted at an explicit directory, creating it if needed
    pub fn at(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();

        fs::create_dir_all(&root).map_err(|source| StoreError::CreateRoot {
            path: root.clone(),
            source,
        })?;

        Ok(Self { root })
    }

    /// Returns the store root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the file backing `key`
    pub fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, ENTRY_EXTENSION)))
    }

    /// Reads the raw text stored under `key`
    ///
    /// Returns `Ok(None)` if the entry has never been written.
    pub fn get_text(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    /// Replaces the text stored under `key`, creating the entry if absent
    pub fn set_text(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;

        fs::write(&path, value).map_err(|source| StoreError::Write {
            key: key.to_string(),
            source,
        })
    }

    /// Reads a record stored under `key`
    ///
    /// A missing or blank entry yields `T::default()`. Malformed JSON is an
    /// error and is never replaced by the default.
    pub fn get_record<T>(&self, key: &str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let text = match self.get_text(key)? {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok(T::default()),
        };

        serde_json::from_str(&text).map_err(|source| StoreError::Deserialize {
            key: key.to_string(),
            source,
        })
    }

    /// Stores a record under `key` as pretty-printed JSON
    pub fn set_record<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;

        self.set_text(key, &text)
    }

    /// Loads a record from its own entry
    pub fn load<R: Record>(&self) -> Result<R, StoreError> {
        self.get_record(R::KEY)
    }

    /// Saves a record to its own entry
    pub fn save<R: Record>(&self, record: &R) -> Result<(), StoreError> {
        self.set_record(R::KEY, record)
    }

    /// Lists the keys of all entries, sorted
    ///
    /// Files without the entry extension are left alone.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(&self.root).map_err(|source| StoreError::Read {
            key: "*".to_string(),
            source,
        })?;

        let mut keys: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|e| e == ENTRY_EXTENSION))
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect();

        keys.sort();
        Ok(keys)
    }
}

/// Keys map straight to file names, so they must stay inside the root
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}
