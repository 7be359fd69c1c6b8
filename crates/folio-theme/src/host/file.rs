//! JSON-file backed preference storage.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::PreferenceStore;
use crate::error::StorageError;

/// Stores preferences as a flat JSON object of strings.
///
/// The file is read on every access and rewritten on every write. A missing
/// file reads as empty and is created by the first write; its parent
/// directory must already exist.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let source = match fs::read_to_string(&self.path) {
            Ok(source) => source,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if source.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&source).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        let mut encoded =
            serde_json::to_string_pretty(&entries).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;
        encoded.push('\n');
        fs::write(&self.path, encoded).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}
