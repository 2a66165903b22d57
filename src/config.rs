//! The fvm config store backed by `<home>/config.yaml`.
//!
//! Values come from two layers: the file itself, and runtime overrides that
//! live only in memory. Overrides win on lookup and are never written back,
//! which is how the resolved `FVM_HOME` is exposed without leaking to disk.

use crate::error::{HomeError, Result};
use crate::store;
use serde_yml::{Mapping, Value};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Make sure `path` is a regular config file, creating an empty one if absent.
///
/// A directory or symbolic link at `path` is rejected.
pub fn confirm_config_file(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => Err(HomeError::ConfigNotFile {
            path: path.to_path_buf(),
            what: "directory",
        }),
        Ok(meta) if meta.file_type().is_symlink() => Err(HomeError::ConfigNotFile {
            path: path.to_path_buf(),
            what: "symlink",
        }),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            File::create(path)
                .and_then(|f| f.sync_all())
                .map_err(|source| HomeError::ConfigCreate {
                    path: path.to_path_buf(),
                    source,
                })?;
            info!(path = %path.display(), "created fvm config file");
            Ok(())
        }
        Err(source) => Err(HomeError::ConfigRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// In-memory key/value view of the fvm config file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    values: Mapping,
    overrides: Mapping,
}

impl ConfigStore {
    /// Parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let values = store::read_mapping(path)?;
        debug!(path = %path.display(), keys = values.len(), "loaded fvm config");
        Ok(Self {
            path: path.to_path_buf(),
            values,
            overrides: Mapping::new(),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a value. Runtime overrides shadow file values.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.overrides.get(key).or_else(|| self.values.get(key))
    }

    /// Look up a scalar value rendered as a string.
    ///
    /// Returns `None` for missing keys, nulls, sequences and mappings.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// All string keys from both layers, sorted and deduplicated.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .overrides
            .keys()
            .chain(self.values.keys())
            .filter_map(|k| k.as_str().map(str::to_string))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Set a file-backed value. Takes effect on disk after [`save`](Self::save).
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.values.insert(Value::from(key), value.into());
    }

    /// Remove a file-backed value, returning it.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Set an in-memory override that is never persisted.
    pub fn set_override(&mut self, key: &str, value: impl Into<Value>) {
        self.overrides.insert(Value::from(key), value.into());
    }

    /// Write file-backed values to the config file. Overrides are skipped.
    pub fn save(&self) -> Result<()> {
        store::write_atomic(&self.path, &self.values)?;
        info!(path = %self.path.display(), keys = self.values.len(), "saved fvm config");
        Ok(())
    }
}
