//! Local key-value persistence.
//!
//! Chat history and reminder timestamps survive restarts through a small
//! JSON document on disk: read once on open, rewritten on every change.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {0} is not a JSON object")]
    Corrupt(PathBuf),

    #[error("invalid value for key '{key}': {source}")]
    Value {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A string-keyed store of JSON values.
pub trait KeyValueStore {
    fn get_value(&self, key: &str) -> Option<&Value>;

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Read and deserialize a key; `Ok(None)` if absent.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        Self: Sized,
    {
        match self.get_value(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| StoreError::Value {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Serialize and write a key.
    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StoreError>
    where
        Self: Sized,
    {
        let value = serde_json::to_value(value).map_err(|source| StoreError::Value {
            key: key.to_string(),
            source,
        })?;
        self.set_value(key, value)
    }
}

/// Store backed by a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Map<String, Value>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                _ => return Err(StoreError::Corrupt(path)),
            }
        } else {
            debug!("No state file at {}, starting empty", path.display());
            Map::new()
        };

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole document to a temp file beside the target, then
    /// rename it over the target.
    fn persist(&self) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_err)?;

        let content = serde_json::to_string_pretty(&self.data).map_err(|source| {
            StoreError::Value {
                key: String::new(),
                source,
            }
        })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(content.as_bytes()).map_err(io_err)?;
        tmp.flush().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.data.insert(key.to_string(), value);
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if self.data.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

/// Non-persistent store.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Map<String, Value>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.data.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.data.remove(key);
        Ok(())
    }
}
