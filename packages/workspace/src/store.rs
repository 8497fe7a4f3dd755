//! Key/value storage for serialized documents.
//!
//! A store only moves strings. Serialization, validation and fallback live in
//! `persist`.

use crate::error::{PersistenceError, Result};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

pub trait DocumentStore: Send + Sync {
    /// Contents stored under `key`, or `None` if nothing was ever written
    fn read(&self, key: &str) -> Result<Option<String>>;

    fn write(&self, key: &str, contents: &str) -> Result<()>;
}

/// One `<key>.json` file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl DocumentStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::Io {
                operation: "read",
                path,
                source: e,
            }),
        }
    }

    /// Temp file + rename, so a crash mid-write never leaves a truncated
    /// document behind
    fn write(&self, key: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| PersistenceError::Io {
            operation: "create directory",
            path: self.root.clone(),
            source: e,
        })?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        let mut file = File::create(&temp_path).map_err(|e| PersistenceError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .and_then(|_| file.sync_all())
            .map_err(|e| PersistenceError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        fs::rename(&temp_path, &path).map_err(|e| PersistenceError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// In-memory store; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryEntries>>,
}

#[derive(Debug, Default)]
struct MemoryEntries {
    entries: HashMap<String, String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `contents` under `key`
    pub fn with_entry(key: &str, contents: impl Into<String>) -> Self {
        let store = Self::new();
        store.lock().entries.insert(key.to_string(), contents.into());
        store
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> MutexGuard<'_, MemoryEntries> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().entries.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let mut inner = self.lock();
        inner.entries.insert(key.to_string(), contents.to_string());
        inner.writes += 1;
        Ok(())
    }
}
