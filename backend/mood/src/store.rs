//! # Durable Key-Value Storage
//!
//! String keys to string values, the same shape as browser local storage.
//!
//! - [`MemoryStore`]: process lifetime only, used by tests and embedders
//! - [`FileStore`]: one JSON object on disk, merged and replaced on every `set`
//!
//! Neither store expires anything. Writers sharing a file serialize on a
//! `<file>.lock` sidecar; writes to the same key are last-write-wins.
use std::{
    collections::HashMap,
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use fd_lock::RwLock;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::Result;

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<()>;
}

fn lock(entries: &Mutex<HashMap<String, String>>) -> MutexGuard<'_, HashMap<String, String>> {
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = lock(&self.entries).keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock_path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

fn load(path: &Path) -> Result<Option<HashMap<String, String>>> {
    if !path.exists() {
        return Ok(None);
    }

    let data = fs::read(path)?;
    if data.is_empty() {
        return Ok(Some(HashMap::new()));
    }

    Ok(Some(serde_json::from_slice(&data)?))
}

impl FileStore {
    /// Loads `path` if it exists, otherwise starts empty and creates it on first write.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let entries = load(&path)?.unwrap_or_else(|| {
            debug!("Store {} not found, starting empty", path.display());
            HashMap::new()
        });

        let mut lock_name = path.as_os_str().to_owned();
        lock_name.push(".lock");

        Ok(Self {
            path,
            lock_path: PathBuf::from(lock_name),
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the file through a sibling temp file so readers never see a partial write.
    fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, entries)?;
        file.as_file().sync_all()?;
        file.persist(&self.path).map_err(|e| e.error)?;

        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    /// Re-reads the file under an exclusive lock, so keys written by other handles
    /// survive. The cache only changes once the new file is in place.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = lock(&self.entries);

        let write = || -> Result<HashMap<String, String>> {
            let lock_file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&self.lock_path)?;
            let mut file_lock = RwLock::new(lock_file);
            let _guard = file_lock.write()?;

            let mut merged = load(&self.path)?.unwrap_or_else(|| entries.clone());
            merged.insert(key.to_string(), value.to_string());

            self.persist(&merged)?;
            Ok(merged)
        };

        match write() {
            Ok(merged) => {
                *entries = merged;
                Ok(())
            }
            Err(e) => {
                warn!("Failed to write store {}: {e}", self.path.display());
                Err(e)
            }
        }
    }
}
