//! Record storage
//!
//! Uploaded records are kept in a keyed store. Three backends implement the
//! same contract ("store a value under a key, read the same value back"):
//! - File: one JSON file per key
//! - Cookie: a size-limited cookie jar with expiry
//! - Browser local: a localStorage-style SQLite table

mod cookie;
mod file;
mod local;

pub use cookie::{Cookie, CookieStore, COOKIE_MAX_AGE_SECS, COOKIE_VALUE_LIMIT};
pub use file::FileStore;
pub use local::BrowserLocalStore;

use crate::core::{Config, DailyRecord, Error, Result, StorageBackend};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A durable keyed string store
pub trait RecordStore {
    /// Get the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Returns whether a value was present.
    fn remove(&mut self, key: &str) -> Result<bool>;

    /// Largest value in bytes the store accepts, if limited
    fn capacity(&self) -> Option<usize> {
        None
    }

    /// Human-readable backend name
    fn name(&self) -> &str;
}

/// Typed access to a record store
pub struct RecordStorage {
    backend: Box<dyn RecordStore + Send>,
}

impl RecordStorage {
    pub fn new(backend: Box<dyn RecordStore + Send>) -> Self {
        Self { backend }
    }

    /// Open the backend selected in the configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let data_dir = config.data_dir()?;
        let backend: Box<dyn RecordStore + Send> = match config.storage.backend {
            StorageBackend::File => Box::new(FileStore::new(&data_dir)?),
            StorageBackend::Cookie => {
                Box::new(CookieStore::with_jar_file(data_dir.join(&config.storage.cookie_jar))?)
            }
            StorageBackend::BrowserLocal => {
                std::fs::create_dir_all(&data_dir)?;
                Box::new(BrowserLocalStore::open(&data_dir.join(&config.storage.local_db))?)
            }
        };

        log::info!("Using {} for record storage", backend.name());
        Ok(Self::new(backend))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Read and deserialize the value under `key`, falling back when absent
    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Result<T> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| Error::Serialization(format!("Failed to decode `{}`: {}", key, e))),
            None => Ok(fallback),
        }
    }

    /// Serialize and store `value` under `key`
    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).map_err(|e| Error::Serialization(e.to_string()))?;
        self.backend.set(key, &raw)
    }

    pub fn remove(&mut self, key: &str) -> Result<bool> {
        self.backend.remove(key)
    }

    /// Load the record set stored under `key` (empty when nothing is stored)
    pub fn load_records(&self, key: &str) -> Result<Vec<DailyRecord>> {
        self.get(key, Vec::new())
    }

    /// Store a record set under `key`
    ///
    /// Size-limited backends receive only dates and totals when the full
    /// records do not fit.
    pub fn save_records(&mut self, key: &str, records: &[DailyRecord]) -> Result<()> {
        let raw = serde_json::to_string(records).map_err(|e| Error::Serialization(e.to_string()))?;

        let Some(limit) = self.backend.capacity() else {
            return self.backend.set(key, &raw);
        };
        if raw.len() <= limit {
            return self.backend.set(key, &raw);
        }

        let minimal: Vec<DailyRecord> = records.iter().map(DailyRecord::minimal).collect();
        let raw = serde_json::to_string(&minimal).map_err(|e| Error::Serialization(e.to_string()))?;
        if raw.len() > limit {
            return Err(Error::Storage(format!(
                "{} records need {} bytes, {} holds at most {}",
                records.len(),
                raw.len(),
                self.backend.name(),
                limit
            )));
        }

        log::warn!(
            "Record set too large for {} ({} byte limit), storing dates and totals only",
            self.backend.name(),
            limit
        );
        self.backend.set(key, &raw)
    }
}
