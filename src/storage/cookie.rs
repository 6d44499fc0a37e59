//! Cookie-jar store
//!
//! Mirrors how a browser session keeps uploaded data in a cookie: values are
//! capped at 4 KB and expire after seven days. The jar can optionally be
//! persisted to a JSON file so it survives between runs.

use super::RecordStore;
use crate::core::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Largest cookie value accepted, in bytes
pub const COOKIE_VALUE_LIMIT: usize = 4096;

/// Cookie lifetime (7 days)
pub const COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// A single stored cookie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires_at: DateTime<Utc>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: String,
}

impl Cookie {
    pub fn new(name: &str, value: &str, now: DateTime<Utc>) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            expires_at: now + Duration::seconds(COOKIE_MAX_AGE_SECS),
            http_only: true,
            secure: true,
            same_site: "Strict".to_string(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Cookie jar implementing the record store contract
#[derive(Debug, Default)]
pub struct CookieStore {
    jar: HashMap<String, Cookie>,
    jar_file: Option<PathBuf>,
}

impl CookieStore {
    /// In-memory jar
    pub fn new() -> Self {
        Self::default()
    }

    /// Jar persisted to `path`, loading any unexpired cookies already there
    pub fn with_jar_file(path: PathBuf) -> Result<Self> {
        let mut jar: HashMap<String, Cookie> = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)
                .map_err(|e| Error::Storage(format!("Corrupt cookie jar {}: {}", path.display(), e)))?
        } else {
            HashMap::new()
        };

        let now = Utc::now();
        jar.retain(|_, cookie| !cookie.is_expired_at(now));

        Ok(Self {
            jar,
            jar_file: Some(path),
        })
    }

    /// Value of `name` as seen at `now`
    pub fn read_at(&self, name: &str, now: DateTime<Utc>) -> Option<&Cookie> {
        self.jar.get(name).filter(|cookie| !cookie.is_expired_at(now))
    }

    /// Store a cookie issued at `now`
    pub fn write_at(&mut self, name: &str, value: &str, now: DateTime<Utc>) -> Result<()> {
        if value.len() > COOKIE_VALUE_LIMIT {
            return Err(Error::Storage(format!(
                "Cookie `{}` is {} bytes, limit is {}",
                name,
                value.len(),
                COOKIE_VALUE_LIMIT
            )));
        }

        self.jar.insert(name.to_string(), Cookie::new(name, value, now));
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.jar_file else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.jar)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}

impl RecordStore for CookieStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_at(key, Utc::now()).map(|cookie| cookie.value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.write_at(key, value, Utc::now())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let removed = self.jar.remove(key).is_some();
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    fn capacity(&self) -> Option<usize> {
        Some(COOKIE_VALUE_LIMIT)
    }

    fn name(&self) -> &str {
        "cookie store"
    }
}
