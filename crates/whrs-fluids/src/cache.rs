//! Memoizing property lookup cache.
//!
//! Property queries are pure functions of their arguments, so results are
//! never invalidated. Under [`CachePolicy::File`] the memo is read once at
//! construction and written back wholesale at every [`PropertyCache::save`].

use crate::engine::PropertyEngine;
use crate::error::{FluidError, FluidResult};
use crate::query::PropertyQuery;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// What to do with property calls.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Every lookup calls the engine.
    None,
    /// Results are memoized for the lifetime of the cache.
    #[default]
    Memory,
    /// Like `Memory`, loaded from and saved to a JSON file.
    File(PathBuf),
}

#[derive(Serialize, Deserialize)]
struct CacheEntry {
    query: PropertyQuery,
    value: f64,
}

/// Property cache wrapping a [`PropertyEngine`].
pub struct PropertyCache<E> {
    engine: E,
    policy: CachePolicy,
    entries: HashMap<PropertyQuery, f64>,
    hits: u64,
    misses: u64,
}

impl<E: PropertyEngine> PropertyCache<E> {
    /// Create a cache, loading persisted entries under the file policy.
    ///
    /// A missing file yields an empty cache; an unreadable or malformed file
    /// is an error.
    pub fn new(engine: E, policy: CachePolicy) -> FluidResult<Self> {
        let entries = match &policy {
            CachePolicy::File(path) => load_entries(path)?,
            CachePolicy::None | CachePolicy::Memory => HashMap::new(),
        };

        Ok(Self {
            engine,
            policy,
            entries,
            hits: 0,
            misses: 0,
        })
    }

    /// Resolve a query, calling the engine at most once per distinct query.
    ///
    /// Engine failures are logged and returned unchanged; they are not cached.
    pub fn lookup(&mut self, query: &PropertyQuery) -> FluidResult<f64> {
        if let Some(&v) = self.entries.get(query) {
            self.hits += 1;
            return Ok(v);
        }

        self.misses += 1;
        let value = match self.engine.compute(query) {
            Ok(v) => v,
            Err(e) => {
                error!(engine = self.engine.name(), %query, "property lookup failed: {e}");
                return Err(e);
            }
        };

        if self.policy != CachePolicy::None {
            self.entries.insert(query.clone(), value);
        }
        Ok(value)
    }

    /// Write the memo to disk. No-op unless the policy is `File`.
    pub fn save(&self) -> FluidResult<()> {
        let CachePolicy::File(path) = &self.policy else {
            return Ok(());
        };

        let entries: Vec<CacheEntry> = self
            .entries
            .iter()
            .map(|(query, &value)| CacheEntry {
                query: query.clone(),
                value,
            })
            .collect();

        let json = serde_json::to_string(&entries).map_err(|e| persistence(path, e))?;
        // Readers only ever see the old file or the complete new one.
        let tmp = staging_path(path);
        fs::write(&tmp, json).map_err(|e| persistence(&tmp, e))?;
        fs::rename(&tmp, path).map_err(|e| persistence(path, e))?;
        debug!(path = %path.display(), entries = entries.len(), "saved property cache");
        Ok(())
    }

    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}

fn load_entries(path: &Path) -> FluidResult<HashMap<PropertyQuery, f64>> {
    if !path.exists() {
        debug!(path = %path.display(), "no persisted property cache");
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path).map_err(|e| persistence(path, e))?;
    let entries: Vec<CacheEntry> =
        serde_json::from_str(&content).map_err(|e| persistence(path, e))?;
    debug!(path = %path.display(), entries = entries.len(), "loaded property cache");

    Ok(entries.into_iter().map(|e| (e.query, e.value)).collect())
}

/// Sibling file a save is written to before it replaces `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn persistence(path: &Path, err: impl std::fmt::Display) -> FluidError {
    FluidError::Persistence {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
