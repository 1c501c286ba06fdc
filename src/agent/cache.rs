//! Bounded cache of loaded agent configs.

use super::AgentConfig;
use crate::error::{AgentError, Result};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// Default number of configs kept before the least recently used is evicted.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Loaded configs keyed by canonical path.
///
/// Cached configs carry the canonical path in [`AgentConfig::path`].
/// Equivalent spellings of the same file (`a/./x.agent.md`, `a/x.agent.md`)
/// share an entry. Entries are never refreshed from disk; call
/// [`ConfigCache::clear`] after editing agent files.
#[derive(Debug)]
pub struct ConfigCache {
    entries: Mutex<LruCache<PathBuf, Arc<AgentConfig>>>,
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<PathBuf, Arc<AgentConfig>>> {
        // A panic while holding the lock cannot leave the map half-written.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn canonical(path: &Path) -> Result<PathBuf> {
        if !path.exists() {
            return Err(AgentError::NotFound(path.to_path_buf()));
        }
        path.canonicalize().map_err(|e| AgentError::io(path, e))
    }

    /// Return the cached config for `path`, loading it on a miss.
    pub fn get_or_load(&self, path: impl AsRef<Path>) -> Result<Arc<AgentConfig>> {
        let key = Self::canonical(path.as_ref())?;

        if let Some(config) = self.lock().get(&key).cloned() {
            tracing::trace!(path = %key.display(), "agent config cache hit");
            return Ok(config);
        }

        let config = Arc::new(AgentConfig::load(&key)?);
        if let Some((evicted, _)) = self.lock().push(key.clone(), Arc::clone(&config))
            && evicted != key
        {
            tracing::trace!(path = %evicted.display(), "evicted agent config");
        }
        Ok(config)
    }

    /// Whether `path` is cached. Paths that do not exist are never cached.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        match path.as_ref().canonicalize() {
            Ok(key) => self.lock().contains(&key),
            Err(_) => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every cached config.
    pub fn clear(&self) {
        self.lock().clear();
        tracing::debug!("agent config cache cleared");
    }
}
