//! Cache of loaded source tables.
//!
//! Loading and normalizing a season of daily exports for every region is
//! the slow part of a dashboard session; detection itself is cheap. The
//! cache keeps loaded readings keyed by source path and asks an
//! [`InvalidationPolicy`] whether an entry is still valid before
//! returning it.

use crate::error::Result;
use crate::reading::Reading;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// Decides whether a cached table still reflects its source.
pub trait InvalidationPolicy {
    /// Name of this policy (for logging)
    fn name(&self) -> &str;

    /// Fingerprint of the source as it is now. An entry is reused only
    /// when its stored fingerprint equals the current one; `None` means
    /// the source must always be reloaded.
    fn fingerprint(&self, path: &Path) -> Result<Option<Fingerprint>>;
}

/// Identity of a source at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub modified: Option<SystemTime>,
    pub len: u64,
}

/// Reuse an entry while the file's modification time and length are unchanged.
///
/// For directories the fingerprint combines every entry's metadata, so
/// adding, removing or touching a region file invalidates the cache.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModifiedTime;

impl InvalidationPolicy for ModifiedTime {
    fn name(&self) -> &str {
        "modified-time"
    }

    fn fingerprint(&self, path: &Path) -> Result<Option<Fingerprint>> {
        let meta = std::fs::metadata(path)?;
        if !meta.is_dir() {
            return Ok(Some(Fingerprint {
                modified: meta.modified().ok(),
                len: meta.len(),
            }));
        }
        let mut latest = meta.modified().ok();
        let mut len = 0u64;
        for entry in std::fs::read_dir(path)? {
            let entry_meta = entry?.metadata()?;
            len += entry_meta.len() + 1;
            let modified = entry_meta.modified().ok();
            if modified > latest {
                latest = modified;
            }
        }
        Ok(Some(Fingerprint {
            modified: latest,
            len,
        }))
    }
}

/// Never reuse an entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysReload;

impl InvalidationPolicy for AlwaysReload {
    fn name(&self) -> &str {
        "always-reload"
    }

    fn fingerprint(&self, _path: &Path) -> Result<Option<Fingerprint>> {
        Ok(None)
    }
}

struct CacheEntry {
    fingerprint: Fingerprint,
    readings: Arc<Vec<Reading>>,
}

/// Loaded readings keyed by source path.
pub struct SourceCache<P: InvalidationPolicy> {
    policy: P,
    entries: HashMap<PathBuf, CacheEntry>,
}

impl<P: InvalidationPolicy> SourceCache<P> {
    pub fn new(policy: P) -> Self {
        SourceCache {
            policy,
            entries: HashMap::new(),
        }
    }

    /// Return the cached readings for `path`, calling `load` when there is
    /// no entry or the policy reports the source changed.
    pub fn get_or_load<F>(&mut self, path: &Path, load: F) -> Result<Arc<Vec<Reading>>>
    where
        F: FnOnce(&Path) -> Result<Vec<Reading>>,
    {
        let fingerprint = self.policy.fingerprint(path)?;
        if let (Some(current), Some(entry)) = (&fingerprint, self.entries.get(path)) {
            if entry.fingerprint == *current {
                log::debug!("[HW] cache: hit for {}", path.display());
                return Ok(Arc::clone(&entry.readings));
            }
        }

        log::debug!(
            "[HW] cache: loading {} (policy: {})",
            path.display(),
            self.policy.name()
        );
        let readings = Arc::new(load(path)?);
        match fingerprint {
            Some(fingerprint) => {
                self.entries.insert(
                    path.to_path_buf(),
                    CacheEntry {
                        fingerprint,
                        readings: Arc::clone(&readings),
                    },
                );
            }
            None => {
                self.entries.remove(path);
            }
        }
        Ok(readings)
    }

    /// Drop the entry for one source.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drop every entry.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
