//! Local copy of the last good collection snapshot
//!
//! Used when the memory plugin has nothing to report (game restarted, plugin
//! not ready yet).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::game::MercenariesCollectionInfo;

/// On-disk form of the cached snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedCollection {
    pub saved_at: DateTime<Utc>,
    pub info: MercenariesCollectionInfo,
}

pub struct CollectionCache {
    path: PathBuf,
}

impl CollectionCache {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached snapshot, if any
    pub fn load(&self) -> Option<MercenariesCollectionInfo> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                debug!("Collection cache not found or unreadable: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<CachedCollection>(&content) {
            Ok(cached) => {
                debug!(
                    "Loaded cached collection: {} mercenaries, {} visitors, saved_at={}",
                    cached.info.mercenaries.len(),
                    cached.info.visitors.len(),
                    cached.saved_at.to_rfc3339()
                );
                Some(cached.info)
            }
            Err(e) => {
                warn!("Failed to parse collection cache: {}", e);
                None
            }
        }
    }

    /// Save a snapshot.
    ///
    /// Snapshots without mercenaries are not cached; returns whether the file was written.
    pub fn save(&self, info: &MercenariesCollectionInfo) -> Result<bool> {
        if !info.has_mercenaries() {
            debug!("Not caching collection without mercenaries");
            return Ok(false);
        }

        let cached = CachedCollection {
            saved_at: Utc::now(),
            info: info.clone(),
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(&cached)?)?;
        info!("Saved collection cache to {}", self.path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Mercenary, TaskStatus, VisitorRecord};
    use tempfile::TempDir;

    fn sample_info() -> MercenariesCollectionInfo {
        MercenariesCollectionInfo {
            mercenaries: vec![Mercenary {
                id: 18,
                level: 12,
                owned: true,
                ..Default::default()
            }],
            visitors: vec![VisitorRecord::new(100, TaskStatus::InProgress)],
            ..Default::default()
        }
    }

    #[test]
    fn test_cache_save_and_load() {
        let dir = TempDir::new().unwrap();
        let cache = CollectionCache::new(dir.path().join("collection.json"));

        assert!(cache.save(&sample_info()).unwrap());
        assert_eq!(cache.load(), Some(sample_info()));
    }

    #[test]
    fn test_cache_skips_empty_collection() {
        let dir = TempDir::new().unwrap();
        let cache = CollectionCache::new(dir.path().join("collection.json"));

        let empty = MercenariesCollectionInfo {
            visitors: vec![VisitorRecord::new(1, TaskStatus::Complete)],
            ..Default::default()
        };
        assert!(!cache.save(&empty).unwrap());
        assert!(!cache.path().exists());
        assert_eq!(cache.load(), None);
    }

    #[test]
    fn test_cache_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("collection.json");
        fs::write(&path, "garbage").unwrap();

        assert_eq!(CollectionCache::new(&path).load(), None);
    }
}
