use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::game::{MercenariesCollectionInfo, SceneMode};

/// Source of Mercenaries collection snapshots.
///
/// `Ok(None)` means the source has nothing to report right now.
pub trait CollectionInfoProvider {
    fn collection_info(&self) -> Result<Option<MercenariesCollectionInfo>>;
}

/// Reads the snapshot the memory plugin dumps to disk
pub struct SnapshotFileProvider {
    path: PathBuf,
}

impl SnapshotFileProvider {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CollectionInfoProvider for SnapshotFileProvider {
    fn collection_info(&self) -> Result<Option<MercenariesCollectionInfo>> {
        let content = match read_optional(&self.path)? {
            Some(c) => c,
            None => {
                debug!("No memory snapshot at {}", self.path.display());
                return Ok(None);
            }
        };

        let content = content.trim();
        if content.is_empty() || content == "null" {
            return Ok(None);
        }

        serde_json::from_str(content).map(Some).map_err(|e| {
            Error::ProviderFailed(format!("invalid snapshot {}: {}", self.path.display(), e))
        })
    }
}

/// Read the current scene written by the memory plugin.
///
/// The file holds a single scene, numeric or by name. Missing or empty file
/// yields `None`.
pub fn read_scene<P: AsRef<Path>>(path: P) -> Result<Option<SceneMode>> {
    match read_optional(path.as_ref())? {
        Some(content) if !content.trim().is_empty() => SceneMode::parse(&content).map(Some),
        _ => Ok(None),
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::TaskStatus;
    use tempfile::TempDir;

    #[test]
    fn test_missing_snapshot() {
        let dir = TempDir::new().unwrap();
        let provider = SnapshotFileProvider::new(dir.path().join("snapshot.json"));
        assert!(provider.collection_info().unwrap().is_none());
    }

    #[test]
    fn test_null_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "null\n").unwrap();
        assert!(SnapshotFileProvider::new(&path).collection_info().unwrap().is_none());

        fs::write(&path, "").unwrap();
        assert!(SnapshotFileProvider::new(&path).collection_info().unwrap().is_none());
    }

    #[test]
    fn test_read_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(
            &path,
            r#"{ "Mercenaries": [{ "Id": 3 }], "Visitors": [{ "TaskId": 9, "Status": 1 }] }"#,
        )
        .unwrap();

        let info = SnapshotFileProvider::new(&path)
            .collection_info()
            .unwrap()
            .unwrap();
        assert_eq!(info.mercenaries[0].id, 3);
        assert_eq!(info.visitors[0].status, TaskStatus::NotStarted);
    }

    #[test]
    fn test_invalid_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{ \"Visitors\": 5 }").unwrap();

        let result = SnapshotFileProvider::new(&path).collection_info();
        assert!(matches!(result, Err(Error::ProviderFailed(_))));
    }

    #[test]
    fn test_read_scene() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scene.txt");
        assert_eq!(read_scene(&path).unwrap(), None);

        fs::write(&path, "21\n").unwrap();
        assert_eq!(read_scene(&path).unwrap(), Some(SceneMode::LettuceBountyBoard));

        fs::write(&path, "LETTUCE_MAP").unwrap();
        assert_eq!(read_scene(&path).unwrap(), Some(SceneMode::LettuceMap));

        fs::write(&path, "   ").unwrap();
        assert_eq!(read_scene(&path).unwrap(), None);

        fs::write(&path, "250").unwrap();
        assert!(read_scene(&path).is_err());
    }
}
