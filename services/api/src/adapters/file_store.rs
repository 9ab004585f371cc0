//! services/api/src/adapters/file_store.rs
//!
//! A `KeyValueStore` that keeps each key in its own `<key>.json` file.
//! Values are written to a temporary sibling and renamed into place, so a crash
//! mid-write leaves either the old blob or the new one.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lesson_planner_core::ports::{KeyValueStore, PortError, PortResult};
use tokio::fs;

#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates the store, making `dir` if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> PortResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| PortError::Unexpected(format!("{}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PortError::Unexpected(format!("{}: {}", path.display(), e))),
        }
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, value)
            .await
            .map_err(|e| PortError::Unexpected(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| PortError::Unexpected(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path()).await.unwrap();
        assert_eq!(store.get("lessonArchive").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::open(dir.path().join("nested")).await.unwrap();
        store.set("lessonArchive", "[]").await.unwrap();
        store.set("lessonArchive", "[1]").await.unwrap();

        let reopened = FileKeyValueStore::open(dir.path().join("nested")).await.unwrap();
        assert_eq!(
            reopened.get("lessonArchive").await.unwrap().as_deref(),
            Some("[1]")
        );
        assert!(!dir.path().join("nested/lessonArchive.json.tmp").exists());
    }
}
