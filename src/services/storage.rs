use anyhow::bail;
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Stores uploaded pics in a local directory served under `/uploads`
#[derive(Clone)]
pub struct LocalStorageHandler {
    pub root: PathBuf,
}

impl LocalStorageHandler {
    /// Joins `path` to the root, rejecting anything escaping it
    fn resolve(&self, path: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(path);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            bail!("invalid storage path: {path}");
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl crate::services::StorageService for LocalStorageHandler {
    async fn save_pic(&self, path: &str, body: Vec<u8>) -> anyhow::Result<()> {
        let full_path = self.resolve(path)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full_path, body).await?;

        Ok(())
    }

    async fn delete_pic(&self, path: &str) -> anyhow::Result<()> {
        let full_path = self.resolve(path)?;

        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::StorageService;

    #[ntex::test]
    async fn test_save_and_delete_pic() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageHandler {
            root: dir.path().to_path_buf(),
        };

        storage
            .save_pic("pets/1-abc.png", vec![1, 2, 3])
            .await
            .unwrap();
        let written = dir.path().join("pets").join("1-abc.png");
        assert_eq!(std::fs::read(&written).unwrap(), vec![1, 2, 3]);

        storage.delete_pic("pets/1-abc.png").await.unwrap();
        assert!(!written.exists());

        // already gone
        storage.delete_pic("pets/1-abc.png").await.unwrap();
    }

    #[ntex::test]
    async fn test_rejects_paths_outside_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorageHandler {
            root: dir.path().join("uploads"),
        };

        assert!(storage.save_pic("../evil.png", vec![1]).await.is_err());
        assert!(storage.save_pic("/etc/evil.png", vec![1]).await.is_err());
        assert!(storage.delete_pic("pets/../../evil.png").await.is_err());
    }
}
