//! Filesystem avatar store
//!
//! Objects live under `root/<user_id>/avatar.<ext>`; the API binary serves
//! the same directory at `/avatars`.

use std::path::{Component, Path, PathBuf};

use crate::domain::avatar_store::AvatarStore;
use crate::error::{VaultError, VaultResult};

#[derive(Debug, Clone)]
pub struct FsAvatarStore {
    root: PathBuf,
}

impl FsAvatarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve an object path, refusing anything that leaves the root
    fn resolve(&self, path: &str) -> VaultResult<PathBuf> {
        let relative = Path::new(path);
        let plain = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));

        if path.is_empty() || !plain {
            return Err(VaultError::Internal(format!("Invalid avatar path: {path}")));
        }

        Ok(self.root.join(relative))
    }
}

impl AvatarStore for FsAvatarStore {
    async fn put(&self, path: &str, bytes: &[u8]) -> VaultResult<()> {
        let target = self.resolve(path)?;

        if let Some(dir) = target.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }

        // Readers only ever see a complete file
        let tmp = target.with_extension("upload");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &target).await?;

        tracing::debug!(path = %target.display(), size = bytes.len(), "Avatar stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_overwrites_existing_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAvatarStore::new(dir.path());

        store.put("u1/avatar.png", b"first").await.unwrap();
        store.put("u1/avatar.png", b"second").await.unwrap();

        let stored = tokio::fs::read(dir.path().join("u1/avatar.png")).await.unwrap();
        assert_eq!(stored, b"second");
        assert!(!dir.path().join("u1/avatar.upload").exists());
    }

    #[tokio::test]
    async fn test_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsAvatarStore::new(dir.path());

        assert!(store.put("../evil.png", b"x").await.is_err());
        assert!(store.put("/etc/evil.png", b"x").await.is_err());
        assert!(store.put("", b"x").await.is_err());
    }
}
