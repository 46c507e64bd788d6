use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::{check_key, ArtifactStore, StoreError};

/// Filesystem store rooted at one project directory.
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ArtifactStore for LocalStore {
    async fn ensure_container(&self, path: &str) -> Result<(), StoreError> {
        let dir = if path.is_empty() {
            self.root.clone()
        } else {
            check_key(path)?;
            self.resolve(path)
        };
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Internal(format!("mkdir {}: {e}", dir.display())))
    }

    async fn write(&self, path: &str, body: Bytes) -> Result<(), StoreError> {
        check_key(path)?;
        let full = self.resolve(path);
        debug!(path = %full.display(), bytes = body.len(), "writing artifact");
        tokio::fs::write(&full, &body)
            .await
            .map_err(|e| StoreError::Internal(format!("write {}: {e}", full.display())))
    }

    async fn read(&self, path: &str) -> Result<Bytes, StoreError> {
        check_key(path)?;
        let full = self.resolve(path);
        match tokio::fs::read(&full).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(path.to_string()))
            }
            Err(e) => Err(StoreError::Internal(format!(
                "read {}: {e}",
                full.display()
            ))),
        }
    }

    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        check_key(path)?;
        let full = self.resolve(path);
        match tokio::fs::try_exists(&full).await {
            Ok(exists) => Ok(exists),
            Err(e) => Err(StoreError::Internal(format!(
                "exists {}: {e}",
                full.display()
            ))),
        }
    }

    async fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.root.exists() {
            return Ok(vec![]);
        }
        let mut keys = Vec::new();
        let mut stack = vec![self.root.clone()];
        while let Some(current) = stack.pop() {
            let mut entries = match tokio::fs::read_dir(&current).await {
                Ok(e) => e,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(StoreError::Internal(format!(
                        "list {}: {e}",
                        current.display()
                    )))
                }
            };
            while let Some(entry) = entries
                .next_entry()
                .await
                .map_err(|e| StoreError::Internal(format!("read_dir entry: {e}")))?
            {
                let path = entry.path();
                let ft = entry
                    .file_type()
                    .await
                    .map_err(|e| StoreError::Internal(format!("file_type: {e}")))?;
                if ft.is_dir() {
                    stack.push(path);
                } else if let Ok(rel) = path.strip_prefix(&self.root) {
                    let key = rel
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy())
                        .collect::<Vec<_>>()
                        .join("/");
                    keys.push(key);
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::PathError;

    #[tokio::test]
    async fn write_then_read_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path());

        store.ensure_container("src").await.unwrap();
        store
            .write("src/main.rs", Bytes::from("fn main() {}"))
            .await
            .unwrap();
        let data = store.read("src/main.rs").await.unwrap();
        assert_eq!(data.as_ref(), b"fn main() {}");
    }

    #[tokio::test]
    async fn write_without_container_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path());

        let err = store
            .write("missing/dir/file.txt", Bytes::from("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Internal(_)));
    }

    #[tokio::test]
    async fn ensure_container_creates_nested_and_root() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path().join("project"));

        store.ensure_container("").await.unwrap();
        assert!(store.root().is_dir());
        store.ensure_container("a/b/c").await.unwrap();
        assert!(tmp.path().join("project/a/b/c").is_dir());
        // Idempotent.
        store.ensure_container("a/b/c").await.unwrap();
    }

    #[tokio::test]
    async fn rejects_escaping_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path());

        let err = store
            .write("../escape.txt", Bytes::from("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath { .. }));
        assert!(store.ensure_container("/abs").await.is_err());
        assert!(!tmp.path().parent().unwrap().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn rejects_backslash_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path());

        let err = store
            .write("web\\index.js", Bytes::from("x"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidPath {
                source: PathError::Backslash,
                ..
            }
        ));
        assert!(store.ensure_container("web\\assets").await.is_err());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn read_missing_returns_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path());

        let err = store.read("nope.txt").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        assert!(!store.exists("nope.txt").await.unwrap());
    }

    #[tokio::test]
    async fn write_overwrites_existing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path());

        store.write("key", Bytes::from("first")).await.unwrap();
        store.write("key", Bytes::from("second")).await.unwrap();
        assert_eq!(store.read("key").await.unwrap().as_ref(), b"second");
    }

    #[tokio::test]
    async fn list_returns_sorted_relative_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path().join("p"));

        store.ensure_container("src/bin").await.unwrap();
        for key in ["src/main.rs", "README.md", "src/bin/tool.rs"] {
            store.write(key, Bytes::from(key)).await.unwrap();
        }
        let keys = store.list().await.unwrap();
        assert_eq!(keys, vec!["README.md", "src/bin/tool.rs", "src/main.rs"]);
    }

    #[tokio::test]
    async fn list_missing_root_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path().join("never-created"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unicode_content_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = LocalStore::new(tmp.path());

        let content = "// Spécification 🚀 日本語";
        store.write("notes.rs", Bytes::from(content)).await.unwrap();
        let data = store.read("notes.rs").await.unwrap();
        assert_eq!(std::str::from_utf8(&data).unwrap(), content);
    }
}
