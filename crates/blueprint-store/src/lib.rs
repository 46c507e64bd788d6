mod local;

pub use local::LocalStore;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use blueprint_core::{validate_relative_path, PathError};
use bytes::Bytes;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: PathError,
    },

    #[error("store error: {0}")]
    Internal(String),
}

/// Where generated artifacts are persisted. Paths are relative to the
/// project root the store was created for.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Create the container at `path` and any missing ancestors.
    /// An empty path means the project root itself.
    async fn ensure_container(&self, path: &str) -> Result<(), StoreError>;

    /// Write (create or overwrite) an artifact. The containing directory
    /// must already exist.
    async fn write(&self, path: &str, body: Bytes) -> Result<(), StoreError>;

    /// Read an artifact. Returns `StoreError::NotFound` if absent.
    async fn read(&self, path: &str) -> Result<Bytes, StoreError>;

    /// Check if an artifact exists.
    async fn exists(&self, path: &str) -> Result<bool, StoreError> {
        match self.read(path).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// All artifact paths under the project root, sorted.
    async fn list(&self) -> Result<Vec<String>, StoreError>;
}

// -- Key helpers --

/// The container holding `path`, or `None` for a top-level artifact.
pub fn parent_container(path: &str) -> Option<&str> {
    let trimmed = path.trim_start_matches("./");
    trimmed
        .rfind('/')
        .map(|i| trimmed[..i].trim_end_matches('/'))
        .filter(|p| !p.is_empty())
}

pub(crate) fn check_key(path: &str) -> Result<(), StoreError> {
    validate_relative_path(path).map_err(|source| StoreError::InvalidPath {
        path: path.to_string(),
        source,
    })
}

// -- Configuration --

/// Configuration for where project containers are created.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory under which one container per project is created.
    /// When `None`, the current directory is used.
    pub output_dir: Option<PathBuf>,
}

impl StoreConfig {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}

// -- Factory --

/// Create the store for one project, rooted at `<output_dir>/<project_name>`.
pub fn create_store(
    config: &StoreConfig,
    project_name: &str,
) -> Result<Arc<dyn ArtifactStore>, StoreError> {
    check_key(project_name)?;
    Ok(Arc::new(LocalStore::new(config.output_dir().join(project_name))))
}
