//! File-upload collaborator: takes bytes and a destination path, hands back a
//! public URL. Callers treat the URL as opaque.

use std::{
    future::Future,
    io::ErrorKind,
    path::{Component, Path, PathBuf},
};

use async_trait::async_trait;
use axum::body::Bytes;
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object path {0:?}")]
    InvalidPath(String),

    #[error("empty upload")]
    Empty,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` at `path` and returns the URL it is served from.
    async fn put(&self, path: &str, bytes: Bytes) -> Result<String, StorageError>;

    /// Removes the object at `path`. Missing objects are not an error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Stores `bytes` at `path`, then runs `record` with the public URL. When
/// `record` fails the stored object is deleted again so nothing is left
/// behind that no row points at.
pub async fn put_then_record<T, E, F, Fut>(
    blobs: &dyn BlobStore,
    path: &str,
    bytes: Bytes,
    record: F,
) -> Result<T, E>
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<StorageError> + std::fmt::Display,
{
    let url = blobs.put(path, bytes).await?;
    match record(url).await {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Err(cleanup) = blobs.delete(path).await {
                tracing::warn!(path, error = %cleanup, "orphaned upload left behind");
            } else {
                tracing::debug!(path, error = %err, "upload discarded");
            }
            Err(err)
        }
    }
}

/// Writes uploads under a local directory that the server also serves.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(path);
        let only_normal = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if path.is_empty() || !only_normal {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, path: &str, bytes: Bytes) -> Result<String, StorageError> {
        if bytes.is_empty() {
            return Err(StorageError::Empty);
        }
        let target = self.resolve(path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, &bytes).await?;
        tracing::debug!(path, size = bytes.len(), "stored upload");
        Ok(format!("{}/{}", self.public_base_url, path))
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let target = self.resolve(path)?;
        match fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
