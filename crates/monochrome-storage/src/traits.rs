//! Storage abstraction trait
//!
//! This module defines the ObjectStorage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// An object fetched from storage
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    /// Content type declared by the backend, if any
    pub content_type: Option<String>,
}

impl StoredObject {
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Storage abstraction trait
///
/// Implemented by the S3 and local filesystem backends so the handler can run
/// against either without knowing which one it has.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// List the keys in a bucket (first page only for paginated backends)
    async fn list_keys(&self, bucket: &str) -> StorageResult<Vec<String>>;

    /// Download an object with its declared content type
    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject>;

    /// Upload an object, overwriting any existing object under the same key
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
