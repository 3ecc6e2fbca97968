//! Metadata store abstraction trait

use crate::MetadataBackend;
use async_trait::async_trait;
use monochrome_core::MetadataRecord;
use thiserror::Error;

/// Metadata persistence errors
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for metadata operations
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Key-value table of processing records, keyed by `MetadataRecord::image_id`
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert or replace the record for its key
    async fn put_record(&self, record: &MetadataRecord) -> MetadataResult<()>;

    /// Get the metadata backend type
    fn backend_type(&self) -> MetadataBackend;
}
