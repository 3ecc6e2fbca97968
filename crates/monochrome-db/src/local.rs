use crate::traits::{MetadataError, MetadataResult, MetadataStore};
use crate::MetadataBackend;
use async_trait::async_trait;
use monochrome_core::MetadataRecord;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Longest percent-encoded key used directly as a file name. Leaves room for
/// the `.json.tmp` suffix under the usual 255-byte name limit.
const MAX_ENCODED_NAME_LEN: usize = 200;

/// Sub-directory for records whose encoded key is too long for a file name
const DIGEST_DIR: &str = "by-digest";

/// Metadata table stored as one JSON document per key in a directory
///
/// The key is percent-encoded into the file name, so keys containing `/` or
/// spaces map to a single flat file. Longer keys are stored under the
/// SHA-256 of the key; `ImageId` inside the document still holds the full key.
#[derive(Clone)]
pub struct LocalMetadataStore {
    base_path: PathBuf,
}

impl LocalMetadataStore {
    pub async fn new(base_path: impl Into<PathBuf>) -> MetadataResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            MetadataError::ConfigError(format!(
                "Failed to create metadata directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(Self { base_path })
    }

    /// File holding the record for `key`
    pub fn record_path(&self, key: &str) -> PathBuf {
        let encoded = urlencoding::encode(key);
        if encoded.len() <= MAX_ENCODED_NAME_LEN {
            return self.base_path.join(format!("{encoded}.json"));
        }

        let digest = hex::encode(Sha256::digest(key.as_bytes()));
        self.base_path.join(DIGEST_DIR).join(format!("{digest}.json"))
    }

    /// Read back the record for `key`, if one was written
    pub async fn get_record(&self, key: &str) -> MetadataResult<Option<MetadataRecord>> {
        let path = self.record_path(key);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(None);
        }
        let raw = fs::read(&path).await?;
        Ok(Some(serde_json::from_slice(&raw)?))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[async_trait]
impl MetadataStore for LocalMetadataStore {
    async fn put_record(&self, record: &MetadataRecord) -> MetadataResult<()> {
        let path = self.record_path(&record.image_id);
        let json = serde_json::to_vec_pretty(record)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| MetadataError::WriteFailed(format!("{}: {}", parent.display(), e)))?;
        }

        // Write-then-rename so a reader never sees a half-written record
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json)
            .await
            .map_err(|e| MetadataError::WriteFailed(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &path)
            .await
            .map_err(|e| MetadataError::WriteFailed(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            key = %record.image_id,
            "Local metadata record written"
        );

        Ok(())
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::Local
    }
}
