use crate::traits::{ObjectStorage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Directory under `base_path` mirroring `{bucket}/{key}` with the declared
/// content type of each object
const CONTENT_TYPE_DIR: &str = ".content-type";

/// Local filesystem storage implementation
///
/// Each bucket is a directory under `base_path`; object keys map to relative
/// paths inside it. The content type given on upload is kept in a sidecar
/// file; objects uploaded without one fall back to the key's extension.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding one sub-directory per bucket
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert bucket and key to a filesystem path with security validation
    ///
    /// Rejects anything that could escape the bucket directory: empty
    /// segments, `..`, absolute paths.
    fn object_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        Self::validate_segment(bucket, "bucket")?;

        if key.is_empty() || key.starts_with('/') || key.contains('\\') {
            return Err(StorageError::InvalidKey(format!(
                "Storage key contains invalid characters: {key}"
            )));
        }

        let relative = Path::new(key);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(StorageError::InvalidKey(format!(
                "Storage key resolves outside storage directory: {key}"
            )));
        }

        Ok(self.base_path.join(bucket).join(relative))
    }

    /// Sidecar path holding the declared content type of an object
    fn content_type_path(&self, bucket: &str, key: &str) -> StorageResult<PathBuf> {
        self.object_path(bucket, key)?;
        Ok(self.base_path.join(CONTENT_TYPE_DIR).join(bucket).join(key))
    }

    fn validate_segment(value: &str, what: &str) -> StorageResult<()> {
        // Leading dots are reserved for the sidecar tree
        if value.is_empty()
            || value.starts_with('.')
            || value.contains('/')
            || value.contains('\\')
        {
            return Err(StorageError::InvalidKey(format!("Invalid {what} name: {value}")));
        }
        Ok(())
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Content type for a key, from its extension
    pub fn content_type_for_key(key: &str) -> Option<&'static str> {
        let extension = Path::new(key).extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "jpg" | "jpeg" => Some("image/jpeg"),
            "png" => Some("image/png"),
            "gif" => Some("image/gif"),
            "webp" => Some("image/webp"),
            "bmp" => Some("image/bmp"),
            "tif" | "tiff" => Some("image/tiff"),
            _ => None,
        }
    }
}

#[async_trait]
impl ObjectStorage for LocalStorage {
    async fn list_keys(&self, bucket: &str) -> StorageResult<Vec<String>> {
        Self::validate_segment(bucket, "bucket")?;
        let root = self.base_path.join(bucket);

        if !fs::try_exists(&root).await.unwrap_or(false) {
            return Err(StorageError::ListFailed(format!(
                "Bucket directory does not exist: {}",
                root.display()
            )));
        }

        let mut keys = Vec::new();
        let mut pending = vec![root.clone()];

        while let Some(dir) = pending.pop() {
            let mut entries = fs::read_dir(&dir).await?;
            while let Some(entry) = entries.next_entry().await? {
                let path = entry.path();
                if entry.file_type().await?.is_dir() {
                    pending.push(path);
                } else if let Ok(relative) = path.strip_prefix(&root) {
                    let key = relative
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

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        let path = self.object_path(bucket, key)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let sidecar = self.content_type_path(bucket, key)?;
        let content_type = match fs::read_to_string(&sidecar).await {
            Ok(content_type) => Some(content_type),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Self::content_type_for_key(key).map(String::from)
            }
            Err(e) => {
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read content type {}: {}",
                    sidecar.display(),
                    e
                )))
            }
        };

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            content_type = content_type.as_deref().unwrap_or(""),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(StoredObject {
            data: Bytes::from(data),
            content_type,
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let path = self.object_path(bucket, key)?;
        let sidecar = self.content_type_path(bucket, key)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        match content_type {
            Some(content_type) => {
                self.ensure_parent_dir(&sidecar).await?;
                fs::write(&sidecar, content_type).await.map_err(|e| {
                    StorageError::UploadFailed(format!(
                        "Failed to write content type {}: {}",
                        sidecar.display(),
                        e
                    ))
                })?;
            }
            // Drop a type left by an earlier upload of the same key
            None => match fs::remove_file(&sidecar).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
