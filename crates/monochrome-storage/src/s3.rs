use crate::traits::{ObjectStorage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::{RetryConfig, RetryMode};
use aws_config::BehaviorVersion;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region; falls back to the SDK default provider chain when `None`
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO, "http://localhost:4566" for LocalStack)
    pub async fn new(region: Option<String>, endpoint_url: Option<String>) -> StorageResult<Self> {
        let region_provider = RegionProviderChain::first_try(region.map(aws_config::Region::new))
            .or_default_provider();

        let retry_config = RetryConfig::standard()
            .with_max_attempts(5)
            .with_retry_mode(RetryMode::Adaptive);

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .retry_config(retry_config)
            .load()
            .await;

        if config.region().is_none() {
            return Err(StorageError::ConfigError(
                "No AWS region configured (set AWS_REGION)".to_string(),
            ));
        }

        let client = match endpoint_url {
            // S3-compatible providers generally require path-style addressing
            Some(endpoint) => {
                let s3_config = aws_sdk_s3::config::Builder::from(&config)
                    .endpoint_url(endpoint)
                    .force_path_style(true)
                    .build();
                Client::from_conf(s3_config)
            }
            None => Client::new(&config),
        };

        Ok(Self::from_client(client))
    }

    /// Wrap an already configured client
    pub fn from_client(client: Client) -> Self {
        S3Storage { client }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn list_keys(&self, bucket: &str) -> StorageResult<Vec<String>> {
        let start = std::time::Instant::now();

        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 list failed"
                );
                StorageError::ListFailed(e.to_string())
            })?;

        let keys: Vec<String> = output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(String::from))
            .collect();

        tracing::debug!(
            bucket = %bucket,
            count = keys.len(),
            truncated = output.is_truncated().unwrap_or(false),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 list successful"
        );

        Ok(keys)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> StorageResult<StoredObject> {
        let start = std::time::Instant::now();

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| match &e {
                SdkError::ServiceError(service_err)
                    if matches!(service_err.err(), GetObjectError::NoSuchKey(_)) =>
                {
                    StorageError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                }
                _ => {
                    tracing::error!(
                        error = %e,
                        bucket = %bucket,
                        key = %key,
                        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "S3 download failed"
                    );
                    StorageError::DownloadFailed(e.to_string())
                }
            })?;

        let content_type = response.content_type().map(String::from);

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?
            .into_bytes();

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = data.len() as u64,
            content_type = content_type.as_deref().unwrap_or(""),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(StoredObject { data, content_type })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let size = data.len() as u64;
        let body = ByteStream::from(Bytes::from(data));
        let start = std::time::Instant::now();

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .set_content_type(content_type.map(String::from))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        tracing::info!(
            bucket = %bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::operation::get_object::GetObjectOutput;
    use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
    use aws_sdk_s3::operation::put_object::{PutObjectError, PutObjectOutput};
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_sdk_s3::types::Object;
    use aws_smithy_mocks::{mock, mock_client};

    #[tokio::test]
    async fn test_list_keys() {
        let list_rule = mock!(aws_sdk_s3::Client::list_objects_v2)
            .match_requests(|req| req.bucket() == Some("uploads"))
            .then_output(|| {
                ListObjectsV2Output::builder()
                    .contents(Object::builder().key("a.jpg").build())
                    .contents(Object::builder().key("b/c.png").build())
                    .build()
            });
        let storage = S3Storage::from_client(mock_client!(aws_sdk_s3, [&list_rule]));

        let keys = storage.list_keys("uploads").await.unwrap();
        assert_eq!(keys, vec!["a.jpg".to_string(), "b/c.png".to_string()]);
        assert_eq!(list_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_get_object_returns_bytes_and_content_type() {
        let get_rule = mock!(aws_sdk_s3::Client::get_object)
            .match_requests(|req| {
                req.bucket() == Some("uploads") && req.key() == Some("my photo.jpg")
            })
            .then_output(|| {
                GetObjectOutput::builder()
                    .body(ByteStream::from_static(b"jpeg-bytes"))
                    .content_type("image/jpeg")
                    .build()
            });
        let storage = S3Storage::from_client(mock_client!(aws_sdk_s3, [&get_rule]));

        let object = storage.get_object("uploads", "my photo.jpg").await.unwrap();
        assert_eq!(object.data.as_ref(), b"jpeg-bytes");
        assert_eq!(object.content_type.as_deref(), Some("image/jpeg"));
        assert_eq!(object.size(), 10);
        assert_eq!(get_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_get_object_missing_key_maps_to_not_found() {
        let get_rule = mock!(aws_sdk_s3::Client::get_object)
            .then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build()));
        let storage = S3Storage::from_client(mock_client!(aws_sdk_s3, [&get_rule]));

        let err = storage.get_object("uploads", "gone.jpg").await.unwrap_err();
        match err {
            StorageError::NotFound { bucket, key } => {
                assert_eq!(bucket, "uploads");
                assert_eq!(key, "gone.jpg");
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_object_access_denied_maps_to_download_failed() {
        let get_rule = mock!(aws_sdk_s3::Client::get_object).then_error(|| {
            GetObjectError::generic(
                ErrorMetadata::builder()
                    .code("AccessDenied")
                    .message("Access Denied")
                    .build(),
            )
        });
        let storage = S3Storage::from_client(mock_client!(aws_sdk_s3, [&get_rule]));

        let err = storage.get_object("uploads", "secret.jpg").await.unwrap_err();
        assert!(matches!(err, StorageError::DownloadFailed(_)));
    }

    #[tokio::test]
    async fn test_put_object_passes_content_type() {
        let put_rule = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|req| {
                req.bucket() == Some("processed")
                    && req.key() == Some("cat.png")
                    && req.content_type() == Some("image/png")
            })
            .then_output(|| PutObjectOutput::builder().build());
        let storage = S3Storage::from_client(mock_client!(aws_sdk_s3, [&put_rule]));

        storage
            .put_object("processed", "cat.png", vec![1, 2, 3], Some("image/png"))
            .await
            .unwrap();
        assert_eq!(put_rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn test_put_object_failure_maps_to_upload_failed() {
        let put_rule = mock!(aws_sdk_s3::Client::put_object).then_error(|| {
            PutObjectError::generic(
                ErrorMetadata::builder()
                    .code("InternalError")
                    .message("We encountered an internal error")
                    .build(),
            )
        });
        let storage = S3Storage::from_client(mock_client!(aws_sdk_s3, [&put_rule]));

        let err = storage
            .put_object("processed", "cat.png", vec![1], None)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::UploadFailed(_)));
    }

    #[test]
    fn test_backend_type() {
        let list_rule = mock!(aws_sdk_s3::Client::list_objects_v2)
            .then_output(|| ListObjectsV2Output::builder().build());
        let storage = S3Storage::from_client(mock_client!(aws_sdk_s3, [&list_rule]));
        assert_eq!(storage.backend_type(), StorageBackend::S3);
    }
}
