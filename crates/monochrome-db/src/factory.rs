#[cfg(feature = "metadata-dynamodb")]
use crate::DynamoDbMetadataStore;
#[cfg(feature = "metadata-local")]
use crate::LocalMetadataStore;
use crate::{MetadataBackend, MetadataError, MetadataResult, MetadataStore};
use monochrome_core::Config;
use std::sync::Arc;

/// Create a metadata store based on configuration
pub async fn create_metadata_store(config: &Config) -> MetadataResult<Arc<dyn MetadataStore>> {
    match config.metadata_backend {
        #[cfg(feature = "metadata-dynamodb")]
        MetadataBackend::DynamoDb => {
            let store = DynamoDbMetadataStore::new(
                config.metadata_table.clone(),
                config.aws_region.clone(),
                config.dynamodb_endpoint.clone(),
            )
            .await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "metadata-dynamodb"))]
        MetadataBackend::DynamoDb => Err(MetadataError::ConfigError(
            "DynamoDB metadata backend not available (metadata-dynamodb feature not enabled)"
                .to_string(),
        )),

        #[cfg(feature = "metadata-local")]
        MetadataBackend::Local => {
            let base_path = config.local_metadata_path.clone().ok_or_else(|| {
                MetadataError::ConfigError("LOCAL_METADATA_PATH not configured".to_string())
            })?;
            let store = LocalMetadataStore::new(base_path).await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "metadata-local"))]
        MetadataBackend::Local => Err(MetadataError::ConfigError(
            "Local metadata backend not available (metadata-local feature not enabled)"
                .to_string(),
        )),
    }
}
