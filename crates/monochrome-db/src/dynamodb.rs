use crate::traits::{MetadataError, MetadataResult, MetadataStore};
use crate::MetadataBackend;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use monochrome_core::MetadataRecord;
use std::collections::HashMap;

/// DynamoDB-backed metadata table
#[derive(Clone)]
pub struct DynamoDbMetadataStore {
    client: Client,
    table_name: String,
}

impl DynamoDbMetadataStore {
    /// Create a new store for `table_name`
    ///
    /// # Arguments
    /// * `region` - AWS region; falls back to the SDK default provider chain when `None`
    /// * `endpoint_url` - Optional custom endpoint (e.g. "http://localhost:8000" for DynamoDB Local)
    pub async fn new(
        table_name: String,
        region: Option<String>,
        endpoint_url: Option<String>,
    ) -> MetadataResult<Self> {
        let region_provider = RegionProviderChain::first_try(region.map(aws_config::Region::new))
            .or_default_provider();

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await;

        if config.region().is_none() {
            return Err(MetadataError::ConfigError(
                "No AWS region configured (set AWS_REGION)".to_string(),
            ));
        }

        let client = match endpoint_url {
            Some(endpoint) => {
                let ddb_config = aws_sdk_dynamodb::config::Builder::from(&config)
                    .endpoint_url(endpoint)
                    .build();
                Client::from_conf(ddb_config)
            }
            None => Client::new(&config),
        };

        Ok(Self::from_client(client, table_name))
    }

    /// Wrap an already configured client
    pub fn from_client(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// Attribute map written for a record
    pub fn record_to_item(record: &MetadataRecord) -> HashMap<String, AttributeValue> {
        HashMap::from([
            ("ImageId".to_string(), AttributeValue::S(record.image_id.clone())),
            (
                "OriginalBucket".to_string(),
                AttributeValue::S(record.original_bucket.clone()),
            ),
            (
                "OutputBucket".to_string(),
                AttributeValue::S(record.output_bucket.clone()),
            ),
            (
                "OriginalSize".to_string(),
                AttributeValue::N(record.original_size.to_string()),
            ),
            (
                "ProcessedSize".to_string(),
                AttributeValue::N(record.processed_size.to_string()),
            ),
            (
                "OriginalDimensions".to_string(),
                AttributeValue::S(record.original_dimensions.to_string()),
            ),
            (
                "ProcessedDimensions".to_string(),
                AttributeValue::S(record.processed_dimensions.to_string()),
            ),
            (
                "ProcessedAt".to_string(),
                AttributeValue::S(record.processed_at_string()),
            ),
        ])
    }
}

#[async_trait]
impl MetadataStore for DynamoDbMetadataStore {
    #[tracing::instrument(skip(self, record), fields(db.table = %self.table_name, db.operation = "put_item", key = %record.image_id))]
    async fn put_record(&self, record: &MetadataRecord) -> MetadataResult<()> {
        let start = std::time::Instant::now();

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::record_to_item(record)))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "DynamoDB put_item failed"
                );
                MetadataError::WriteFailed(e.to_string())
            })?;

        tracing::info!(
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "DynamoDB put_item successful"
        );

        Ok(())
    }

    fn backend_type(&self) -> MetadataBackend {
        MetadataBackend::DynamoDb
    }
}
