//! Image transform handler
//!
//! One invocation: decode the key, optionally list the source bucket, fetch
//! the object, transform it, upload the result under the same key in the
//! output bucket, then record metadata. Metadata failures are logged and
//! swallowed; every earlier failure aborts the invocation.

use std::sync::Arc;
use std::time::Instant;

use aws_lambda_events::event::s3::S3Event;
use chrono::Utc;
use lambda_runtime::LambdaEvent;
use monochrome_core::{
    Config, MetadataBackend, MetadataRecord, ProcessResponse, ProcessedBody, StorageBackend,
};
use monochrome_db::{create_metadata_store, MetadataStore};
use monochrome_processing::{ImageEncoder, ImageTransformer, TransformOptions};
use monochrome_storage::{create_storage, decode_object_key, ObjectStorage};

use crate::error::ProcessError;
use crate::event::TriggerNotification;

/// Settings the handler needs from the process configuration
#[derive(Debug, Clone)]
pub struct HandlerConfig {
    pub output_bucket: String,
    pub transform: TransformOptions,
    /// List the source bucket before fetching (diagnostics only)
    pub list_source_objects: bool,
}

impl From<&Config> for HandlerConfig {
    fn from(config: &Config) -> Self {
        Self {
            output_bucket: config.output_bucket.clone(),
            transform: TransformOptions {
                max_width: config.max_width,
                ..TransformOptions::default()
            },
            list_source_objects: config.list_source_objects,
        }
    }
}

pub struct ImageTransformHandler {
    storage: Arc<dyn ObjectStorage>,
    metadata: Arc<dyn MetadataStore>,
    config: HandlerConfig,
}

impl ImageTransformHandler {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        metadata: Arc<dyn MetadataStore>,
        config: HandlerConfig,
    ) -> Self {
        Self {
            storage,
            metadata,
            config,
        }
    }

    /// Build the handler with the backends selected by `config`
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let storage = create_storage(config).await?;
        let metadata = create_metadata_store(config).await?;

        if config.is_production()
            && (storage.backend_type() == StorageBackend::Local
                || metadata.backend_type() == MetadataBackend::Local)
        {
            tracing::warn!("Local backends configured in a production environment");
        }

        tracing::info!(
            environment = %config.environment,
            storage_backend = %storage.backend_type(),
            metadata_backend = %metadata.backend_type(),
            output_bucket = %config.output_bucket,
            max_width = config.max_width,
            "Image transform handler initialized"
        );

        Ok(Self::new(storage, metadata, HandlerConfig::from(config)))
    }

    /// Process the object named by `notification`.
    ///
    /// Fatal errors are logged with their kind before being returned.
    #[tracing::instrument(
        name = "process_image",
        skip(self, notification),
        fields(bucket = %notification.bucket, key = tracing::field::Empty)
    )]
    pub async fn process(
        &self,
        notification: &TriggerNotification,
    ) -> Result<ProcessResponse, ProcessError> {
        self.run(notification)
            .await
            .inspect_err(ProcessError::log)
    }

    async fn run(&self, notification: &TriggerNotification) -> Result<ProcessResponse, ProcessError> {
        let start = Instant::now();
        let source_bucket = notification.bucket.as_str();
        let output_bucket = self.config.output_bucket.as_str();

        let key = decode_object_key(&notification.raw_key).map_err(ProcessError::InvalidKey)?;
        tracing::Span::current().record("key", key.as_str());
        tracing::info!(output_bucket = %output_bucket, "Processing image");

        if self.config.list_source_objects {
            self.log_source_listing(source_bucket).await;
        }

        let object = self
            .storage
            .get_object(source_bucket, &key)
            .await
            .map_err(|source| ProcessError::Fetch {
                bucket: source_bucket.to_string(),
                key: key.clone(),
                source,
            })?;

        tracing::debug!(
            size_bytes = object.size(),
            content_type = object.content_type.as_deref().unwrap_or("none"),
            "Fetched source object"
        );

        let transformed = ImageTransformer::transform(&object.data, &self.config.transform)?;

        // Keep the declared type of the source object; only fall back to the
        // encoded format's type when the source declared none.
        let content_type = object
            .content_type
            .as_deref()
            .unwrap_or_else(|| ImageEncoder::content_type(transformed.format));

        let processed_size = transformed.data.len() as u64;
        let resized = transformed.was_resized();
        self.storage
            .put_object(output_bucket, &key, transformed.data, Some(content_type))
            .await
            .map_err(|source| ProcessError::Upload {
                bucket: output_bucket.to_string(),
                key: key.clone(),
                source,
            })?;

        tracing::info!(
            original_dimensions = %transformed.original.dimensions(),
            processed_dimensions = %transformed.processed.dimensions(),
            resized = resized,
            original_size = object.size(),
            processed_size = processed_size,
            "Uploaded processed image"
        );

        let record = MetadataRecord {
            image_id: key.clone(),
            original_bucket: source_bucket.to_string(),
            output_bucket: output_bucket.to_string(),
            original_size: object.size(),
            processed_size,
            original_dimensions: transformed.original.dimensions(),
            processed_dimensions: transformed.processed.dimensions(),
            processed_at: Utc::now(),
        };

        if let Err(e) = self.metadata.put_record(&record).await {
            tracing::error!(
                error = %e,
                error_kind = "metadata",
                "Failed to write metadata record; continuing"
            );
        }

        let response = ProcessResponse::ok(&ProcessedBody::new(source_bucket, output_bucket, &key))?;

        tracing::info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Image processed successfully"
        );

        Ok(response)
    }

    async fn log_source_listing(&self, bucket: &str) {
        match self.storage.list_keys(bucket).await {
            Ok(keys) => {
                tracing::info!(object_count = keys.len(), "Listed source bucket");
                for key in &keys {
                    tracing::debug!(object_key = %key, "Source bucket object");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list source bucket; continuing");
            }
        }
    }
}

/// Lambda entry point: extract the notification and process it
pub async fn function_handler(
    event: LambdaEvent<S3Event>,
    handler: &ImageTransformHandler,
) -> Result<ProcessResponse, lambda_runtime::Error> {
    tracing::debug!(request_id = %event.context.request_id, "Received S3 event");

    let notification = TriggerNotification::from_s3_event(&event.payload).inspect_err(ProcessError::log)?;
    let response = handler.process(&notification).await?;
    Ok(response)
}
