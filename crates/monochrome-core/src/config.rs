//! Configuration module
//!
//! Everything the original deployment hard-coded (destination bucket, table
//! name, width threshold) is read here and injected into the handler, together
//! with backend selection for storage and metadata.

use std::env;
use std::str::FromStr;

use crate::constants::{DEFAULT_MAX_WIDTH, DEFAULT_METADATA_TABLE, DEFAULT_OUTPUT_BUCKET};
use crate::storage_types::{LogFormat, MetadataBackend, StorageBackend};

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub output_bucket: String,
    pub metadata_table: String,
    pub max_width: u32,
    /// Log every key in the source bucket before fetching (diagnostic only)
    pub list_source_objects: bool,
    pub storage_backend: StorageBackend,
    pub metadata_backend: MetadataBackend,
    pub aws_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, LocalStack)
    pub dynamodb_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_metadata_path: Option<String>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let environment = var("ENVIRONMENT")
            .or_else(|| var("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let max_width = parse_or("MAX_WIDTH", var("MAX_WIDTH"), DEFAULT_MAX_WIDTH)?;
        let list_source_objects =
            parse_bool("LIST_SOURCE_OBJECTS", var("LIST_SOURCE_OBJECTS"), false)?;
        let storage_backend =
            parse_or("STORAGE_BACKEND", var("STORAGE_BACKEND"), StorageBackend::S3)?;
        let metadata_backend = parse_or(
            "METADATA_BACKEND",
            var("METADATA_BACKEND"),
            MetadataBackend::DynamoDb,
        )?;

        // Inside Lambda the logs land in CloudWatch, where JSON lines are searchable.
        let default_log_format = if var("AWS_LAMBDA_FUNCTION_NAME").is_some() {
            LogFormat::Json
        } else {
            LogFormat::Compact
        };
        let log_format = parse_or("LOG_FORMAT", var("LOG_FORMAT"), default_log_format)?;

        let config = Config {
            environment,
            output_bucket: var("OUTPUT_BUCKET").unwrap_or_else(|| DEFAULT_OUTPUT_BUCKET.to_string()),
            metadata_table: var("METADATA_TABLE")
                .unwrap_or_else(|| DEFAULT_METADATA_TABLE.to_string()),
            max_width,
            list_source_objects,
            storage_backend,
            metadata_backend,
            aws_region: var("AWS_REGION").or_else(|| var("AWS_DEFAULT_REGION")),
            s3_endpoint: var("S3_ENDPOINT"),
            dynamodb_endpoint: var("DYNAMODB_ENDPOINT"),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_metadata_path: var("LOCAL_METADATA_PATH"),
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_width == 0 {
            return Err(anyhow::anyhow!("MAX_WIDTH must be greater than zero"));
        }
        if self.output_bucket.is_empty() {
            return Err(anyhow::anyhow!("OUTPUT_BUCKET cannot be empty"));
        }
        if self.metadata_table.is_empty() {
            return Err(anyhow::anyhow!("METADATA_TABLE cannot be empty"));
        }
        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH is required when STORAGE_BACKEND=local"
            ));
        }
        if self.metadata_backend == MetadataBackend::Local && self.local_metadata_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_METADATA_PATH is required when METADATA_BACKEND=local"
            ));
        }
        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {} ({})", name, raw, e)),
        None => Ok(default),
    }
}

fn parse_bool(name: &str, value: Option<String>, default: bool) -> Result<bool, anyhow::Error> {
    match value.as_deref().map(str::to_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(anyhow::anyhow!("Invalid value for {}: {}", name, other)),
    }
}
