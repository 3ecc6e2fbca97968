//! Shared domain models: the persisted metadata record and the success response.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::SUCCESS_MESSAGE;

/// Width and height of a raster image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Rendered as `{width}x{height}`, the format stored in the metadata table.
impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<(u32, u32)> for Dimensions {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// One row of the processed-images table, keyed by object key.
///
/// Written once per successful transform. A second transform of the same key
/// overwrites the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetadataRecord {
    pub image_id: String,
    pub original_bucket: String,
    pub output_bucket: String,
    pub original_size: u64,
    pub processed_size: u64,
    #[serde(with = "dimensions_string")]
    pub original_dimensions: Dimensions,
    #[serde(with = "dimensions_string")]
    pub processed_dimensions: Dimensions,
    pub processed_at: DateTime<Utc>,
}

impl MetadataRecord {
    /// Timestamp in the form written to the table.
    pub fn processed_at_string(&self) -> String {
        self.processed_at
            .to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

mod dimensions_string {
    use super::Dimensions;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dims: &Dimensions, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(dims)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Dimensions, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let (w, h) = raw
            .split_once('x')
            .ok_or_else(|| de::Error::custom(format!("invalid dimensions: {raw}")))?;
        let width = w.parse().map_err(de::Error::custom)?;
        let height = h.parse().map_err(de::Error::custom)?;
        Ok(Dimensions { width, height })
    }
}

/// Body of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedBody {
    pub message: String,
    pub original_bucket: String,
    pub output_bucket: String,
    pub key: String,
}

impl ProcessedBody {
    pub fn new(original_bucket: &str, output_bucket: &str, key: &str) -> Self {
        Self {
            message: SUCCESS_MESSAGE.to_string(),
            original_bucket: original_bucket.to_string(),
            output_bucket: output_bucket.to_string(),
            key: key.to_string(),
        }
    }
}

/// Proxy-style response returned to the runtime on success.
///
/// `body` carries the JSON-serialized [`ProcessedBody`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub status_code: u16,
    pub body: String,
}

impl ProcessResponse {
    pub fn ok(body: &ProcessedBody) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(body)?,
        })
    }

    pub fn parsed_body(&self) -> Result<ProcessedBody, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
