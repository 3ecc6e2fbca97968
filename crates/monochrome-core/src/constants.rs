//! Default values for configuration that the original deployment hard-coded.

/// Destination bucket for processed images.
pub const DEFAULT_OUTPUT_BUCKET: &str = "image-output-geraldsadya";

/// Metadata table name.
pub const DEFAULT_METADATA_TABLE: &str = "ProcessedImages";

/// Images wider than this are scaled down to exactly this width.
pub const DEFAULT_MAX_WIDTH: u32 = 1024;

/// Message returned in the success body.
pub const SUCCESS_MESSAGE: &str = "Image processed successfully";
