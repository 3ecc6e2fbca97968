//! Image metadata captured before and after the transform

use monochrome_core::Dimensions;
use serde::{Deserialize, Serialize};

/// Image metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: u32,
    pub height: u32,
    /// Container format, e.g. "Jpeg"; `None` when it could not be determined
    pub format: Option<String>,
    /// Pixel layout, e.g. "Rgb8" or "L8"
    pub color_type: String,
    pub size_bytes: u64,
}

impl ImageMetadata {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}
