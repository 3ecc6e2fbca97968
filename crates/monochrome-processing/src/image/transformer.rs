//! Image transformer - the decode → resize → grayscale → encode chain

use crate::encoding::ImageEncoder;
use crate::error::ProcessingResult;
use crate::image::color::ImageColor;
use crate::image::processor::ImageProcessor;
use crate::image::resize::ImageResize;
use crate::metadata::ImageMetadata;
use image::ImageFormat;
use monochrome_core::constants::DEFAULT_MAX_WIDTH;

/// Parameters of the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    /// Images wider than this are scaled down to exactly this width
    pub max_width: u32,
    /// Encoding used when the source format is unknown or cannot be written
    pub fallback_format: ImageFormat,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            fallback_format: ImageFormat::Jpeg,
        }
    }
}

/// Result of a successful transform
#[derive(Debug, Clone)]
pub struct TransformedImage {
    pub data: Vec<u8>,
    /// Format `data` is encoded in
    pub format: ImageFormat,
    pub original: ImageMetadata,
    pub processed: ImageMetadata,
}

impl TransformedImage {
    pub fn was_resized(&self) -> bool {
        self.original.dimensions() != self.processed.dimensions()
    }
}

/// Main image transformer
pub struct ImageTransformer;

impl ImageTransformer {
    /// Decode `data`, cap its width, convert it to grayscale and re-encode it.
    ///
    /// Order is fixed: resize first (so resampling runs on the full color
    /// data), then grayscale, which always runs.
    pub fn transform(data: &[u8], options: &TransformOptions) -> ProcessingResult<TransformedImage> {
        let decoded = ImageProcessor::decode(data)?;
        let original = decoded.metadata();

        tracing::debug!(
            dimensions = %original.dimensions(),
            format = original.format.as_deref().unwrap_or("unknown"),
            color_type = %original.color_type,
            "Decoded image"
        );

        let img = ImageResize::fit_to_max_width(decoded.image, options.max_width);
        let img = ImageColor::to_grayscale(img);

        let format = ImageEncoder::select_format(decoded.format, options.fallback_format);
        tracing::debug!(format = ?format, "Encoding image");
        let encoded = ImageEncoder::encode(&img, format)?;

        let processed = ImageProcessor::describe(&img, Some(format), encoded.len() as u64);

        Ok(TransformedImage {
            data: encoded,
            format,
            original,
            processed,
        })
    }
}
