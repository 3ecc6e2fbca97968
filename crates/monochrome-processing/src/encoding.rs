//! Output format selection and encoding

use crate::error::{ProcessingError, ProcessingResult};
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;

/// Formats this build can write back out
const ENCODABLE_FORMATS: [ImageFormat; 6] = [
    ImageFormat::Jpeg,
    ImageFormat::Png,
    ImageFormat::WebP,
    ImageFormat::Gif,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
];

pub struct ImageEncoder;

impl ImageEncoder {
    /// Keep the source format when it is known and writable, otherwise use `fallback`
    pub fn select_format(source: Option<ImageFormat>, fallback: ImageFormat) -> ImageFormat {
        match source {
            Some(format) if ENCODABLE_FORMATS.contains(&format) => format,
            _ => fallback,
        }
    }

    /// Encode an image into `format`
    pub fn encode(img: &DynamicImage, format: ImageFormat) -> ProcessingResult<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        let result = match format {
            // The GIF encoder only takes RGB(A) frames; gray pixels stay gray in the palette
            ImageFormat::Gif => {
                DynamicImage::ImageRgba8(img.to_rgba8()).write_to(&mut buffer, format)
            }
            _ => img.write_to(&mut buffer, format),
        };

        result.map_err(|source| ProcessingError::Encode {
            format: format!("{:?}", format),
            source,
        })?;

        Ok(buffer.into_inner())
    }

    /// MIME type of an encoded format
    pub fn content_type(format: ImageFormat) -> &'static str {
        format.to_mime_type()
    }
}
