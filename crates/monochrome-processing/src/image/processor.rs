//! Image processor - decoding and metadata extraction

use crate::error::{ProcessingError, ProcessingResult};
use crate::metadata::ImageMetadata;
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::io::Cursor;

/// A decoded raster plus the container format the bytes were in
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub image: DynamicImage,
    pub format: Option<ImageFormat>,
    pub size_bytes: u64,
}

impl DecodedImage {
    pub fn metadata(&self) -> ImageMetadata {
        ImageProcessor::describe(&self.image, self.format, self.size_bytes)
    }
}

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode image bytes, guessing the format from the content
    pub fn decode(data: &[u8]) -> ProcessingResult<DecodedImage> {
        let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
        let format = reader.format();
        let image = reader.decode().map_err(ProcessingError::Decode)?;

        Ok(DecodedImage {
            image,
            format,
            size_bytes: data.len() as u64,
        })
    }

    /// Build metadata for an image held in memory
    pub fn describe(
        image: &DynamicImage,
        format: Option<ImageFormat>,
        size_bytes: u64,
    ) -> ImageMetadata {
        let (width, height) = image.dimensions();
        ImageMetadata {
            width,
            height,
            format: format.map(|f| format!("{:?}", f)),
            color_type: format!("{:?}", image.color()),
            size_bytes,
        }
    }
}
