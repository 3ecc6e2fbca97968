//! Monochrome Image Processing Library
//!
//! Decodes an uploaded image, caps its width, converts it to single-channel
//! grayscale and re-encodes it, preferring the format it arrived in.

pub mod encoding;
pub mod error;
pub mod image;
pub mod metadata;

// Re-export commonly used types
pub use encoding::ImageEncoder;
pub use error::{ProcessingError, ProcessingResult};
pub use self::image::{
    DecodedImage, ImageColor, ImageProcessor, ImageResize, ImageTransformer, TransformOptions,
    TransformedImage,
};
pub use metadata::ImageMetadata;
