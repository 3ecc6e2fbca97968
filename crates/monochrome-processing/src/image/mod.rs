//! Image processing module
//!
//! - Decoding and metadata extraction (processor)
//! - Width capping (resize)
//! - Grayscale conversion (color)
//! - The full decode → resize → grayscale → encode chain (transformer)

pub mod color;
pub mod processor;
pub mod resize;
pub mod transformer;

pub use color::ImageColor;
pub use processor::{DecodedImage, ImageProcessor};
pub use resize::ImageResize;
pub use transformer::{ImageTransformer, TransformOptions, TransformedImage};
