use image::DynamicImage;

/// Color mode conversions
pub struct ImageColor;

impl ImageColor {
    /// Convert to single-channel 8-bit luminance, dropping any alpha channel.
    ///
    /// `DynamicImage::grayscale` keeps alpha (RGBA becomes LumaA), which is not
    /// single-channel, so the luma buffer is built explicitly.
    pub fn to_grayscale(img: DynamicImage) -> DynamicImage {
        match img {
            DynamicImage::ImageLuma8(_) => img,
            other => DynamicImage::ImageLuma8(other.to_luma8()),
        }
    }
}
