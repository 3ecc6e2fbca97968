use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Resampling filter used whenever an image is scaled down
pub const RESAMPLING_FILTER: FilterType = FilterType::Lanczos3;

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Target dimensions for an image that must not exceed `max_width`.
    ///
    /// Returns `None` when the width is already within bounds. Otherwise the
    /// width becomes exactly `max_width` and the height is scaled by the same
    /// ratio, rounded down. Never upscales.
    pub fn max_width_dimensions(width: u32, height: u32, max_width: u32) -> Option<(u32, u32)> {
        if width <= max_width {
            return None;
        }

        let scaled = u64::from(height) * u64::from(max_width) / u64::from(width);
        // A raster needs at least one row
        let new_height = (scaled as u32).max(1);

        Some((max_width, new_height))
    }

    /// Scale `img` down to `max_width` if it is wider, keeping the aspect ratio
    pub fn fit_to_max_width(img: DynamicImage, max_width: u32) -> DynamicImage {
        let (width, height) = img.dimensions();

        match Self::max_width_dimensions(width, height, max_width) {
            Some((new_width, new_height)) => {
                tracing::debug!(
                    from = %format!("{}x{}", width, height),
                    to = %format!("{}x{}", new_width, new_height),
                    "Resizing image"
                );
                img.resize_exact(new_width, new_height, RESAMPLING_FILTER)
            }
            None => img,
        }
    }
}
