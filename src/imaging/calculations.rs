//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;
use super::params::Percent;

/// Scale one edge by a percentage, rounding to the nearest pixel.
///
/// Never returns zero: a 30px edge at 2% is 0.6px, which rounds to 1.
pub fn scale_edge(edge: u32, percent: Percent) -> u32 {
    let scaled = (edge as f64 * percent.value() as f64 / 100.0).round() as u32;
    scaled.max(1)
}

/// Calculate the dimensions of an image resized to `percent` of the original.
///
/// Both edges are scaled by the same factor, so the aspect ratio is kept up
/// to rounding.
///
/// # Examples
/// ```
/// # use ansi_assets::imaging::{Dimensions, Percent, scale_dimensions};
/// let original = Dimensions { width: 1920, height: 1080 };
/// let small = scale_dimensions(original, Percent::new(5).unwrap());
/// assert_eq!(small, Dimensions { width: 96, height: 54 });
/// ```
pub fn scale_dimensions(original: Dimensions, percent: Percent) -> Dimensions {
    Dimensions {
        width: scale_edge(original.width, percent),
        height: scale_edge(original.height, percent),
    }
}
