//! Built-in resize engine using the `image` crate.
//!
//! Same contract as `magick <in> -resize <p>% <out>`: both edges are scaled
//! by the percentage (see [`scale_dimensions`]) and the result is encoded in
//! the format implied by the output extension. The whole input is decoded
//! into memory first, so resizing in place is safe.

use super::backend::{BackendError, Dimensions};
use super::calculations::scale_dimensions;
use super::params::ResizeParams;
use image::ImageReader;
use image::imageops::FilterType;
use std::path::Path;

/// Read the pixel dimensions of an image without decoding it.
pub fn identify(path: &Path) -> Result<Dimensions, BackendError> {
    let (width, height) = image::image_dimensions(path).map_err(|e| {
        BackendError::ProcessingFailed(format!("Failed to identify {}: {}", path.display(), e))
    })?;
    Ok(Dimensions { width, height })
}

/// Resize `params.source` to `params.percent` and save it to `params.output`.
pub fn resize(params: &ResizeParams) -> Result<(), BackendError> {
    let img = ImageReader::open(&params.source)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?
        .decode()
        .map_err(|e| {
            BackendError::ProcessingFailed(format!(
                "Failed to decode {}: {}",
                params.source.display(),
                e
            ))
        })?;

    let target = scale_dimensions(
        Dimensions {
            width: img.width(),
            height: img.height(),
        },
        params.percent,
    );
    tracing::debug!(
        source = %params.source.display(),
        output = %params.output.display(),
        width = target.width,
        height = target.height,
        "resizing with built-in engine"
    );

    let resized = img.resize_exact(target.width, target.height, FilterType::Lanczos3);
    resized.save(&params.output).map_err(|e| {
        BackendError::ProcessingFailed(format!(
            "Failed to write {}: {}",
            params.output.display(),
            e
        ))
    })
}
