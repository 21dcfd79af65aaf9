//! Image production: the three capabilities every pipeline step needs.
//!
//! | Operation | Implementation |
//! |---|---|
//! | **Convert** | `cp437-to-png` / `cp437-to-svg`, stdout redirected to the output file |
//! | **Resize** | `magick <in> -resize <p>% <out>`, or Lanczos3 via the `image` crate |
//! | **Capture** | headless Chrome, screenshot of one element |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for percentage math (unit testable)
//! - **Parameters**: Data structures describing each operation
//! - **Backend**: [`ImageBackend`] trait + [`SystemBackend`]
//! - **Command / Browser / Rust backend**: the concrete tool drivers

pub mod backend;
mod browser;
mod calculations;
mod command;
mod params;
pub mod rust_backend;
pub mod system_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{scale_dimensions, scale_edge};
pub use params::{CaptureParams, ConvertParams, ConverterKind, Percent, ResizeParams};
pub use system_backend::{ResizeEngine, SystemBackend};
