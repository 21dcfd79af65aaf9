//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the three operations every pipeline
//! step that produces pixels goes through: convert, resize and capture.
//!
//! The production implementation is
//! [`SystemBackend`](super::system_backend::SystemBackend), which shells out
//! to the converter binaries, resizes with `magick` or the built-in engine,
//! and drives headless Chrome for screenshots.

use super::params::{CaptureParams, ConvertParams, ResizeParams};
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Tool not found: {}", .program.display())]
    ToolMissing { program: PathBuf },
    #[error("{program} exited with {status}")]
    ToolFailed { program: String, status: ExitStatus },
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
    #[error("Could not launch headless browser: {0}")]
    BrowserLaunch(String),
    #[error("Browser error: {0}")]
    Browser(String),
    #[error("No element matching `{selector}` in {}", .document.display())]
    ElementNotFound { selector: String, document: PathBuf },
}

/// Width and height of a raster image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image backends.
///
/// Every operation reads and writes files only; nothing is handed back in
/// memory. Implementations create or overwrite exactly the output path named
/// in the parameters.
pub trait ImageBackend {
    /// Run a converter, writing its stdout to `params.output`.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;

    /// Resize `params.source` to a percentage and write `params.output`.
    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError>;

    /// Screenshot one element of a local document into `params.output`.
    fn capture(&self, params: &CaptureParams) -> Result<(), BackendError>;
}
