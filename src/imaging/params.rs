//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the pipeline steps (which decide what files to produce)
//! and the [`backend`](super::backend) (which runs the converter, the resize
//! engine or the browser). Keeping them plain data lets tests swap in a mock
//! backend and assert on the exact parameters each step asked for.
//!
//! ## Types
//!
//! - [`Percent`]: Resize factor as a percentage of the original linear dimensions (1–100).
//! - [`ConverterKind`]: Which converter binary renders the source (raster or vector).
//! - [`ConvertParams`]: Source `.ans`, optional scheme, destination file.
//! - [`ResizeParams`]: Input image, percentage, output image (may equal input).
//! - [`CaptureParams`]: Reference document, element selector, settle delay, destination.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Resize factor relative to the original width and height.
///
/// `Percent(5)` means "5% of the original linear dimensions", which is what
/// `magick ... -resize 5%` does. Zero is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Percent(u32);

impl Percent {
    /// Returns `None` for zero or anything above 100.
    pub fn new(value: u32) -> Option<Self> {
        (1..=100).contains(&value).then_some(Self(value))
    }

    /// Compile-time constructor for constants. Panics if out of range.
    pub const fn of(value: u32) -> Self {
        assert!(value >= 1 && value <= 100, "percentage must be 1-100");
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The geometry argument passed to the resize tool, e.g. `"5%"`.
    pub fn as_geometry(self) -> String {
        format!("{}%", self.0)
    }
}

impl TryFrom<u32> for Percent {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("percentage must be 1-100, got {value}"))
    }
}

impl From<Percent> for u32 {
    fn from(p: Percent) -> Self {
        p.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// The two converter binaries built alongside the art sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterKind {
    Png,
    Svg,
}

impl ConverterKind {
    /// File name of the converter executable inside the converter directory.
    pub fn binary_name(self) -> &'static str {
        match self {
            ConverterKind::Png => "cp437-to-png",
            ConverterKind::Svg => "cp437-to-svg",
        }
    }
}

/// Parameters for one converter run: `converter <source> [scheme] > output`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub kind: ConverterKind,
    pub source: PathBuf,
    pub scheme: Option<String>,
    pub output: PathBuf,
}

impl ConvertParams {
    /// Converter arguments in invocation order.
    pub fn args(&self) -> Vec<String> {
        let mut args = vec![self.source.to_string_lossy().into_owned()];
        if let Some(scheme) = &self.scheme {
            args.push(scheme.clone());
        }
        args
    }
}

/// Parameters for a percentage resize. `source == output` means in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeParams {
    pub source: PathBuf,
    pub output: PathBuf,
    pub percent: Percent,
}

impl ResizeParams {
    pub fn in_place(&self) -> bool {
        self.source == self.output
    }
}

/// Parameters for a single element screenshot of a local document.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureParams {
    pub document: PathBuf,
    /// CSS selector of the element to capture; the first match wins.
    pub selector: String,
    /// Fixed pause between navigation and capture for deferred rendering.
    pub settle: Duration,
    pub output: PathBuf,
}
