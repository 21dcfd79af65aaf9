//! The production backend: real converters, real resizer, real browser.

use super::backend::{BackendError, ImageBackend};
use super::params::{CaptureParams, ConvertParams, ResizeParams};
use super::{browser, command, rust_backend};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::PathBuf;

/// Which implementation performs percentage resizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResizeEngine {
    /// Shell out to ImageMagick: `magick <in> -resize <p>% <out>`.
    #[default]
    Magick,
    /// Resize in-process with the `image` crate.
    Builtin,
}

/// Backend that drives the external tools.
#[derive(Debug, Clone)]
pub struct SystemBackend {
    /// Directory holding `cp437-to-png` and `cp437-to-svg`.
    pub converter_dir: PathBuf,
    pub engine: ResizeEngine,
    /// Program used when `engine` is [`ResizeEngine::Magick`].
    pub magick: PathBuf,
}

impl SystemBackend {
    pub fn new(converter_dir: PathBuf, engine: ResizeEngine, magick: PathBuf) -> Self {
        Self {
            converter_dir,
            engine,
            magick,
        }
    }
}

impl ImageBackend for SystemBackend {
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let program = self.converter_dir.join(params.kind.binary_name());
        command::run_to_file(&program, params.args(), &params.output)
    }

    fn resize(&self, params: &ResizeParams) -> Result<(), BackendError> {
        match self.engine {
            ResizeEngine::Magick => {
                let geometry = params.percent.as_geometry();
                let args: [&OsStr; 4] = [
                    params.source.as_os_str(),
                    OsStr::new("-resize"),
                    OsStr::new(&geometry),
                    params.output.as_os_str(),
                ];
                command::run_status(&self.magick, args)
            }
            ResizeEngine::Builtin => rust_backend::resize(params),
        }
    }

    fn capture(&self, params: &CaptureParams) -> Result<(), BackendError> {
        browser::capture_element(params)
    }
}
