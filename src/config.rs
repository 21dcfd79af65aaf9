//! Pipeline configuration.
//!
//! Every path, scheme name and percentage the pipelines use lives in
//! [`AssetsConfig`]. Its `Default` is the canonical asset layout, so running
//! without a config file regenerates exactly the checked-in assets. A TOML
//! file passed with `--config` is merged over the stock defaults; it only
//! needs the keys it changes.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below.
//! # Paths are relative to the repository root (--root).
//! # Percentages are whole numbers from 1 to 100.
//!
//! [tools]
//! converter_dir = "target/release"  # holds cp437-to-png and cp437-to-svg
//! resize_engine = "magick"          # "magick" or "builtin"
//! magick = "magick"                 # resize program for the magick engine
//!
//! [logo]
//! dir = "res/logo"
//! source = "logo.ans"
//! extensions = ["png", "svg"]       # cleaned before regeneration
//! primary = "logo"                  # logo.png and logo.svg
//! alias = "full"                    # full.png -> logo.png
//! sizes = [{ name = "small", percent = 5 }, { name = "tiny", percent = 2 }]
//!
//! [schemes]
//! dir = "res/schemes"
//! extensions = ["png"]
//! names = ["CLASSIC", "MODERN"]     # <NAME>.ans rendered with scheme NAME
//! percent = 10
//!
//! [screenshots]
//! dir = "res/screenshots"
//! reference_dir = "res/test"
//! svg_document = "background.svg"
//! png_document = "background.png"
//! selector = "svg"
//! settle_ms = 1000
//! percent = 5
//! svg_output = "svg.png"
//! png_output = "png.png"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{Percent, ResizeEngine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

const LOGO_SMALL: Percent = Percent::of(5);
const LOGO_TINY: Percent = Percent::of(2);
const SCHEME_SWATCH: Percent = Percent::of(10);
const SCREENSHOT: Percent = Percent::of(5);

/// Full configuration for all three pipelines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub tools: ToolsConfig,
    pub logo: LogoConfig,
    pub schemes: SchemesConfig,
    pub screenshots: ScreenshotsConfig,
}

/// Where the external tools live and which resize engine runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub converter_dir: String,
    pub resize_engine: ResizeEngine,
    pub magick: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            converter_dir: "target/release".to_string(),
            resize_engine: ResizeEngine::Magick,
            magick: "magick".to_string(),
        }
    }
}

/// One downscaled copy of the primary logo render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeConfig {
    /// File stem of the output, e.g. `small` for `small.png`.
    pub name: String,
    pub percent: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoConfig {
    pub dir: String,
    pub source: String,
    pub extensions: Vec<String>,
    /// Stem of the primary raster and vector renders.
    pub primary: String,
    /// Stem of the symlink pointing at the primary raster render.
    pub alias: String,
    pub sizes: Vec<SizeConfig>,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            dir: "res/logo".to_string(),
            source: "logo.ans".to_string(),
            extensions: vec!["png".to_string(), "svg".to_string()],
            primary: "logo".to_string(),
            alias: "full".to_string(),
            sizes: vec![
                SizeConfig {
                    name: "small".to_string(),
                    percent: LOGO_SMALL,
                },
                SizeConfig {
                    name: "tiny".to_string(),
                    percent: LOGO_TINY,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemesConfig {
    pub dir: String,
    pub extensions: Vec<String>,
    /// Each name is both the source stem (`<NAME>.ans`) and the scheme argument.
    pub names: Vec<String>,
    pub percent: Percent,
}

impl Default for SchemesConfig {
    fn default() -> Self {
        Self {
            dir: "res/schemes".to_string(),
            extensions: vec!["png".to_string()],
            names: vec!["CLASSIC".to_string(), "MODERN".to_string()],
            percent: SCHEME_SWATCH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenshotsConfig {
    pub dir: String,
    pub reference_dir: String,
    pub svg_document: String,
    pub png_document: String,
    /// CSS selector of the element captured from the SVG document.
    pub selector: String,
    pub settle_ms: u64,
    pub percent: Percent,
    pub svg_output: String,
    pub png_output: String,
}

impl Default for ScreenshotsConfig {
    fn default() -> Self {
        Self {
            dir: "res/screenshots".to_string(),
            reference_dir: "res/test".to_string(),
            svg_document: "background.svg".to_string(),
            png_document: "background.png".to_string(),
            selector: "svg".to_string(),
            settle_ms: 1000,
            percent: SCREENSHOT,
            svg_output: "svg.png".to_string(),
            png_output: "png.png".to_string(),
        }
    }
}

/// A file name that stays inside its directory.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(['/', '\\']) && name != "." && name != ".."
}

impl AssetsConfig {
    /// Validate values that deserialization alone cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logo.extensions.is_empty() || self.schemes.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "cleanup extensions must not be empty".into(),
            ));
        }
        if self.schemes.names.is_empty() {
            return Err(ConfigError::Validation(
                "schemes.names must not be empty".into(),
            ));
        }
        let mut stems = vec![self.logo.primary.as_str(), self.logo.alias.as_str()];
        stems.extend(self.logo.sizes.iter().map(|s| s.name.as_str()));
        for (i, stem) in stems.iter().enumerate() {
            if !is_plain_name(stem) {
                return Err(ConfigError::Validation(format!(
                    "logo output name {stem:?} must be a plain file stem"
                )));
            }
            if stems[..i].contains(stem) {
                return Err(ConfigError::Validation(format!(
                    "logo output name {stem:?} is used twice"
                )));
            }
        }
        for name in &self.schemes.names {
            if !is_plain_name(name) {
                return Err(ConfigError::Validation(format!(
                    "scheme name {name:?} must be a plain file stem"
                )));
            }
        }
        let shots = &self.screenshots;
        for (key, name) in [
            ("svg_document", &shots.svg_document),
            ("png_document", &shots.png_document),
            ("svg_output", &shots.svg_output),
            ("png_output", &shots.png_output),
        ] {
            if !is_plain_name(name) {
                return Err(ConfigError::Validation(format!(
                    "screenshots.{key} {name:?} must be a plain file name"
                )));
            }
        }
        if self.screenshots.svg_output == self.screenshots.png_output {
            return Err(ConfigError::Validation(
                "screenshots.svg_output and png_output must differ".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(AssetsConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load the config: stock defaults, overlaid with `path` when given.
///
/// Rejects unknown keys and validates the merged result.
pub fn load_config(path: Option<&Path>) -> Result<AssetsConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let overlay: toml::Value = toml::from_str(&content)?;
            merge_toml(base, overlay)
        }
        None => base,
    };
    let config: AssetsConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns the stock config as commented TOML, for the `gen-config` command.
pub fn stock_config_toml() -> &'static str {
    r##"# ansi-assets configuration
# =========================
# All options are optional. Values shown are the defaults.
# Paths are relative to the repository root (--root).
# Every `percent` is a whole number from 1 to 100, applied to both width and
# height. Fractions and enlargements are rejected.

[tools]
# Directory holding the cp437-to-png and cp437-to-svg converters.
converter_dir = "target/release"
# "magick" shells out to ImageMagick; "builtin" resizes in-process.
resize_engine = "magick"
magick = "magick"

[logo]
dir = "res/logo"
source = "logo.ans"
# Every file with these extensions in `dir` is removed before regeneration.
extensions = ["png", "svg"]
# Stem of the primary renders: logo.png and logo.svg.
primary = "logo"
# Stem of the symlink to the primary raster render: full.png -> logo.png.
alias = "full"
# Downscaled copies of the primary raster render.
sizes = [
    { name = "small", percent = 5 },
    { name = "tiny", percent = 2 },
]

[schemes]
dir = "res/schemes"
extensions = ["png"]
# Each scheme renders <NAME>.ans with NAME as the converter's scheme argument.
names = ["CLASSIC", "MODERN"]
percent = 10

[screenshots]
dir = "res/screenshots"
reference_dir = "res/test"
svg_document = "background.svg"
png_document = "background.png"
# First element matching this selector is captured.
selector = "svg"
# Pause after navigation before capturing, in milliseconds.
settle_ms = 1000
percent = 5
svg_output = "svg.png"
png_output = "png.png"
"##
}
