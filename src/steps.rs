//! Typed step descriptors.
//!
//! A pipeline is data: an ordered list of [`Step`]s. Each step names the
//! files it needs ([`Step::inputs`]) and the files it leaves behind
//! ([`Step::outputs`]). Steps only talk to each other through those files,
//! which lets the runner check preconditions before touching anything.

use crate::imaging::{CaptureParams, ConvertParams, ResizeParams};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Delete every top-level file in `dir` with one of `extensions`.
    Clean {
        dir: PathBuf,
        extensions: Vec<String>,
    },
    /// Delete a single file if present. A missing file is not an error, so a
    /// first run with no previous output succeeds.
    Remove { path: PathBuf },
    /// Render an `.ans` source with a converter binary.
    Convert(ConvertParams),
    /// Scale an image by a percentage.
    Resize(ResizeParams),
    /// Symlink `link` to the sibling file named `target`.
    Alias { target: String, link: PathBuf },
    /// Screenshot an element of a local document.
    Capture(CaptureParams),
}

impl Step {
    /// Short kind name used in progress output.
    pub fn label(&self) -> &'static str {
        match self {
            Step::Clean { .. } => "clean",
            Step::Remove { .. } => "remove",
            Step::Convert(_) => "convert",
            Step::Resize(_) => "resize",
            Step::Alias { .. } => "alias",
            Step::Capture(_) => "capture",
        }
    }

    /// Files that must exist before the step runs.
    pub fn inputs(&self) -> Vec<PathBuf> {
        match self {
            Step::Clean { .. } | Step::Remove { .. } => Vec::new(),
            Step::Convert(p) => vec![p.source.clone()],
            Step::Resize(p) => vec![p.source.clone()],
            Step::Alias { target, link } => vec![alias_target(link, target)],
            Step::Capture(p) => vec![p.document.clone()],
        }
    }

    /// Files the step creates or overwrites.
    pub fn outputs(&self) -> Vec<PathBuf> {
        match self {
            Step::Clean { .. } | Step::Remove { .. } => Vec::new(),
            Step::Convert(p) => vec![p.output.clone()],
            Step::Resize(p) => vec![p.output.clone()],
            Step::Alias { link, .. } => vec![link.clone()],
            Step::Capture(p) => vec![p.output.clone()],
        }
    }
}

/// Where a relative alias target lands: next to the link.
pub fn alias_target(link: &Path, target: &str) -> PathBuf {
    link.parent()
        .map(|dir| dir.join(target))
        .unwrap_or_else(|| PathBuf::from(target))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// One-line human description, naming files rather than full paths.
impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Clean { dir, extensions } => {
                let globs: Vec<String> = extensions.iter().map(|e| format!("*.{e}")).collect();
                write!(f, "clean {} in {}", globs.join(" "), dir.display())
            }
            Step::Remove { path } => write!(f, "remove {}", file_name(path)),
            Step::Convert(p) => {
                write!(f, "{} {}", p.kind.binary_name(), file_name(&p.source))?;
                if let Some(scheme) = &p.scheme {
                    write!(f, " {scheme}")?;
                }
                write!(f, " > {}", file_name(&p.output))
            }
            Step::Resize(p) if p.in_place() => {
                write!(f, "resize {} to {} in place", file_name(&p.source), p.percent)
            }
            Step::Resize(p) => write!(
                f,
                "resize {} to {} > {}",
                file_name(&p.source),
                p.percent,
                file_name(&p.output)
            ),
            Step::Alias { target, link } => write!(f, "link {} -> {target}", file_name(link)),
            Step::Capture(p) => write!(
                f,
                "capture <{}> of {} after {}ms > {}",
                p.selector,
                file_name(&p.document),
                p.settle.as_millis(),
                file_name(&p.output)
            ),
        }
    }
}
