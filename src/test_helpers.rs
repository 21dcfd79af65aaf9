//! Shared test utilities for the ansi-assets test suite.
//!
//! Provides a throwaway repository layout with the `.ans` sources and
//! reference documents the pipelines read, plus small helpers for writing
//! images and stub tools.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let repo = setup_repo();
//! run_with_backend(&logo(&AssetsConfig::default(), repo.path()), &MockBackend::new(), |_| {})
//!     .unwrap();
//! assert_eq!(file_names(&repo.path().join("res/logo"))[0], "full.png");
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp repository with the default resource layout.
///
/// ```text
/// res/logo/logo.ans
/// res/schemes/CLASSIC.ans, MODERN.ans
/// res/test/background.svg, background.png
/// res/screenshots/
/// ```
pub fn setup_repo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let res = tmp.path().join("res");
    for dir in ["logo", "schemes", "test", "screenshots"] {
        fs::create_dir_all(res.join(dir)).unwrap();
    }
    fs::write(res.join("logo/logo.ans"), "\x1b[1;31mLOGO\x1b[0m").unwrap();
    fs::write(res.join("schemes/CLASSIC.ans"), "\x1b[44m  \x1b[0m").unwrap();
    fs::write(res.join("schemes/MODERN.ans"), "\x1b[45m  \x1b[0m").unwrap();
    fs::write(
        res.join("test/background.svg"),
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="80" height="40"><rect width="80" height="40" fill="navy"/></svg>"#,
    )
    .unwrap();
    create_test_png(&res.join("test/background.png"), 80, 40);
    tmp
}

/// Write a solid-colour PNG of the given size.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([30, 60, 90]));
    img.save(path).unwrap();
}

/// Write an executable `/bin/sh` script.
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

// =========================================================================
// Lookups
// =========================================================================

/// Sorted file names directly inside `dir`, symlinks included.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot list {}: {e}", dir.display()))
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
