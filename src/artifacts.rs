//! Generated-artifact lifecycle: stale cleanup, single-file removal, aliases.
//!
//! Every generated file is disposable. Before a pipeline regenerates its
//! outputs it wipes everything in the output directory that carries one of
//! its extensions, so a scheme that was renamed or retired cannot leave an
//! orphan behind. Only the top level of the directory is touched; canonical
//! sources (`.ans`) never match.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Failed to list {}: {source}", .dir.display())]
    List {
        dir: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to link {} -> {target}: {source}", .link.display())]
    Link {
        link: PathBuf,
        target: String,
        #[source]
        source: io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// True if `path` ends in one of `extensions` (exact match, no dot).
///
/// Case matters: `*.png` never matches `LOGO.PNG`.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x == e))
}

/// Remove every top-level entry of `dir` whose extension is in `extensions`.
///
/// Symlinks are removed themselves, never followed. A matching directory is
/// an error (it cannot be removed as a file); whatever was deleted before the
/// error stays deleted. A missing `dir` is created, since an empty directory
/// is already clean.
///
/// Returns the removed paths, sorted by file name.
pub fn clean_stale(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>, ArtifactError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        return Ok(Vec::new());
    }

    let mut removed = Vec::new();
    let entries = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();
    for entry in entries {
        let entry = entry.map_err(|source| ArtifactError::List {
            dir: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !has_extension(path, extensions) {
            continue;
        }
        std::fs::remove_file(path).map_err(|source| ArtifactError::Remove {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "removed stale artifact");
        removed.push(path.to_path_buf());
    }
    Ok(removed)
}

/// Remove one file if it is there. Returns whether anything was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool, ArtifactError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(ArtifactError::Remove {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Point `link` at `target`, replacing any existing entry at `link`.
///
/// `target` is stored as given (a bare file name), so the link resolves
/// relative to its own directory and survives moving the directory.
pub fn create_alias(target: &str, link: &Path) -> Result<(), ArtifactError> {
    let link_err = |source| ArtifactError::Link {
        link: link.to_path_buf(),
        target: target.to_string(),
        source,
    };
    if link.symlink_metadata().is_ok() {
        std::fs::remove_file(link).map_err(link_err)?;
    }
    symlink(target, link).map_err(link_err)
}

#[cfg(unix)]
fn symlink(target: &str, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &str, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn has_extension_is_case_sensitive() {
        let e = exts(&["png", "svg"]);
        assert!(has_extension(Path::new("a/logo.png"), &e));
        assert!(!has_extension(Path::new("a/logo.PNG"), &e));
        assert!(!has_extension(Path::new("a/Logo.Png"), &e));
        assert!(has_extension(Path::new("logo.svg"), &e));
        assert!(!has_extension(Path::new("logo.ans"), &e));
        assert!(!has_extension(Path::new("png"), &e));
    }

    #[test]
    fn clean_removes_only_matching_top_level_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        for name in ["logo.ans", "logo.png", "logo.svg", "old-name.png", "notes.txt"] {
            fs::write(dir.join(name), name).unwrap();
        }
        fs::create_dir(dir.join("nested")).unwrap();
        fs::write(dir.join("nested/keep.png"), "x").unwrap();

        let removed = clean_stale(dir, &exts(&["png", "svg"])).unwrap();

        assert_eq!(removed.len(), 3);
        assert_eq!(names(dir), vec!["logo.ans", "nested", "notes.txt"]);
        assert!(dir.join("nested/keep.png").exists());
    }

    #[test]
    fn clean_png_only_leaves_svg() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("CLASSIC.png"), "").unwrap();
        fs::write(dir.join("diagram.svg"), "").unwrap();

        clean_stale(dir, &exts(&["png"])).unwrap();

        assert_eq!(names(dir), vec!["diagram.svg"]);
    }

    #[test]
    fn clean_keeps_uppercase_extensions() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("HANDMADE.PNG"), "by hand").unwrap();
        fs::write(dir.join("Logo.Png"), "by hand").unwrap();
        fs::write(dir.join("logo.png"), "generated").unwrap();

        let removed = clean_stale(dir, &exts(&["png"])).unwrap();

        assert_eq!(removed, vec![dir.join("logo.png")]);
        assert_eq!(names(dir), vec!["HANDMADE.PNG", "Logo.Png"]);
    }

    #[cfg(unix)]
    #[test]
    fn clean_removes_symlinks_without_touching_targets() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("logo");
        let outside = tmp.path().join("outside.png");
        fs::create_dir(&dir).unwrap();
        fs::write(&outside, "keep me").unwrap();
        std::os::unix::fs::symlink(&outside, dir.join("full.png")).unwrap();

        clean_stale(&dir, &exts(&["png"])).unwrap();

        assert!(dir.join("full.png").symlink_metadata().is_err());
        assert_eq!(fs::read_to_string(&outside).unwrap(), "keep me");
    }

    #[test]
    fn clean_missing_directory_creates_it() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("res/schemes");

        let removed = clean_stale(&dir, &exts(&["png"])).unwrap();

        assert!(removed.is_empty());
        assert!(dir.is_dir());
    }

    #[test]
    fn clean_fails_on_matching_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        fs::write(dir.join("a.png"), "").unwrap();
        fs::create_dir(dir.join("b.png")).unwrap();

        let result = clean_stale(dir, &exts(&["png"]));

        assert!(matches!(result, Err(ArtifactError::Remove { .. })));
        // Partial cleanup is kept: a.png sorts first and is already gone.
        assert!(!dir.join("a.png").exists());
    }

    #[test]
    fn clean_twice_is_a_no_op() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("svg.png"), "").unwrap();

        clean_stale(tmp.path(), &exts(&["png"])).unwrap();
        let second = clean_stale(tmp.path(), &exts(&["png"])).unwrap();

        assert!(second.is_empty());
    }

    #[test]
    fn remove_if_exists_reports_presence() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("svg.png");
        fs::write(&path, "").unwrap();

        assert!(remove_if_exists(&path).unwrap());
        assert!(!remove_if_exists(&path).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn alias_resolves_to_target_bytes() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("logo.png"), b"\x89PNG pixels").unwrap();
        let link = tmp.path().join("full.png");

        create_alias("logo.png", &link).unwrap();

        assert_eq!(fs::read_link(&link).unwrap(), Path::new("logo.png"));
        assert_eq!(fs::read(&link).unwrap(), b"\x89PNG pixels");
    }

    #[cfg(unix)]
    #[test]
    fn alias_replaces_existing_entry() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("logo.png"), "new").unwrap();
        fs::write(tmp.path().join("old.png"), "old").unwrap();
        let link = tmp.path().join("full.png");
        create_alias("old.png", &link).unwrap();

        create_alias("logo.png", &link).unwrap();

        assert_eq!(fs::read_to_string(&link).unwrap(), "new");
    }
}
