//! Subprocess helpers for the external tools.
//!
//! Two shapes of invocation exist: a converter whose stdout *is* the output
//! file, and a tool that writes its own output path and only reports through
//! its exit status. Both block until the child exits.

use super::backend::BackendError;
use std::ffi::OsStr;
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run `program args...` with stdout redirected into `output`.
///
/// The output file is created (or truncated) before the child starts. On
/// failure it keeps whatever the child managed to write.
pub fn run_to_file<I, S>(program: &Path, args: I, output: &Path) -> Result<(), BackendError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let file = File::create(output)?;
    let mut command = Command::new(program);
    command.args(args).stdout(Stdio::from(file));
    tracing::debug!(?command, output = %output.display(), "running converter");
    let status = command.status().map_err(|e| spawn_error(program, e))?;
    if !status.success() {
        return Err(BackendError::ToolFailed {
            program: program.display().to_string(),
            status,
        });
    }
    Ok(())
}

/// Run `program args...` and fail unless it exits with status zero.
pub fn run_status<I, S>(program: &Path, args: I) -> Result<(), BackendError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    tracing::debug!(?command, "running tool");
    let status = command.status().map_err(|e| spawn_error(program, e))?;
    if !status.success() {
        return Err(BackendError::ToolFailed {
            program: program.display().to_string(),
            status,
        });
    }
    Ok(())
}

fn spawn_error(program: &Path, err: io::Error) -> BackendError {
    match err.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => BackendError::ToolMissing {
            program: program.to_path_buf(),
        },
        _ => BackendError::Io(err),
    }
}
