//! The text-editor capture step.
//!
//! When no entry text is given on the command line, caplog opens the
//! configured editor on an empty temp file and reads the buffer back once
//! the editor exits.

use crate::errors::{AppError, AppResult};
use std::fs;
use std::io;
use std::process::Command;
use tracing::debug;

/// Launches `editor` on a fresh temp file and returns what the user wrote.
///
/// The editor inherits stdin/stdout/stderr so interactive editors work.
/// The temp file is removed when this function returns.
///
/// # Errors
///
/// `AppError::Editor` when the editor cannot be launched or exits
/// unsuccessfully, `AppError::Io` when the buffer cannot be read back.
pub fn capture_input(editor: &str) -> AppResult<String> {
    let file = tempfile::Builder::new()
        .prefix("caplog")
        .tempfile()
        .map_err(AppError::Io)?;

    debug!(editor, buffer = %file.path().display(), "launching editor");
    let status = Command::new(editor)
        .arg(file.path())
        .status()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => {
                AppError::Editor(format!("editor {:?} not found in path", editor))
            }
            _ => AppError::Editor(format!("cannot launch editor {:?}: {}", editor, e)),
        })?;

    if !status.success() {
        return Err(AppError::Editor(format!(
            "editor {:?} exited unsuccessfully",
            editor
        )));
    }

    Ok(fs::read_to_string(file.path())?)
}
