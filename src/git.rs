//! Thin wrapper around the `git` binary.
//!
//! Commands run scoped to the repository directory via `current_dir`; the
//! process working directory is never changed. The remote push is launched
//! detached and unsupervised: a failed push is reconciled by the
//! `pull --rebase` on the next entry, not observed here.

use crate::errors::{AppError, AppResult};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Commits one file into the repository rooted at `dir`, initialising the
/// repository first when needed.
///
/// When a remote is configured, the local branch is rebased on it and a
/// detached `push --force-with-lease` is fired off.
///
/// # Errors
///
/// `AppError::Git` when the git binary is missing or a non-detached
/// command exits unsuccessfully.
pub fn commit_single_file(dir: &Path, path: &Path, message: &str) -> AppResult<()> {
    if !is_git_repository(dir) {
        run_git(dir, &["init", "-q", "-b", "trunk", "."])?;
        info!(repository = %dir.display(), "initialised logbook repository");
    }

    let file = path.to_string_lossy();
    run_git(dir, &["add", file.as_ref()])?;
    run_git(dir, &["commit", "-q", "-m", message, file.as_ref()])?;
    debug!(file = %path.display(), "entry committed");

    if has_git_remote(dir) {
        run_git(dir, &["pull", "--rebase=merges", "-q"])?;
        spawn_detached_git(dir, &["push", "--force-with-lease", "-q"])?;
        debug!("remote push started");
    }

    Ok(())
}

fn is_git_repository(dir: &Path) -> bool {
    dir.join(".git").exists() && run_git(dir, &["rev-parse", "--git-dir"]).is_ok()
}

fn has_git_remote(dir: &Path) -> bool {
    run_git(dir, &["ls-remote", "-q"]).is_ok()
}

fn run_git(dir: &Path, args: &[&str]) -> AppResult<()> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .map_err(map_spawn_error)?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(AppError::Git(format!(
            "git {} failed: {}",
            args.first().copied().unwrap_or_default(),
            stderr.trim()
        )))
    }
}

/// Fire-and-forget: the child is spawned and dropped, never waited on.
fn spawn_detached_git(dir: &Path, args: &[&str]) -> AppResult<()> {
    Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(map_spawn_error)?;
    Ok(())
}

fn map_spawn_error(e: io::Error) -> AppError {
    if e.kind() == io::ErrorKind::NotFound {
        AppError::Git("git executable not found in path".to_string())
    } else {
        AppError::Git(format!("cannot run git: {}", e))
    }
}
