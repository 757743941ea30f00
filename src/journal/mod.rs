//! Journal entry model and persistence.
//!
//! A log entry is a timestamped block of text lines plus optional tags.
//! Entries are written under `<local_repository>/logbook` (or a named page
//! sub-directory) and committed to the repository right away.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::git;
use chrono::{DateTime, Local, SecondsFormat};
use sha1::{Digest, Sha1};
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const WRITE_DIR: &str = "logbook";
const TIME_FORMAT: &str = "%H:%M";
const TIME_FILE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const HASH_LEN: usize = 7;

/// Entry metadata supplied by the CLI layer.
#[derive(Debug, Clone)]
pub struct Meta {
    pub date: DateTime<Local>,
    /// Optional sub-directory ("page") under the logbook.
    pub page: Option<String>,
}

/// One journal entry.
#[derive(Debug, Clone)]
pub struct Log {
    pub meta: Meta,
    lines: Vec<String>,
    tags: Vec<String>,
}

impl Log {
    /// Builds an entry from raw text, splitting it into lines.
    pub fn new(meta: Meta, text: &str, tags: Vec<String>) -> Self {
        let lines = text.lines().map(str::to_string).collect();
        Log { meta, lines, tags }
    }

    /// True when the entry carries no text at all.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// Renders the entry: `HH:MM\t<first line>` with tags appended as
    /// `#tag` tokens, remaining lines verbatim, trailing newline.
    fn format(&self) -> String {
        let mut out = format!(
            "{}\t{}",
            self.meta.date.format(TIME_FORMAT),
            self.lines.first().map(String::as_str).unwrap_or_default()
        );
        for tag in &self.tags {
            let _ = write!(out, " #{}", tag);
        }
        for line in self.lines.iter().skip(1) {
            let _ = write!(out, "\n{}", line);
        }
        out.push('\n');
        out
    }

    /// Entry filename: second-precision timestamp plus a short digest of
    /// the full-precision timestamp, so entries written within the same
    /// second still get distinct names.
    fn filename(&self) -> String {
        let stamp = self
            .meta
            .date
            .to_rfc3339_opts(SecondsFormat::Nanos, true);
        let digest = Sha1::digest(stamp.as_bytes());
        let mut hash = String::with_capacity(HASH_LEN);
        for byte in digest.iter().take(HASH_LEN.div_ceil(2)) {
            let _ = write!(hash, "{:02x}", byte);
        }
        hash.truncate(HASH_LEN);

        format!(
            "{}_{}.log",
            self.meta.date.format(TIME_FILE_FORMAT),
            hash
        )
    }
}

/// Writes the entry into the logbook and commits it.
///
/// Creates the logbook (and page) directory as needed. Returns the path of
/// the written entry file.
///
/// # Errors
///
/// `AppError::Journal` for an empty entry, `AppError::Io` for filesystem
/// failures, and whatever the git wrapper reports for the commit.
pub fn write(config: &Config, log: &Log) -> AppResult<PathBuf> {
    if log.is_empty() {
        return Err(AppError::Journal("no data provided".to_string()));
    }

    let mut dir = config.local_repository.join(WRITE_DIR);
    if let Some(page) = &log.meta.page {
        dir = dir.join(page);
    }
    fs::create_dir_all(&dir)?;

    let filename = log.filename();
    let path = dir.join(&filename);
    fs::write(&path, log.format())?;
    debug!(entry = %path.display(), "journal entry written");

    git::commit_single_file(&config.local_repository, &path, &format!("log: {}", filename))?;
    Ok(path)
}
