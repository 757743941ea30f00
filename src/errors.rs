//! Error handling for the caplog application.
//!
//! `AppError` is the central error type; `AppResult` the convenience alias.
//! Flag parsing has its own error enum in [`crate::flags`] and is wrapped
//! here so the CLI layer can propagate everything with `?`.

use crate::flags::FlagError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Flags(#[from] FlagError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Journal(String),

    #[error("editor error: {0}")]
    Editor(String),

    #[error("git error: {0}")]
    Git(String),
}

pub type AppResult<T> = Result<T, AppError>;
