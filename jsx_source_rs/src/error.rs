//! Error type for the layers around the annotation pass.
//!
//! The annotation pass itself never fails: a node it cannot stamp is skipped.
//! Errors only come from reading files, parsing source text and loading
//! configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, parsing or configuring a transform.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing a source/config file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source text could not be parsed into a markup tree.
    #[error("failed to parse {path}: {}", .messages.join("; "))]
    Parse { path: String, messages: Vec<String> },

    /// A config file was present but malformed.
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Plugin options failed the strict shape/value check.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
