//! Error types for index loading.
//!
//! Everything that can go wrong while acquiring the index collapses into a
//! [`LoadError`], which the loader stores in its `Failed` state. Callers that
//! only care about the broad category use [`LoadError::kind`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Request for {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read index file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid index URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Index too large: {size} bytes (max {limit} bytes)")]
    TooLarge { size: u64, limit: u64 },

    #[error("Malformed index payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid index: {0}")]
    Invalid(String),

    #[error("Index fetch was interrupted before completing")]
    Interrupted,
}

/// Broad failure category of a [`LoadError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The payload could not be retrieved
    Transport,
    /// The payload was retrieved but is not a usable index
    Parse,
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::Transport { .. }
            | LoadError::InvalidUrl { .. }
            | LoadError::Io { .. }
            | LoadError::Status { .. }
            | LoadError::Interrupted => ErrorKind::Transport,
            LoadError::TooLarge { .. } | LoadError::Parse(_) | LoadError::Invalid(_) => {
                ErrorKind::Parse
            }
        }
    }
}
