//! Error taxonomy shared by ingestion, scanning, and fixing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QaError {
    #[error("scan root not found: {}", .0.display())]
    ScanRootNotFound(PathBuf),

    #[error("token source not found: {}", .0.display())]
    TokenSourceNotFound(PathBuf),

    #[error("token source {} is not valid JSON: {source}", path.display())]
    TokenJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot read or write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("invalid config {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl QaError {
    /// Missing inputs and bad config stop the run before any scanning.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            QaError::ScanRootNotFound(_) | QaError::TokenSourceNotFound(_) | QaError::Config { .. }
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QaError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, QaError>;
