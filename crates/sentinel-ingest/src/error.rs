//! Error types for upload ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while accepting or parsing an upload.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Validation Errors ===
    /// The upload is not a CSV file.
    #[error("unsupported file type '{mime_type}', expected text/csv")]
    UnsupportedFileType { mime_type: String },

    // === File System Errors ===
    /// Failed to read the uploaded file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The contents could not be decoded or tokenized.
    #[error("failed to parse file: {reason}")]
    Parse { reason: String },
}

impl IngestError {
    /// Short message shown next to the upload control.
    ///
    /// Everything except a rejected file type collapses into one generic
    /// parse failure.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::UnsupportedFileType { .. } => "Please select a valid CSV file",
            Self::FileRead { .. } | Self::Parse { .. } => "Failed to parse file",
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        Self::Parse {
            reason: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
