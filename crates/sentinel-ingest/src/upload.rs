//! Upload acceptance: file type check and decoding.

use std::path::Path;

use tracing::{info_span, warn};

use crate::error::{IngestError, Result};
use crate::reader::{IngestedUpload, parse_transactions};

/// The only accepted upload type.
pub const CSV_MIME_TYPE: &str = "text/csv";

/// A file handed to the Upload stage.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub mime_type: String,
    pub contents: Vec<u8>,
}

impl Upload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        contents: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            contents: contents.into(),
        }
    }

    /// Reads a file from disk, deriving its MIME type from the extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read(path).map_err(|source| IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        Ok(Self::new(file_name, mime_type_for_path(path), contents))
    }

    /// Overrides the detected MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }
}

/// MIME type for a path, judged by extension only.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => CSV_MIME_TYPE,
        Some(ext) if ext.eq_ignore_ascii_case("txt") => "text/plain",
        Some(ext) if ext.eq_ignore_ascii_case("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Rejects anything that is not `text/csv`.
pub fn validate_upload(upload: &Upload) -> Result<()> {
    if upload.mime_type.trim().eq_ignore_ascii_case(CSV_MIME_TYPE) {
        Ok(())
    } else {
        warn!(
            file_name = %upload.file_name,
            mime_type = %upload.mime_type,
            "rejected upload"
        );
        Err(IngestError::UnsupportedFileType {
            mime_type: upload.mime_type.clone(),
        })
    }
}

/// Validates, decodes, and parses an upload.
pub fn ingest_upload(upload: &Upload) -> Result<IngestedUpload> {
    let span = info_span!("ingest", file_name = %upload.file_name, bytes = upload.contents.len());
    let _guard = span.enter();
    validate_upload(upload)?;
    let text = std::str::from_utf8(&upload.contents).map_err(|err| IngestError::Parse {
        reason: err.to_string(),
    })?;
    parse_transactions(text)
}
