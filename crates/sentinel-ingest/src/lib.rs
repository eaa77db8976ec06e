//! Transaction upload ingestion.
//!
//! This crate turns an uploaded file into the data the wizard works on:
//!
//! - **Upload validation**: only `text/csv` files are accepted
//! - **CSV parsing**: header-driven records with numeric coercion; rows whose
//!   width differs from the header are dropped
//! - **Raw sample**: the first lines of the file, kept verbatim for schema analysis
//! - **Column profile**: local per-column counts of numeric, text, and empty cells
//!
//! # Example
//!
//! ```
//! use sentinel_ingest::parse_transactions;
//!
//! let upload = parse_transactions("V1,Amount,Class\n-1.35,499.0,0\n0.5,49.0,1\n")?;
//! assert_eq!(upload.dataset.len(), 2);
//! # Ok::<(), sentinel_ingest::IngestError>(())
//! ```

mod error;
mod profile;
mod reader;
mod upload;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Parsing ===
pub use reader::{IngestedUpload, SAMPLE_LINES, coerce_cell, parse_transactions, sample_lines};

// === Upload Handling ===
pub use upload::{CSV_MIME_TYPE, Upload, ingest_upload, mime_type_for_path, validate_upload};

// === Column Profile ===
pub use profile::{ColumnProfile, profile_columns};
