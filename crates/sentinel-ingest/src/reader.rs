//! Header-driven CSV parsing with numeric coercion.

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use sentinel_model::{CellValue, Dataset};

use crate::error::Result;

/// Number of raw lines kept as the analysis sample.
pub const SAMPLE_LINES: usize = 50;

/// Result of parsing one upload.
#[derive(Debug, Clone)]
pub struct IngestedUpload {
    /// Records whose width matched the header.
    pub dataset: Dataset,
    /// First [`SAMPLE_LINES`] lines of the raw text, verbatim.
    pub sample: String,
    /// Data rows discarded for a width mismatch.
    pub dropped_rows: usize,
}

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

fn is_blank_line(record: &StringRecord) -> bool {
    record.len() == 1 && record.get(0).is_some_and(|value| value.trim().is_empty())
}

/// Coerces one token.
///
/// Empty and whitespace-only tokens become [`CellValue::Empty`]. Tokens that
/// parse as a finite number (after trimming) become [`CellValue::Number`].
/// Everything else, including `NaN` and `inf`, is kept verbatim as text.
pub fn coerce_cell(token: &str) -> CellValue {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => CellValue::Number(value),
        _ => CellValue::Text(token.to_string()),
    }
}

/// The first [`SAMPLE_LINES`] lines of `text`, joined with `\n`.
pub fn sample_lines(text: &str) -> String {
    text.split('\n')
        .take(SAMPLE_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses uploaded text into records plus the raw sample.
///
/// The first non-blank line is the header. Fields are split on every comma;
/// quotes carry no meaning. Rows whose field count differs from the header are
/// skipped without error.
pub fn parse_transactions(text: &str) -> Result<IngestedUpload> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let mut header = None;
    for record in records.by_ref() {
        let record = record?;
        if !is_blank_line(&record) {
            header = Some(record);
            break;
        }
    }
    let mut dataset = match header {
        Some(header) => Dataset::new(header.iter().map(normalize_header).collect()),
        None => Dataset::default(),
    };

    let mut dropped_rows = 0usize;
    for record in records {
        let record = record?;
        if is_blank_line(&record) {
            continue;
        }
        let line = record.position().map(|position| position.line());
        let cells: Vec<CellValue> = record.iter().map(coerce_cell).collect();
        if let Err(err) = dataset.push_row(cells) {
            dropped_rows += 1;
            debug!(?line, %err, "dropping row");
        }
    }

    info!(
        records = dataset.len(),
        columns = dataset.columns().len(),
        dropped_rows,
        "parsed upload"
    );
    Ok(IngestedUpload {
        dataset,
        sample: sample_lines(text),
        dropped_rows,
    })
}
