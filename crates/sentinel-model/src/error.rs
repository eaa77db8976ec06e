use thiserror::Error;

/// Errors raised when a model value violates one of its invariants.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A row did not carry one cell per header column.
    #[error("row has {found} cells, expected {expected}")]
    RowWidth { expected: usize, found: usize },

    /// Training configuration outside the accepted ranges.
    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// A feedback category name that matches none of the known categories.
    #[error("unknown feedback category '{0}'")]
    UnknownCategory(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
