//! Error types for tables.

use thiserror::Error;

/// Table-specific errors.
#[derive(Debug, Error)]
pub enum TableError {
    /// Ordering names a column that does not exist or is not sortable.
    #[error("cannot order by unknown or unsortable column: {0}")]
    UnknownColumn(String),

    /// A query parameter could not be understood.
    #[error("invalid query parameter {param}={value}")]
    InvalidQuery { param: String, value: String },

    /// Table configuration or row parsing error.
    #[error("failed to parse table data: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
