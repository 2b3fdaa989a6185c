//! Error types for attendance.

use thiserror::Error;

/// Attendance-specific errors.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// No session has this id.
    #[error("unknown session: {0}")]
    UnknownSession(String),

    /// No time block has this id (within the selected session, if any).
    #[error("unknown time block: {0}")]
    UnknownBlock(String),

    /// A query parameter could not be understood.
    #[error("invalid query parameter {param}={value}")]
    InvalidQuery { param: String, value: String },

    /// The schedule is inconsistent.
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// A pass threshold outside `0.0..=1.0`.
    #[error("pass threshold must be between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    /// Schedule or record parsing error.
    #[error("failed to parse attendance data: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Result type alias for attendance operations.
pub type Result<T> = std::result::Result<T, AttendanceError>;
