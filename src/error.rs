//! Frontend Error Types

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// The backend rejected the command; carries the raw payload
    #[error("{0}")]
    Backend(String),

    #[error("failed to decode backend response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("todo {id} has unknown status '{status}'")]
    UnknownStatus { id: i32, status: String },

    #[error("day count out of range: {0}")]
    InvalidDayCount(i64),

    #[error("local storage error: {0}")]
    Storage(String),

    #[error("export failed: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
