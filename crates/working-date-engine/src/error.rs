//! Error types for working-date-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkingDateError {
    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Date arithmetic overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, WorkingDateError>;
