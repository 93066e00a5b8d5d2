use thiserror::Error;

/// Error category for decision-making (retry, abort, fix the input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transient error - retry may resolve
    Transient,
    /// Fatal error - should abort operation
    Fatal,
    /// Validation error - invalid input or data
    Validation,
}

#[derive(Error, Debug)]
pub enum ImateError {
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Row index {index} out of range ({rows} rows)")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("Cell at ordinal {0} has not been populated")]
    CellNotPopulated(usize),

    #[error("Row is deleted; edits are rejected")]
    RowDeleted,

    #[error("Cannot convert '{value}' to {target}")]
    Conversion { value: String, target: &'static str },

    #[error("Row for table '{table}' has {actual} values, expected {expected}")]
    RowWidthMismatch {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported data type: {0}")]
    UnsupportedType(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("API error {api_result}: {api_message}")]
    Api {
        api_result: String,
        api_message: String,
        user_message: String,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ureq::Error> for ImateError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => {
                ImateError::Transport(format!("HTTP {} from {}", code, response.get_url()))
            }
            ureq::Error::Transport(t) => ImateError::Transport(t.to_string()),
        }
    }
}

impl From<serde_json::Error> for ImateError {
    fn from(err: serde_json::Error) -> Self {
        ImateError::Decode(err.to_string())
    }
}

impl From<std::io::Error> for ImateError {
    fn from(err: std::io::Error) -> Self {
        ImateError::Transport(err.to_string())
    }
}

impl ImateError {
    /// Returns true if the error is transient and may be retried by the caller
    pub fn is_retryable(&self) -> bool {
        matches!(self, ImateError::Transport(_))
    }

    /// Returns the error category for decision-making
    pub fn error_category(&self) -> ErrorCategory {
        match self {
            ImateError::Conversion { .. }
            | ImateError::RowWidthMismatch { .. }
            | ImateError::UnsupportedType(_)
            | ImateError::RowDeleted
            | ImateError::CellNotPopulated(_) => ErrorCategory::Validation,
            ImateError::Transport(_) => ErrorCategory::Transient,
            _ => ErrorCategory::Fatal,
        }
    }
}

pub type Result<T> = std::result::Result<T, ImateError>;
