// src/error.rs

use std::fmt;

/// Global Application Error Enum.
/// Shared by the extractor and the bank loader; quiz handlers never fail and
/// answer missing state with redirects instead.
#[derive(Debug)]
pub enum AppError {
    // Unexpected failure, e.g. serializing the bank
    InternalServerError(String),

    // Reading or writing a file failed
    Io(String),

    // The persisted question bank breaks a record invariant
    InvalidBank(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidBank(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_io() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(msg) if msg.contains("gone")));
    }

    #[test]
    fn json_errors_map_to_invalid_bank() {
        let err: AppError = serde_json::from_str::<Vec<i64>>("[1,").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidBank(_)));
        assert!(err.to_string().starts_with("InvalidBank"));
    }
}
