//! Error types.
//!
//! - `KilnError`: failures of the session/core operations (typed, matchable).
//! - `AppError`: what the binary reports (message + process exit code).
//!
//! Exit codes:
//! - `2`: bad input or I/O failure
//! - `3`: not enough data to run the requested command
//! - `4`: internal / rendering failure

use thiserror::Error;

/// Errors surfaced by per-item session operations.
///
/// Batch operations (bulk import) never return these; they count failed
/// lines instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KilnError {
    /// A time string that is not `H:MM`.
    #[error("invalid time '{input}': expected H:MM (e.g. 14:30)")]
    Parse { input: String },

    /// A field rejected before any state was touched.
    #[error("{0}")]
    Validation(String),

    /// A position outside the current collection.
    #[error("index {index} out of range (len {len})")]
    Index { index: usize, len: usize },
}

impl KilnError {
    pub fn parse(input: impl Into<String>) -> Self {
        KilnError::Parse {
            input: input.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        KilnError::Validation(message.into())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<KilnError> for AppError {
    fn from(err: KilnError) -> Self {
        AppError::new(2, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
