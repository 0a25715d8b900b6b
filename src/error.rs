//! Global error handling for project-prompt
//!
//! Per-entry filesystem failures are not errors here: they are collected as
//! values by the scanner and the snapshot writer. This type covers what can
//! actually stop a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for project-prompt operations
#[derive(Error, Debug)]
pub enum PromptError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The interactive terminal could not be read from or written to
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Writing the generated snapshot failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Specialized Result type for project-prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;

/// Creates a PromptError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::PromptError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

// Lets io::Result-returning callers and tests use `?` on crate results
impl From<PromptError> for io::Error {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Io(e) => e,
            other => io::Error::new(io::ErrorKind::Other, other.to_string()),
        }
    }
}
