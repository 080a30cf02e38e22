//! Error types for brokkr-venv

use thiserror::Error;

/// Result type alias using brokkr-venv's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Virtual environment provisioning error types
#[derive(Error, Debug)]
pub enum Error {
    /// No usable Python interpreter on PATH
    #[error("No Python interpreter found on PATH. Install Python 3 and retry")]
    PythonNotFound,

    /// Interpreter path is not valid UTF-8
    #[error("Python interpreter path is not valid UTF-8: {path}")]
    NonUtf8Interpreter { path: String },

    /// Core library error (command execution, IO)
    #[error(transparent)]
    Core(#[from] brokkr_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a non UTF-8 interpreter path error
    pub fn non_utf8_interpreter(path: impl Into<String>) -> Self {
        Self::NonUtf8Interpreter { path: path.into() }
    }
}
