//! Error types for brokkr-projects

use thiserror::Error;

/// Result type alias using brokkr-projects's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Project scaffolding and patching error types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid project or app name
    #[error("Invalid name: {name}. Must be a valid Python identifier")]
    InvalidName { name: String },

    /// Core library error (command execution, bounded waits, IO)
    #[error(transparent)]
    Core(#[from] brokkr_core::Error),

    /// Virtual environment error
    #[error(transparent)]
    Venv(#[from] brokkr_venv::Error),

    /// Regex error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }
}
