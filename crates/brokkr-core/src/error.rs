//! Error types for brokkr-core

use thiserror::Error;

/// Result type alias using brokkr-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Brokkr
#[derive(Error, Debug)]
pub enum Error {
    /// Command could not be spawned at all
    #[error("Failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Command ran but exited unsuccessfully
    #[error("Command '{command}' failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Required command not found on PATH
    #[error("Required command not found: {command}")]
    CommandNotFound { command: String },

    /// An expected path never appeared within the bounded wait
    #[error("Timed out waiting for path to appear: {path}")]
    PathWaitTimeout { path: String },

    /// Path is not valid UTF-8
    #[error("Path is not valid UTF-8: {path}")]
    NonUtf8Path { path: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a spawn error
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Create a command failure error
    pub fn command_failed(
        command: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a command not found error
    pub fn command_not_found(command: impl Into<String>) -> Self {
        Self::CommandNotFound {
            command: command.into(),
        }
    }

    /// Create a path wait timeout error
    pub fn path_wait_timeout(path: impl Into<String>) -> Self {
        Self::PathWaitTimeout { path: path.into() }
    }

    /// Create a non UTF-8 path error
    pub fn non_utf8_path(path: impl Into<String>) -> Self {
        Self::NonUtf8Path { path: path.into() }
    }
}
