//! Error types for the timelapse pipeline.
//!
//! All fallible core operations return [`CoreResult`]. Input and parameter
//! problems are surfaced before any external process is spawned; encoder
//! failures carry the captured stderr text.

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for the timelapse pipeline
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input path is not a directory: {0}")]
    NotADirectory(String),

    #[error("No image files found in input directory: {0}")]
    NoImagesFound(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Image error for {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to start {cmd}: {message}")]
    CommandStart { cmd: String, message: String },

    #[error("Command '{cmd}' failed with status {status}. Stderr:\n{stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Unexpected error: {0}")]
    Other(String),
}

/// Result type for timelapse operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a `CommandFailed` error from a tool name, exit status, and stderr text.
pub fn command_failed_error(
    cmd: &str,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.to_string(),
        status,
        stderr: stderr.into(),
    }
}
