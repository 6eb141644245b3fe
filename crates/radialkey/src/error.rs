//! Error handling for the radialkey binary.

use std::{io, path::PathBuf, result};

use thiserror::Error;
use tokio::task::JoinError;

/// Convenient result type for radialkey operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running a radialkey command.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for standard I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Configuration loading, validation, or command resolution errors.
    #[error("{}", .0.pretty())]
    Config(#[from] radial_config::Error),
    /// The scenario file could not be parsed.
    #[error("Failed to parse scenario {}: {message}", .path.display())]
    Scenario {
        /// Scenario path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// A replayed sequence task panicked or was cancelled.
    #[error("Sequence task failed: {0}")]
    Join(#[from] JoinError),
}
