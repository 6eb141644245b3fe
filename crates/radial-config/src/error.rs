//! Error types for configuration loading, validation, and command resolution.

use std::{path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the config crate.
pub type Result<T> = StdResult<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Errors produced while loading or validating configuration, or resolving commands.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// RON syntax or shape error.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("{message}")]
    /// A well-formed config with inconsistent contents.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    /// A command name with no entry in the command table.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

impl Error {
    /// Attach a source path to read, parse and validation errors.
    pub fn with_path(self, p: impl Into<PathBuf>) -> Self {
        let p = Some(p.into());
        match self {
            Self::Read { message, .. } => Self::Read { path: p, message },
            Self::Parse { message, .. } => Self::Parse { path: p, message },
            Self::Validation { message, .. } => Self::Validation { path: p, message },
            other => other,
        }
    }

    /// Render a human-friendly error message including the path when available.
    pub fn pretty(&self) -> String {
        let (kind, path, message) = match self {
            Self::Read { path, message } => ("Read error", path, message),
            Self::Parse { path, message } => ("Config parse error", path, message),
            Self::Validation { path, message } => ("Config validation error", path, message),
            Self::UnknownCommand(_) => return self.to_string(),
        };
        match path {
            Some(p) => format!("{kind} at {}: {message}", p.display()),
            None => format!("{kind}: {message}"),
        }
    }

    /// Shorthand for a validation error without a path.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            path: None,
            message: message.into(),
        }
    }
}
