//! Local system errors: the credential file, the log file and environment
//! configuration.

use std::fmt;
use std::path::PathBuf;

/// System-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum SystemError {
    /// Could not determine the home directory.
    NoHomeDirectory,

    /// Permission denied for a file operation.
    PermissionDenied { path: PathBuf, operation: String },

    /// Generic I/O error.
    IoError {
        operation: String,
        path: Option<PathBuf>,
        message: String,
    },

    /// An environment variable held a value that could not be used.
    InvalidEnvironment { variable: String, message: String },
}

impl SystemError {
    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SystemError::NoHomeDirectory => {
                "Could not determine your home directory. Set $HOME and retry.".to_string()
            }
            SystemError::PermissionDenied { path, operation } => format!(
                "Permission denied: cannot {} '{}'.",
                operation,
                path.display()
            ),
            SystemError::IoError {
                operation, path, ..
            } => match path {
                Some(p) => format!("Failed to {} '{}'.", operation, p.display()),
                None => format!("Failed to {}.", operation),
            },
            SystemError::InvalidEnvironment { variable, message } => {
                format!("{} is invalid: {}", variable, message)
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SystemError::NoHomeDirectory => "E_SYS_NO_HOME",
            SystemError::PermissionDenied { .. } => "E_SYS_PERM",
            SystemError::IoError { .. } => "E_SYS_IO",
            SystemError::InvalidEnvironment { .. } => "E_SYS_ENV",
        }
    }
}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemError::NoHomeDirectory => write!(f, "Home directory not found"),
            SystemError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied: {} '{}'", operation, path.display())
            }
            SystemError::IoError {
                operation,
                path,
                message,
            } => match path {
                Some(p) => write!(f, "I/O error during {} '{}': {}", operation, p.display(), message),
                None => write!(f, "I/O error during {}: {}", operation, message),
            },
            SystemError::InvalidEnvironment { variable, message } => {
                write!(f, "Invalid value for {}: {}", variable, message)
            }
        }
    }
}

impl std::error::Error for SystemError {}

/// Classify an I/O error, attaching the path when one is known.
pub fn classify_io_error(err: std::io::Error, path: Option<PathBuf>, operation: &str) -> SystemError {
    match (err.kind(), path) {
        (std::io::ErrorKind::PermissionDenied, Some(path)) => SystemError::PermissionDenied {
            path,
            operation: operation.to_string(),
        },
        (_, path) => SystemError::IoError {
            operation: operation.to_string(),
            path,
            message: err.to_string(),
        },
    }
}
