//! Authentication-related error types.

use std::fmt;

/// Authentication-specific error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Username or password were empty before any request was sent.
    MissingCredentials,

    /// The login endpoint rejected the username/password pair.
    InvalidCredentials { message: String },

    /// A data request was rejected with 401; the session has been cleared.
    SessionExpired,

    /// No credential is stored (user not logged in).
    NotAuthenticated,

    /// The server refused access to a resource (403).
    AccessDenied { resource: Option<String> },

    /// Credentials could not be loaded from disk.
    CredentialsLoadFailed { message: String },

    /// Credentials could not be written to disk.
    CredentialsSaveFailed { message: String },
}

impl AuthError {
    /// Check if this error is resolved by signing in again.
    pub fn requires_reauth(&self) -> bool {
        matches!(
            self,
            AuthError::SessionExpired
                | AuthError::NotAuthenticated
                | AuthError::CredentialsLoadFailed { .. }
        )
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::MissingCredentials => "Username and password are required.".to_string(),
            AuthError::InvalidCredentials { .. } => {
                "The username or password is incorrect.".to_string()
            }
            AuthError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            AuthError::NotAuthenticated => "You are not signed in.".to_string(),
            AuthError::AccessDenied { resource } => match resource {
                Some(r) => format!("Access denied to {}.", r),
                None => "Access denied.".to_string(),
            },
            AuthError::CredentialsLoadFailed { .. } => {
                "Could not read your saved session. Please sign in again.".to_string()
            }
            AuthError::CredentialsSaveFailed { .. } => {
                "Could not save your session. Check permissions on ~/.spherag.".to_string()
            }
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingCredentials => "E_AUTH_MISSING",
            AuthError::InvalidCredentials { .. } => "E_AUTH_INVALID",
            AuthError::SessionExpired => "E_AUTH_EXPIRED",
            AuthError::NotAuthenticated => "E_AUTH_NOT_AUTH",
            AuthError::AccessDenied { .. } => "E_AUTH_ACCESS",
            AuthError::CredentialsLoadFailed { .. } => "E_AUTH_CRED_LOAD",
            AuthError::CredentialsSaveFailed { .. } => "E_AUTH_CRED_SAVE",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredentials => write!(f, "Username or password missing"),
            AuthError::InvalidCredentials { message } => {
                write!(f, "Invalid credentials: {}", message)
            }
            AuthError::SessionExpired => write!(f, "Session expired"),
            AuthError::NotAuthenticated => write!(f, "Not authenticated"),
            AuthError::AccessDenied { resource } => match resource {
                Some(r) => write!(f, "Access denied to '{}'", r),
                None => write!(f, "Access denied"),
            },
            AuthError::CredentialsLoadFailed { message } => {
                write!(f, "Failed to load credentials: {}", message)
            }
            AuthError::CredentialsSaveFailed { message } => {
                write!(f, "Failed to save credentials: {}", message)
            }
        }
    }
}

impl std::error::Error for AuthError {}
