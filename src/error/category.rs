//! Coarse classification of errors.
//!
//! Callers branch on the category rather than on individual variants when
//! deciding whether to retry, send the user back to login, or just show the
//! message.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout problems. Usually transient.
    Network,

    /// Missing, rejected or expired credentials.
    Auth,

    /// The Spherag backend answered with a 5xx or an unusable payload.
    Server,

    /// The request itself was wrong (4xx other than auth).
    Client,

    /// Something the user has to fix (bad input, denied access).
    User,

    /// Local filesystem or OS failures.
    System,

    /// Invalid configuration values.
    Configuration,
}

impl ErrorCategory {
    /// Whether errors in this category are worth retrying automatically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Auth => "auth",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// What the user can do about it.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your connection and try again",
            ErrorCategory::Auth => "Sign in again with `spherag login`",
            ErrorCategory::Server => "Spherag is having trouble, try again in a moment",
            ErrorCategory::Client => "Please report this issue if it persists",
            ErrorCategory::User => "Check your input and try again",
            ErrorCategory::System => "Check permissions on ~/.spherag",
            ErrorCategory::Configuration => "Check the SPHERAG_* environment variables",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_and_server_retry() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Auth.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_display_matches_as_str() {
        assert_eq!(ErrorCategory::Auth.to_string(), "auth");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }

    #[test]
    fn test_auth_hint_mentions_login() {
        assert!(ErrorCategory::Auth.recovery_hint().contains("login"));
    }
}
