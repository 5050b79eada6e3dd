//! The crate-wide error type.

use std::fmt;

use super::auth::AuthError;
use super::category::ErrorCategory;
use super::context::ErrorContext;
use super::network::NetworkError;
use super::system::SystemError;

/// Unified error type for the Spherag client.
#[derive(Debug)]
pub enum SpheragError {
    /// Network-related errors (connections, HTTP status, decoding).
    Network(NetworkError),

    /// Authentication/authorization errors.
    Auth(AuthError),

    /// System/filesystem/environment errors.
    System(SystemError),

    /// Wrapped error with additional context.
    WithContext {
        error: Box<SpheragError>,
        context: ErrorContext,
    },
}

impl SpheragError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpheragError::Network(err) => match err {
                NetworkError::HttpStatus { status, .. } if *status >= 500 => ErrorCategory::Server,
                NetworkError::HttpStatus { status: 401, .. } => ErrorCategory::Auth,
                NetworkError::HttpStatus { status: 403, .. } => ErrorCategory::User,
                NetworkError::HttpStatus { status: 408 | 429, .. } => ErrorCategory::Network,
                NetworkError::HttpStatus { .. } => ErrorCategory::Client,
                NetworkError::InvalidResponse { .. } => ErrorCategory::Server,
                _ => ErrorCategory::Network,
            },
            SpheragError::Auth(err) => {
                if err.requires_reauth() {
                    ErrorCategory::Auth
                } else {
                    ErrorCategory::User
                }
            }
            SpheragError::System(SystemError::InvalidEnvironment { .. }) => {
                ErrorCategory::Configuration
            }
            SpheragError::System(_) => ErrorCategory::System,
            SpheragError::WithContext { error, .. } => error.category(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            SpheragError::Network(err) => err.is_retryable(),
            SpheragError::Auth(_) => false,
            SpheragError::System(_) => false,
            SpheragError::WithContext { error, .. } => error.is_retryable(),
        }
    }

    /// Check if this error requires signing in again.
    pub fn requires_reauth(&self) -> bool {
        match self {
            SpheragError::Auth(err) => err.requires_reauth(),
            SpheragError::Network(NetworkError::HttpStatus { status: 401, .. }) => true,
            SpheragError::WithContext { error, .. } => error.requires_reauth(),
            _ => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SpheragError::Network(err) => err.user_message(),
            SpheragError::Auth(err) => err.user_message(),
            SpheragError::System(err) => err.user_message(),
            SpheragError::WithContext { error, .. } => error.user_message(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SpheragError::Network(err) => err.error_code(),
            SpheragError::Auth(err) => err.error_code(),
            SpheragError::System(err) => err.error_code(),
            SpheragError::WithContext { error, .. } => error.error_code(),
        }
    }

    /// Attach context to this error.
    pub fn with_context(self, ctx: ErrorContext) -> Self {
        SpheragError::WithContext {
            error: Box::new(self),
            context: ctx,
        }
    }

    /// Get the context if this error has one attached.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            SpheragError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the innermost error, skipping context wrappers.
    pub fn inner(&self) -> &SpheragError {
        match self {
            SpheragError::WithContext { error, .. } => error.inner(),
            _ => self,
        }
    }

    /// HTTP status of the failed request, if this error came from one.
    pub fn http_status(&self) -> Option<u16> {
        match self.inner() {
            SpheragError::Network(err) => err.status(),
            _ => None,
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for SpheragError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpheragError::Network(err) => write!(f, "{}", err),
            SpheragError::Auth(err) => write!(f, "{}", err),
            SpheragError::System(err) => write!(f, "{}", err),
            SpheragError::WithContext { error, context } => write!(f, "{} ({})", error, context),
        }
    }
}

impl std::error::Error for SpheragError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpheragError::Network(err) => Some(err),
            SpheragError::Auth(err) => Some(err),
            SpheragError::System(err) => Some(err),
            SpheragError::WithContext { error, .. } => error.source(),
        }
    }
}

impl From<NetworkError> for SpheragError {
    fn from(err: NetworkError) -> Self {
        SpheragError::Network(err)
    }
}

impl From<AuthError> for SpheragError {
    fn from(err: AuthError) -> Self {
        SpheragError::Auth(err)
    }
}

impl From<SystemError> for SpheragError {
    fn from(err: SystemError) -> Self {
        SpheragError::System(err)
    }
}

impl From<std::io::Error> for SpheragError {
    fn from(err: std::io::Error) -> Self {
        use super::system::classify_io_error;
        SpheragError::System(classify_io_error(err, None, "I/O operation"))
    }
}

impl From<serde_json::Error> for SpheragError {
    fn from(err: serde_json::Error) -> Self {
        SpheragError::Network(NetworkError::InvalidResponse {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> SpheragError {
        NetworkError::HttpStatus {
            status,
            message: String::new(),
        }
        .into()
    }

    #[test]
    fn test_http_status_categories() {
        assert_eq!(http(500).category(), ErrorCategory::Server);
        assert_eq!(http(401).category(), ErrorCategory::Auth);
        assert_eq!(http(403).category(), ErrorCategory::User);
        assert_eq!(http(404).category(), ErrorCategory::Client);
        assert_eq!(http(429).category(), ErrorCategory::Network);
    }

    #[test]
    fn test_context_is_transparent() {
        let err = http(503).with_context(ErrorContext::new("list_systems"));
        assert!(err.is_retryable());
        assert_eq!(err.http_status(), Some(503));
        assert_eq!(err.error_code(), "E_NET_HTTP");
        assert_eq!(err.context().map(|c| c.operation.as_str()), Some("list_systems"));
        assert!(matches!(err.inner(), SpheragError::Network(_)));
    }

    #[test]
    fn test_requires_reauth() {
        assert!(http(401).requires_reauth());
        assert!(!http(403).requires_reauth());
        let err: SpheragError = AuthError::SessionExpired.into();
        assert!(err.requires_reauth());
        assert_eq!(err.category(), ErrorCategory::Auth);
    }

    #[test]
    fn test_invalid_environment_is_configuration() {
        let err: SpheragError = SystemError::InvalidEnvironment {
            variable: "SPHERAG_TIMEOUT_SECS".to_string(),
            message: "not a number".to_string(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_json_error_is_invalid_response() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SpheragError = json_err.into();
        assert!(matches!(
            err,
            SpheragError::Network(NetworkError::InvalidResponse { .. })
        ));
        assert!(!err.is_retryable());
    }
}
