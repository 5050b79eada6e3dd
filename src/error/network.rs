//! Errors raised while talking to the Spherag HTTP API.

use std::fmt;

/// Network-specific error variants.
///
/// `HttpStatus` carries the raw response body so a failed request can be
/// diagnosed from the log without re-running it.
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    /// Connection to the server failed.
    ConnectionFailed { url: String, message: String },

    /// Request did not complete within the configured timeout.
    Timeout { operation: String, duration_secs: u64 },

    /// The server answered with status >= 400.
    HttpStatus { status: u16, message: String },

    /// The response could not be decoded into the expected shape.
    InvalidResponse { message: String },

    /// The request was aborted before it completed.
    Cancelled,

    /// Anything the transport could not classify.
    Other { message: String },
}

impl NetworkError {
    /// Check if this error is likely transient and can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::ConnectionFailed { .. } => true,
            NetworkError::Timeout { .. } => true,
            NetworkError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            NetworkError::InvalidResponse { .. } => false,
            NetworkError::Cancelled => false,
            NetworkError::Other { .. } => false,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            NetworkError::ConnectionFailed { .. } => {
                "Unable to reach Spherag. Please check your internet connection.".to_string()
            }
            NetworkError::Timeout {
                operation,
                duration_secs,
            } => format!(
                "{} did not answer within {} seconds.",
                operation, duration_secs
            ),
            NetworkError::HttpStatus { status, .. } => match *status {
                400 => "The request was rejected by the server.".to_string(),
                401 => "Your session is no longer valid. Please sign in again.".to_string(),
                403 => "You don't have access to this resource.".to_string(),
                404 => "The requested farm or device was not found.".to_string(),
                429 => "Too many requests. Please wait a moment.".to_string(),
                500..=599 => "Spherag is having trouble right now. Please try later.".to_string(),
                _ => format!("The server returned HTTP {}.", status),
            },
            NetworkError::InvalidResponse { .. } => {
                "Received data in an unexpected format.".to_string()
            }
            NetworkError::Cancelled => "The request was cancelled.".to_string(),
            NetworkError::Other { message } => format!("Network error: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed { .. } => "E_NET_CONN",
            NetworkError::Timeout { .. } => "E_NET_TIMEOUT",
            NetworkError::HttpStatus { .. } => "E_NET_HTTP",
            NetworkError::InvalidResponse { .. } => "E_NET_INVALID",
            NetworkError::Cancelled => "E_NET_CANCEL",
            NetworkError::Other { .. } => "E_NET_OTHER",
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ConnectionFailed { url, message } => {
                write!(f, "Connection failed to '{}': {}", url, message)
            }
            NetworkError::Timeout {
                operation,
                duration_secs,
            } => write!(f, "{} timed out after {} seconds", operation, duration_secs),
            NetworkError::HttpStatus { status, message } => {
                write!(f, "HTTP {} error: {}", status, message)
            }
            NetworkError::InvalidResponse { message } => write!(f, "Invalid response: {}", message),
            NetworkError::Cancelled => write!(f, "Request cancelled"),
            NetworkError::Other { message } => write!(f, "Network error: {}", message),
        }
    }
}

impl std::error::Error for NetworkError {}
