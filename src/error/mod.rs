//! Unified error handling for the Spherag client.
//!
//! - **Error Categories**: high-level classification for handling decisions
//! - **Domain errors**: [`NetworkError`], [`AuthError`], [`SystemError`]
//! - **Unified type**: [`SpheragError`] consolidates them
//! - **Context**: [`ErrorContext`] records the failing operation and retries
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout, 408/429 | Yes |
//! | Server | 5xx, undecodable payloads | Yes |
//! | Auth | Session missing or rejected (401) | No, sign in again |
//! | Client | Other 4xx | No |
//! | User | Bad input, access denied | No |
//! | System | Credential/log file I/O | No |
//! | Configuration | Bad SPHERAG_* variables | No |

mod auth;
mod category;
mod context;
mod network;
mod result;
mod spherag_error;
mod system;

pub use auth::AuthError;
pub use category::ErrorCategory;
pub use context::ErrorContext;
pub use network::NetworkError;
pub use result::{ResultExt, SpheragResult};
pub use spherag_error::SpheragError;
pub use system::{classify_io_error, SystemError};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_error_unification() {
        let net: SpheragError = NetworkError::Timeout {
            operation: "GET /System/List".to_string(),
            duration_secs: 30,
        }
        .into();
        let auth: SpheragError = AuthError::NotAuthenticated.into();
        let sys: SpheragError = SystemError::NoHomeDirectory.into();

        assert_eq!(net.category(), ErrorCategory::Network);
        assert_eq!(auth.category(), ErrorCategory::Auth);
        assert_eq!(sys.category(), ErrorCategory::System);

        for err in [&net, &auth, &sys] {
            assert!(!err.error_code().is_empty());
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_retry_and_reauth_are_disjoint() {
        let errors: Vec<SpheragError> = vec![
            NetworkError::HttpStatus {
                status: 401,
                message: String::new(),
            }
            .into(),
            NetworkError::HttpStatus {
                status: 502,
                message: String::new(),
            }
            .into(),
            AuthError::SessionExpired.into(),
            NetworkError::ConnectionFailed {
                url: "x".to_string(),
                message: "y".to_string(),
            }
            .into(),
        ];
        for err in errors {
            assert!(
                !(err.is_retryable() && err.requires_reauth()),
                "{:?} is both retryable and requires reauth",
                err
            );
        }
    }
}
