//! Error context for enriched error information.

use chrono::{DateTime, Utc};
use std::fmt;

/// Where and when an error happened.
///
/// Attached to a [`SpheragError`](super::SpheragError) with
/// [`ResultExt::context`](super::ResultExt::context). The API client fills in
/// the request path and the number of attempts it made.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext {
    /// Operation that failed, e.g. `list_systems`.
    pub operation: String,

    /// Request path or resource id involved.
    pub resource: Option<String>,

    /// Timestamp when the error occurred.
    pub timestamp: DateTime<Utc>,

    /// Number of retries made before giving up.
    pub retry_count: u32,
}

impl ErrorContext {
    /// Create a new ErrorContext for an operation.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            resource: None,
            timestamp: Utc::now(),
            retry_count: 0,
        }
    }

    /// Set the resource for this context.
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the retry count for this context.
    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Formatted context string suitable for logging.
    pub fn to_log_string(&self) -> String {
        let mut parts = vec![format!("operation={}", self.operation)];
        if let Some(ref resource) = self.resource {
            parts.push(format!("resource={}", resource));
        }
        if self.retry_count > 0 {
            parts.push(format!("retry_count={}", self.retry_count));
        }
        parts.push(format!("timestamp={}", self.timestamp.to_rfc3339()));
        parts.join(" ")
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.operation)?;
        if let Some(ref resource) = self.resource {
            write!(f, " [{}]", resource)?;
        }
        if self.retry_count > 0 {
            write!(f, " after {} retries", self.retry_count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fields() {
        let ctx = ErrorContext::new("get_atlas")
            .with_resource("/Atlas/861234")
            .with_retry_count(2);
        assert_eq!(ctx.operation, "get_atlas");
        assert_eq!(ctx.resource.as_deref(), Some("/Atlas/861234"));
        assert_eq!(ctx.retry_count, 2);
    }

    #[test]
    fn test_display_and_log_string() {
        let ctx = ErrorContext::new("list_systems").with_resource("/System/List");
        assert_eq!(ctx.to_string(), "list_systems [/System/List]");

        let log = ctx.with_retry_count(1).to_log_string();
        assert!(log.contains("operation=list_systems"));
        assert!(log.contains("resource=/System/List"));
        assert!(log.contains("retry_count=1"));
    }
}
