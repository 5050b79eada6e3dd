//! Result alias and context extension.

use super::context::ErrorContext;
use super::spherag_error::SpheragError;

/// Type alias for Results using SpheragError.
pub type SpheragResult<T> = Result<T, SpheragError>;

/// Extension trait for Result types to add context to errors.
pub trait ResultExt<T> {
    /// Add context to an error if the result is Err.
    fn context(self, ctx: ErrorContext) -> SpheragResult<T>;

    /// Add context using a closure (only called on error).
    fn with_context<F>(self, f: F) -> SpheragResult<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<SpheragError>,
{
    fn context(self, ctx: ErrorContext) -> SpheragResult<T> {
        self.map_err(|e| e.into().with_context(ctx))
    }

    fn with_context<F>(self, f: F) -> SpheragResult<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn test_context_on_ok_is_untouched() {
        let ok: SpheragResult<u32> = Ok(7);
        assert_eq!(ok.context(ErrorContext::new("noop")).unwrap(), 7);
    }

    #[test]
    fn test_with_context_wraps_domain_error() {
        let result: Result<(), NetworkError> = Err(NetworkError::Cancelled);
        let err = result
            .with_context(|| ErrorContext::new("load_more").with_resource("/System/List"))
            .unwrap_err();
        assert_eq!(err.context().unwrap().operation, "load_more");
    }

    #[test]
    fn test_io_error_gets_context() {
        let result: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        let err = result.context(ErrorContext::new("save_credentials")).unwrap_err();
        assert_eq!(err.error_code(), "E_SYS_IO");
    }
}
