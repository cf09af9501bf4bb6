//! Error types for scout-core
//!
//! The engine-boundary taxonomy. Every backend classifies its failures into
//! exactly one variant before returning; there is deliberately no catch-all,
//! so callers can make retry decisions from the variant alone.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by object-store browsing operations
#[derive(Error, Debug)]
pub enum Error {
    /// Bucket or key does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authorization failure, or a mutation attempted on a read-only handle
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Requested byte range starts beyond the object's length
    #[error("Range not satisfiable: {0}")]
    RangeNotSatisfiable(String),

    /// Network or timeout failure; safe to retry
    #[error("Transport error: {0}")]
    Transport(String),

    /// Malformed bucket, key, range, or paging input; never retried
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Startup configuration could not be resolved
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether the failed operation may be retried
    ///
    /// Only transport failures qualify. Semantic failures surface
    /// immediately no matter how often the call is repeated.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Error::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_transport_is_retryable() {
        assert!(Error::Transport("timeout".into()).is_retryable());

        assert!(!Error::NotFound("test".into()).is_retryable());
        assert!(!Error::AccessDenied("test".into()).is_retryable());
        assert!(!Error::RangeNotSatisfiable("test".into()).is_retryable());
        assert!(!Error::InvalidArgument("test".into()).is_retryable());
        assert!(!Error::Config("test".into()).is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = Error::NotFound("bucket data does not exist".into());
        assert_eq!(err.to_string(), "Not found: bucket data does not exist");

        let err = Error::Transport("connection reset".into());
        assert_eq!(err.to_string(), "Transport error: connection reset");
    }
}
