//! Error types for article-gen
//!
//! Backend failures are logged where they happen and re-raised as one of the
//! narrower variants below. The typed `sqlx::Error` never crosses the public
//! API; only its rendered message survives.

use thiserror::Error;

/// Result type alias for article-gen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for article-gen
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "batch_size")
        key: Option<String>,
    },

    /// Store construction or query failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Batch flush of buffered articles failed
    #[error("flush error: {0}")]
    Flush(#[from] FlushError),

    /// I/O error (config file, schema script)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Store lifecycle and read errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage unreachable or could not be opened
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Schema bootstrap script failed to apply
    #[error("failed to initialize schema: {0}")]
    SchemaInitFailed(String),

    /// Full-table read failed
    #[error("read failed: {0}")]
    ReadFailed(String),

    /// Single-row write failed
    #[error("write failed: {0}")]
    WriteFailed(String),
}

/// Batch flush errors
///
/// When any of these is returned the flush transaction has been rolled back,
/// no identifiers were assigned and the buffer still holds every article it
/// held before the call.
#[derive(Debug, Error)]
pub enum FlushError {
    /// The batch insert statement failed
    #[error("batch insert failed: {0}")]
    InsertFailed(String),

    /// Storage returned fewer generated keys than rows submitted
    #[error("expected {submitted} generated keys, got {returned}")]
    MissingKeys {
        /// Rows submitted in the batch
        submitted: usize,
        /// Keys actually returned before the shortfall was detected
        returned: usize,
    },

    /// The connection was closed or could not be acquired
    #[error("connection unavailable: {0}")]
    ConnectionUnavailable(String),
}

impl FlushError {
    /// Classify a backend error raised during a flush
    pub(crate) fn from_sqlx(e: &sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                FlushError::ConnectionUnavailable(e.to_string())
            }
            _ => FlushError::InsertFailed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = Error::Config {
            message: "batch_size must be at least 1".to_string(),
            key: Some("batch_size".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "configuration error: batch_size must be at least 1"
        );
    }

    #[test]
    fn test_missing_keys_display() {
        let err = Error::from(FlushError::MissingKeys {
            submitted: 3,
            returned: 2,
        });
        assert_eq!(
            err.to_string(),
            "flush error: expected 3 generated keys, got 2"
        );
    }

    #[test]
    fn test_pool_closed_is_connection_unavailable() {
        let err = FlushError::from_sqlx(&sqlx::Error::PoolClosed);
        assert!(matches!(err, FlushError::ConnectionUnavailable(_)));

        let err = FlushError::from_sqlx(&sqlx::Error::RowNotFound);
        assert!(matches!(err, FlushError::InsertFailed(_)));
    }
}
