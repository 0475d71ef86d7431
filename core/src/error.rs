//! Error types for store operations.

use thiserror::Error;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures reported by a [`TodoRepository`](crate::TodoRepository).
///
/// "Not found" is deliberately absent: lookups return `Option` and the
/// caller decides what a missing row means.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (pool closed, file missing, timeout).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A query was rejected or returned something unreadable.
    #[error("Query failed: {0}")]
    Query(String),

    /// Bringing the schema up to date failed.
    #[error("Migration failed: {0}")]
    Migration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::Unavailable("pool timed out".to_string());
        assert_eq!(err.to_string(), "Store unavailable: pool timed out");

        let err = StoreError::Migration("no such table".to_string());
        assert_eq!(err.to_string(), "Migration failed: no such table");
    }
}
