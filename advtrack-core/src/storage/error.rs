//! Error types for advancement storage.

use thiserror::Error;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from libSQL.
    #[error("database error: {0}")]
    Database(#[from] libsql::Error),

    /// Filesystem error preparing a local database.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid data in the database.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// An account is already registered for this email.
    #[error("Username Exists !! ({0})")]
    UserExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_exists_mentions_email() {
        let err = StoreError::UserExists("alex@example.com".into());
        assert!(err.to_string().contains("alex@example.com"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<i64>("nope").unwrap_err();
        let err: StoreError = json_err.into();
        assert!(err.to_string().starts_with("serialization error"));
    }
}
