//! Tag store error types
//!
//! - **`SledError`**: Errors from the underlying sled embedded database
//! - **`DecodeError`** / **`EncodeError`**: bincode failures on stored records
//! - **`SerializeError`**: Paths or keys that are not valid UTF-8
//! - **`EmptyTag`** / **`EmptyPaths`**: Rejected tag assignment requests

use sled::transaction::TransactionError;
use thiserror::Error;

/// Tag store errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Represents a sled database error
    #[error("Database error: {0}")]
    SledError(#[from] sled::Error),

    /// Represents a bincode decoding error
    #[error("Error while decoding data: {0}")]
    DecodeError(#[from] bincode::error::DecodeError),

    /// Represents a bincode encoding error
    #[error("Error while encoding data: {0}")]
    EncodeError(#[from] bincode::error::EncodeError),

    /// Generic serialization/deserialization error
    #[error("Error during serialization: {0}")]
    SerializeError(String),

    /// Tag was empty after trimming
    #[error("Tag must not be empty")]
    EmptyTag,

    /// No paths were given to tag
    #[error("Paths must not be empty")]
    EmptyPaths,
}

impl From<TransactionError<DbError>> for DbError {
    fn from(err: TransactionError<DbError>) -> Self {
        match err {
            TransactionError::Abort(err) => err,
            TransactionError::Storage(err) => Self::SledError(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_error_message() {
        let err = DbError::SerializeError("Invalid UTF-8 in path".into());
        assert_eq!(err.to_string(), "Error during serialization: Invalid UTF-8 in path");
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(DbError::EmptyTag.to_string(), "Tag must not be empty");
        assert_eq!(DbError::EmptyPaths.to_string(), "Paths must not be empty");
    }
}
