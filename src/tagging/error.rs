//! Tagging-specific error types

use crate::db::DbError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaggingError {
    /// The tag store failed
    #[error("Database error: {0}")]
    Db(#[from] DbError),

    /// The collaborator refused the request
    #[error("Tag assignment rejected: {0}")]
    Rejected(String),
}
