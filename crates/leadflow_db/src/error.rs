//! Error types for the storage layer.

use thiserror::Error;

/// Storage operation result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Storage errors.
///
/// Row-level rejections (duplicate email, constraint failures) are not
/// errors at this level; they are reported inside a `LoadReport`. Anything
/// surfacing as a `DbError` is fatal for the current operation.
#[derive(Error, Debug)]
pub enum DbError {
    /// SQLx error (connection, query, etc.)
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// IO error (file system operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported or malformed connection URL
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),
}

impl DbError {
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }
}
