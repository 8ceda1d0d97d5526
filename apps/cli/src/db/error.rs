//! Collection error types.

use std::path::PathBuf;
use thiserror::Error;
use wunderbar_core::StoreError;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid notetype fields: {0}")]
    Json(#[from] serde_json::Error),

    #[error("collection {} is locked by another process", .0.display())]
    Busy(PathBuf),

    #[error(
        "{} is an Anki desktop collection; point --base at a wunderbar collection directory",
        .0.display()
    )]
    Foreign(PathBuf),
}

impl DbError {
    /// Whether sqlite refused a lock held by another connection.
    pub fn is_busy(err: &rusqlite::Error) -> bool {
        matches!(
            err.sqlite_error_code(),
            Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
        )
    }
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Busy(path) => StoreError::Busy(path),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
