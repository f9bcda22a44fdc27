//! SQLite-backed record store shared by every cell.
//!
//! A [`Database`] wraps a single connection behind a mutex. Cells hand it a
//! closure through [`Database::call`], which runs on the blocking pool so the
//! async handlers never sit on SQLite I/O.

pub mod sqlite;
pub mod timestamp;

pub use sqlite::Database;

use rusqlite::ErrorCode;
use shared_models::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Constraint violated: {0}")]
    ConstraintViolation(String),

    #[error("Database task failed: {0}")]
    TaskFailed(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, message)
                if inner.code == ErrorCode::ConstraintViolation =>
            {
                DatabaseError::ConstraintViolation(
                    message.clone().unwrap_or_else(|| inner.to_string()),
                )
            }
            _ => DatabaseError::Sqlite(err),
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConstraintViolation(msg) => AppError::Conflict(msg),
            other => AppError::Database(other.to_string()),
        }
    }
}
