//! Common error types for LearnSmart

use thiserror::Error;

/// Common result type for LearnSmart operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across LearnSmart microservices
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Request conflicts with existing state (e.g. duplicate key)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Stored value could not be decoded
    #[error("Corrupt record: {0}")]
    Corrupt(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map a UNIQUE constraint violation to `Conflict`, anything else to `Database`
    pub fn on_unique_violation(err: sqlx::Error, message: impl Into<String>) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict(message.into()),
            _ => Error::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    #[tokio::test]
    async fn test_unique_violation_maps_to_conflict() {
        let pool = connect_in_memory().await.unwrap();
        sqlx::query("CREATE TABLE t (code TEXT UNIQUE)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t (code) VALUES ('a')")
            .execute(&pool)
            .await
            .unwrap();

        let err = sqlx::query("INSERT INTO t (code) VALUES ('a')")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(matches!(Error::on_unique_violation(err, "dup"), Error::Conflict(m) if m == "dup"));

        let err = sqlx::query("INSERT INTO missing (code) VALUES ('a')")
            .execute(&pool)
            .await
            .unwrap_err();
        assert!(matches!(Error::on_unique_violation(err, "dup"), Error::Database(_)));
    }
}
