//! Row decoding helpers
//!
//! UUIDs and timestamps are stored as TEXT; these helpers decode them with
//! a `Corrupt` error instead of panicking on bad data.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use crate::{time, uuid_utils, Result};

pub fn get_uuid(row: &SqliteRow, column: &str) -> Result<Uuid> {
    let raw: String = row.try_get(column)?;
    uuid_utils::from_db(&raw)
}

pub fn get_opt_uuid(row: &SqliteRow, column: &str) -> Result<Option<Uuid>> {
    let raw: Option<String> = row.try_get(column)?;
    uuid_utils::opt_from_db(raw)
}

pub fn get_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let raw: String = row.try_get(column)?;
    time::from_db(&raw)
}

pub fn get_opt_timestamp(row: &SqliteRow, column: &str) -> Result<Option<DateTime<Utc>>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.as_deref().map(time::from_db).transpose()
}

pub fn get_date(row: &SqliteRow, column: &str) -> Result<NaiveDate> {
    let raw: String = row.try_get(column)?;
    time::date_from_db(&raw)
}

pub fn get_opt_date(row: &SqliteRow, column: &str) -> Result<Option<NaiveDate>> {
    let raw: Option<String> = row.try_get(column)?;
    raw.as_deref().map(time::date_from_db).transpose()
}

/// Decode a JSON array of strings stored in a TEXT column
pub fn get_string_list(row: &SqliteRow, column: &str) -> Result<Vec<String>> {
    let raw: Option<String> = row.try_get(column)?;
    match raw {
        Some(text) if !text.is_empty() => serde_json::from_str(&text)
            .map_err(|e| crate::Error::Corrupt(format!("{}: {}", column, e))),
        _ => Ok(Vec::new()),
    }
}

/// Encode a string list for a TEXT column
pub fn encode_string_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;

    #[tokio::test]
    async fn test_decode_text_columns() {
        let pool = connect_in_memory().await.unwrap();
        let id = uuid_utils::generate();
        let row = sqlx::query(
            "SELECT ? AS id, NULL AS missing, '2024-01-02T03:04:05.000000Z' AS at, '[\"a\",\"b\"]' AS tags",
        )
        .bind(id.to_string())
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(get_uuid(&row, "id").unwrap(), id);
        assert_eq!(get_opt_uuid(&row, "missing").unwrap(), None);
        assert_eq!(get_timestamp(&row, "at").unwrap().timestamp(), 1_704_164_645);
        assert_eq!(get_string_list(&row, "tags").unwrap(), vec!["a", "b"]);
        assert!(get_string_list(&row, "missing").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_uuid_is_an_error() {
        let pool = connect_in_memory().await.unwrap();
        let row = sqlx::query("SELECT 'nope' AS id")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert!(matches!(get_uuid(&row, "id"), Err(crate::Error::Corrupt(_))));
    }
}
