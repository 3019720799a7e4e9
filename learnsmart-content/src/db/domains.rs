//! Domain queries

use learnsmart_common::db::row::{get_timestamp, get_uuid};
use learnsmart_common::{time, uuid_utils, Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::models::{Domain, DomainInput};

pub async fn create_domain(pool: &SqlitePool, input: DomainInput) -> Result<Domain> {
    if input.code.trim().is_empty() || input.name.trim().is_empty() {
        return Err(Error::InvalidInput("domain code and name are required".into()));
    }

    let domain = Domain {
        id: uuid_utils::generate(),
        code: input.code,
        name: input.name,
        description: input.description,
        created_at: time::now(),
    };

    sqlx::query("INSERT INTO domains (id, code, name, description, created_at) VALUES (?, ?, ?, ?, ?)")
        .bind(domain.id.to_string())
        .bind(&domain.code)
        .bind(&domain.name)
        .bind(&domain.description)
        .bind(time::to_db(&domain.created_at))
        .execute(pool)
        .await
        .map_err(|e| Error::on_unique_violation(e, format!("Domain code already exists: {}", domain.code)))?;

    info!(domain_id = %domain.id, code = %domain.code, "Created domain");
    Ok(domain)
}

pub async fn get_domain(pool: &SqlitePool, id: Uuid) -> Result<Option<Domain>> {
    let row = sqlx::query("SELECT * FROM domains WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(domain_from_row).transpose()
}

/// Domains ordered by code, optionally restricted to one code
pub async fn list_domains(pool: &SqlitePool, code: Option<&str>, limit: i64, offset: i64) -> Result<Vec<Domain>> {
    let rows = match code {
        Some(code) => {
            sqlx::query("SELECT * FROM domains WHERE code = ? ORDER BY code LIMIT ? OFFSET ?")
                .bind(code)
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
        None => {
            sqlx::query("SELECT * FROM domains ORDER BY code LIMIT ? OFFSET ?")
                .bind(limit)
                .bind(offset)
                .fetch_all(pool)
                .await?
        }
    };
    rows.iter().map(domain_from_row).collect()
}

fn domain_from_row(row: &SqliteRow) -> Result<Domain> {
    Ok(Domain {
        id: get_uuid(row, "id")?,
        code: row.try_get("code")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}
