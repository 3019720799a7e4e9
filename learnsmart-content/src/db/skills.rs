//! Skill queries
//!
//! Skills are always read joined with their domain so the `domain` field of
//! the response is populated.

use learnsmart_common::db::row::{encode_string_list, get_string_list, get_timestamp, get_uuid};
use learnsmart_common::{time, uuid_utils, Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::db::domains;
use crate::models::{DomainRef, Skill, SkillInput};

const SELECT_SKILL: &str = r#"
    SELECT s.id, s.code, s.name, s.description, s.level, s.tags, s.created_at,
           d.id AS domain_id, d.code AS domain_code, d.name AS domain_name
    FROM skills s
    JOIN domains d ON d.id = s.domain_id
"#;

/// Skill listing filters
#[derive(Debug, Clone, Default)]
pub struct SkillFilter {
    pub domain_id: Option<Uuid>,
    /// Substring match on the skill code
    pub code: Option<String>,
}

pub async fn create_skill(pool: &SqlitePool, input: SkillInput) -> Result<Skill> {
    if input.code.trim().is_empty() || input.name.trim().is_empty() {
        return Err(Error::InvalidInput("skill code and name are required".into()));
    }

    let domain = domains::get_domain(pool, input.domain_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Domain not found: {}", input.domain_id)))?;

    let skill = Skill {
        id: uuid_utils::generate(),
        domain: DomainRef {
            id: domain.id,
            code: domain.code,
            name: domain.name,
        },
        code: input.code,
        name: input.name,
        description: input.description,
        level: input.level,
        tags: input.tags,
        created_at: time::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO skills (id, domain_id, code, name, description, level, tags, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(skill.id.to_string())
    .bind(skill.domain.id.to_string())
    .bind(&skill.code)
    .bind(&skill.name)
    .bind(&skill.description)
    .bind(&skill.level)
    .bind(encode_string_list(&skill.tags))
    .bind(time::to_db(&skill.created_at))
    .execute(pool)
    .await
    .map_err(|e| {
        Error::on_unique_violation(
            e,
            format!("Skill code {} already exists in domain {}", skill.code, skill.domain.code),
        )
    })?;

    info!(skill_id = %skill.id, code = %skill.code, domain = %skill.domain.code, "Created skill");
    Ok(skill)
}

pub async fn get_skill(pool: &SqlitePool, id: Uuid) -> Result<Option<Skill>> {
    let row = sqlx::query(&format!("{} WHERE s.id = ?", SELECT_SKILL))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;
    row.as_ref().map(skill_from_row).transpose()
}

pub async fn list_skills(pool: &SqlitePool, filter: &SkillFilter, limit: i64, offset: i64) -> Result<Vec<Skill>> {
    let mut builder = QueryBuilder::<Sqlite>::new(SELECT_SKILL);
    builder.push(" WHERE 1 = 1");
    if let Some(domain_id) = filter.domain_id {
        builder.push(" AND s.domain_id = ").push_bind(domain_id.to_string());
    }
    if let Some(code) = &filter.code {
        builder.push(" AND s.code LIKE ").push_bind(format!("%{}%", code));
    }
    builder
        .push(" ORDER BY d.code, s.code LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows = builder.build().fetch_all(pool).await?;
    rows.iter().map(skill_from_row).collect()
}

fn skill_from_row(row: &SqliteRow) -> Result<Skill> {
    Ok(Skill {
        id: get_uuid(row, "id")?,
        domain: DomainRef {
            id: get_uuid(row, "domain_id")?,
            code: row.try_get("domain_code")?,
            name: row.try_get("domain_name")?,
        },
        code: row.try_get("code")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        level: row.try_get("level")?,
        tags: get_string_list(row, "tags")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}
