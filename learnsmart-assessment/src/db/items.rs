//! Assessment item persistence

use learnsmart_common::db::row::{get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use crate::models::{AssessmentItem, ItemOption, ItemSkill};

/// Item listing filters
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub domain_id: Option<Uuid>,
    pub origin: Option<String>,
}

/// Insert an item with its options and skill links
///
/// Run inside a transaction so a half-written item is never visible.
pub async fn insert_item(conn: &mut SqliteConnection, item: &AssessmentItem) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO assessment_items
            (id, domain_id, origin, item_type, stem, difficulty, metadata, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.id.to_string())
    .bind(item.domain_id.to_string())
    .bind(&item.origin)
    .bind(&item.item_type)
    .bind(&item.stem)
    .bind(item.difficulty)
    .bind(&item.metadata)
    .bind(item.is_active)
    .bind(time::to_db(&item.created_at))
    .bind(time::to_db(&item.updated_at))
    .execute(&mut *conn)
    .await?;

    for (position, option) in item.options.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO assessment_item_options
                (id, assessment_item_id, position, label, statement, is_correct, error_tag, feedback_template)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(option.id.to_string())
        .bind(item.id.to_string())
        .bind(position as i64)
        .bind(&option.label)
        .bind(&option.statement)
        .bind(option.is_correct)
        .bind(&option.error_tag)
        .bind(&option.feedback_template)
        .execute(&mut *conn)
        .await?;
    }

    for skill in &item.skills {
        sqlx::query(
            "INSERT INTO assessment_item_skills (assessment_item_id, skill_id, weight) VALUES (?, ?, ?)",
        )
        .bind(item.id.to_string())
        .bind(skill.skill_id.to_string())
        .bind(skill.weight)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// Load an item with its options (in insertion order) and skill links
pub async fn load_item(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<AssessmentItem>> {
    let row = sqlx::query("SELECT * FROM assessment_items WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(Some(assemble(conn, &row).await?)),
        None => Ok(None),
    }
}

/// List items, newest first
pub async fn list_items(conn: &mut SqliteConnection, filter: &ItemFilter) -> Result<Vec<AssessmentItem>> {
    let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new("SELECT * FROM assessment_items WHERE 1 = 1");
    if let Some(domain_id) = filter.domain_id {
        builder.push(" AND domain_id = ").push_bind(domain_id.to_string());
    }
    if let Some(origin) = &filter.origin {
        builder.push(" AND origin = ").push_bind(origin.clone());
    }
    builder.push(" ORDER BY created_at DESC, rowid DESC");

    let rows = builder.build().fetch_all(&mut *conn).await?;

    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        items.push(assemble(conn, row).await?);
    }
    Ok(items)
}

/// Pick one active item at random
pub async fn random_active_item(conn: &mut SqliteConnection) -> Result<Option<AssessmentItem>> {
    let row = sqlx::query("SELECT * FROM assessment_items WHERE is_active = 1 ORDER BY RANDOM() LIMIT 1")
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some(row) => Ok(Some(assemble(conn, &row).await?)),
        None => Ok(None),
    }
}

async fn assemble(conn: &mut SqliteConnection, row: &SqliteRow) -> Result<AssessmentItem> {
    let id = get_uuid(row, "id")?;

    let option_rows = sqlx::query(
        "SELECT * FROM assessment_item_options WHERE assessment_item_id = ? ORDER BY position",
    )
    .bind(id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    let options = option_rows
        .iter()
        .map(|r| {
            Ok(ItemOption {
                id: get_uuid(r, "id")?,
                label: r.try_get("label")?,
                statement: r.try_get("statement")?,
                is_correct: r.try_get("is_correct")?,
                error_tag: r.try_get("error_tag")?,
                feedback_template: r.try_get("feedback_template")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let skill_rows = sqlx::query(
        "SELECT skill_id, weight FROM assessment_item_skills WHERE assessment_item_id = ? ORDER BY rowid",
    )
    .bind(id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    let skills = skill_rows
        .iter()
        .map(|r| {
            Ok(ItemSkill {
                skill_id: get_uuid(r, "skill_id")?,
                weight: r.try_get("weight")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AssessmentItem {
        id,
        domain_id: get_uuid(row, "domain_id")?,
        origin: row.try_get("origin")?,
        item_type: row.try_get("item_type")?,
        stem: row.try_get("stem")?,
        difficulty: row.try_get("difficulty")?,
        metadata: row.try_get("metadata")?,
        is_active: row.try_get("is_active")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
        options,
        skills,
    })
}
