//! Content item queries
//!
//! Items are read joined with their domain; the skill associations are
//! loaded separately and returned inline.

use std::collections::HashSet;

use learnsmart_common::db::row::{get_timestamp, get_uuid};
use learnsmart_common::{time, uuid_utils, Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::db::{domains, skills};
use crate::models::{ContentItem, ContentItemInput, ContentItemSkill, ContentItemUpdate, DomainRef, SkillWeight};

const SELECT_ITEM: &str = r#"
    SELECT c.id, c.type, c.title, c.description, c.estimated_minutes, c.difficulty,
           c.metadata, c.is_active, c.created_at, c.updated_at,
           d.id AS domain_id, d.code AS domain_code, d.name AS domain_name
    FROM content_items c
    JOIN domains d ON d.id = c.domain_id
"#;

/// Content item listing filters
#[derive(Debug, Clone, Default)]
pub struct ContentItemFilter {
    pub domain_id: Option<Uuid>,
    pub item_type: Option<String>,
    pub active: Option<bool>,
}

fn check_difficulty(difficulty: Option<f64>) -> Result<()> {
    match difficulty {
        Some(d) if !(0.0..=1.0).contains(&d) => Err(Error::InvalidInput(format!(
            "difficulty must be within [0, 1], got {}",
            d
        ))),
        _ => Ok(()),
    }
}

fn check_minutes(minutes: Option<i64>) -> Result<()> {
    match minutes {
        Some(m) if m < 0 => Err(Error::InvalidInput(format!(
            "estimatedMinutes must not be negative, got {}",
            m
        ))),
        _ => Ok(()),
    }
}

pub async fn create_content_item(pool: &SqlitePool, input: ContentItemInput) -> Result<ContentItem> {
    if input.item_type.trim().is_empty() || input.title.trim().is_empty() {
        return Err(Error::InvalidInput("content item type and title are required".into()));
    }
    check_difficulty(input.difficulty)?;
    check_minutes(input.estimated_minutes)?;

    let domain = domains::get_domain(pool, input.domain_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Domain not found: {}", input.domain_id)))?;

    let now = time::now();
    let item = ContentItem {
        id: uuid_utils::generate(),
        domain: DomainRef {
            id: domain.id,
            code: domain.code,
            name: domain.name,
        },
        item_type: input.item_type,
        title: input.title,
        description: input.description,
        estimated_minutes: input.estimated_minutes,
        difficulty: input.difficulty,
        metadata: input.metadata,
        active: input.active.unwrap_or(true),
        skills: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO content_items
            (id, domain_id, type, title, description, estimated_minutes, difficulty,
             metadata, is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(item.id.to_string())
    .bind(item.domain.id.to_string())
    .bind(&item.item_type)
    .bind(&item.title)
    .bind(&item.description)
    .bind(item.estimated_minutes)
    .bind(item.difficulty)
    .bind(&item.metadata)
    .bind(item.active)
    .bind(time::to_db(&item.created_at))
    .bind(time::to_db(&item.updated_at))
    .execute(pool)
    .await?;

    info!(content_item_id = %item.id, domain = %item.domain.code, kind = %item.item_type, "Created content item");
    Ok(item)
}

pub async fn get_content_item(pool: &SqlitePool, id: Uuid) -> Result<Option<ContentItem>> {
    let row = sqlx::query(&format!("{} WHERE c.id = ?", SELECT_ITEM))
        .bind(id.to_string())
        .fetch_optional(pool)
        .await?;
    match row {
        Some(row) => {
            let mut item = item_from_row(&row)?;
            item.skills = load_skills(pool, item.id).await?;
            Ok(Some(item))
        }
        None => Ok(None),
    }
}

pub async fn list_content_items(
    pool: &SqlitePool,
    filter: &ContentItemFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<ContentItem>> {
    let mut builder = QueryBuilder::<Sqlite>::new(SELECT_ITEM);
    builder.push(" WHERE 1 = 1");
    if let Some(domain_id) = filter.domain_id {
        builder.push(" AND c.domain_id = ").push_bind(domain_id.to_string());
    }
    if let Some(item_type) = &filter.item_type {
        builder.push(" AND c.type = ").push_bind(item_type.clone());
    }
    if let Some(active) = filter.active {
        builder.push(" AND c.is_active = ").push_bind(active);
    }
    builder
        .push(" ORDER BY c.created_at, c.id LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows = builder.build().fetch_all(pool).await?;
    let mut items = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut item = item_from_row(row)?;
        item.skills = load_skills(pool, item.id).await?;
        items.push(item);
    }
    Ok(items)
}

/// Apply a partial update, returning `None` when the item does not exist
pub async fn update_content_item(
    pool: &SqlitePool,
    id: Uuid,
    update: ContentItemUpdate,
) -> Result<Option<ContentItem>> {
    let Some(mut item) = get_content_item(pool, id).await? else {
        return Ok(None);
    };

    if let Some(title) = update.title {
        if title.trim().is_empty() {
            return Err(Error::InvalidInput("content item title must not be blank".into()));
        }
        item.title = title;
    }
    check_difficulty(update.difficulty)?;
    check_minutes(update.estimated_minutes)?;

    if update.description.is_some() {
        item.description = update.description;
    }
    if update.estimated_minutes.is_some() {
        item.estimated_minutes = update.estimated_minutes;
    }
    if update.difficulty.is_some() {
        item.difficulty = update.difficulty;
    }
    if update.metadata.is_some() {
        item.metadata = update.metadata;
    }
    if let Some(active) = update.active {
        item.active = active;
    }
    item.updated_at = time::now();

    sqlx::query(
        r#"
        UPDATE content_items
        SET title = ?, description = ?, estimated_minutes = ?, difficulty = ?,
            metadata = ?, is_active = ?, updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&item.title)
    .bind(&item.description)
    .bind(item.estimated_minutes)
    .bind(item.difficulty)
    .bind(&item.metadata)
    .bind(item.active)
    .bind(time::to_db(&item.updated_at))
    .bind(item.id.to_string())
    .execute(pool)
    .await?;

    info!(content_item_id = %item.id, "Updated content item");
    Ok(Some(item))
}

/// Delete an item and its skill associations; false when nothing matched
pub async fn delete_content_item(pool: &SqlitePool, id: Uuid) -> Result<bool> {
    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM content_item_skills WHERE content_item_id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM content_items WHERE id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        info!(content_item_id = %id, "Deleted content item");
    }
    Ok(deleted)
}

/// Replace the item's skill associations with `weights`
///
/// Every skill must exist; a skill may appear once with a non-negative weight.
pub async fn set_skills(pool: &SqlitePool, id: Uuid, weights: Vec<SkillWeight>) -> Result<ContentItem> {
    let mut seen = HashSet::new();
    for entry in &weights {
        if !seen.insert(entry.skill_id) {
            return Err(Error::InvalidInput(format!("duplicate skillId {}", entry.skill_id)));
        }
        if !entry.weight.is_finite() || entry.weight < 0.0 {
            return Err(Error::InvalidInput(format!(
                "weight for skill {} must be a non-negative number",
                entry.skill_id
            )));
        }
    }

    if get_content_item(pool, id).await?.is_none() {
        return Err(Error::NotFound(format!("Content item not found: {}", id)));
    }
    for entry in &weights {
        if skills::get_skill(pool, entry.skill_id).await?.is_none() {
            return Err(Error::NotFound(format!("Skill not found: {}", entry.skill_id)));
        }
    }

    let mut tx = pool.begin().await?;
    sqlx::query("DELETE FROM content_item_skills WHERE content_item_id = ?")
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;
    for entry in &weights {
        sqlx::query("INSERT INTO content_item_skills (content_item_id, skill_id, weight) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind(entry.skill_id.to_string())
            .bind(entry.weight)
            .execute(&mut *tx)
            .await?;
    }
    sqlx::query("UPDATE content_items SET updated_at = ? WHERE id = ?")
        .bind(time::to_db(&time::now()))
        .bind(id.to_string())
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(content_item_id = %id, skills = weights.len(), "Replaced content item skills");
    get_content_item(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Content item not found: {}", id)))
}

async fn load_skills(pool: &SqlitePool, id: Uuid) -> Result<Vec<ContentItemSkill>> {
    let rows = sqlx::query(
        r#"
        SELECT cs.skill_id, s.code AS skill_code, cs.weight
        FROM content_item_skills cs
        JOIN skills s ON s.id = cs.skill_id
        WHERE cs.content_item_id = ?
        ORDER BY s.code
        "#,
    )
    .bind(id.to_string())
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| -> Result<ContentItemSkill> {
            Ok(ContentItemSkill {
                skill_id: get_uuid(row, "skill_id")?,
                skill_code: row.try_get("skill_code")?,
                weight: row.try_get("weight")?,
            })
        })
        .collect()
}

fn item_from_row(row: &SqliteRow) -> Result<ContentItem> {
    Ok(ContentItem {
        id: get_uuid(row, "id")?,
        domain: DomainRef {
            id: get_uuid(row, "domain_id")?,
            code: row.try_get("domain_code")?,
            name: row.try_get("domain_name")?,
        },
        item_type: row.try_get("type")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        estimated_minutes: row.try_get("estimated_minutes")?,
        difficulty: row.try_get("difficulty")?,
        metadata: row.try_get("metadata")?,
        active: row.try_get("is_active")?,
        skills: Vec::new(),
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
