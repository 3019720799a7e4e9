//! Learning event queries

use chrono::{DateTime, Utc};
use learnsmart_common::db::row::{get_opt_uuid, get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::models::LearningEvent;

/// Event filters; every field is optional and they combine with AND
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub user_id: Option<Uuid>,
    pub event_type: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    /// Inclusive lower bound on `occurred_at`
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `occurred_at`
    pub to: Option<DateTime<Utc>>,
}

impl EventFilter {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        builder.push(" WHERE 1 = 1");
        if let Some(user_id) = self.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.to_string());
        }
        if let Some(event_type) = &self.event_type {
            builder.push(" AND event_type = ").push_bind(event_type.clone());
        }
        if let Some(entity_type) = &self.entity_type {
            builder.push(" AND entity_type = ").push_bind(entity_type.clone());
        }
        if let Some(entity_id) = self.entity_id {
            builder.push(" AND entity_id = ").push_bind(entity_id.to_string());
        }
        if let Some(from) = &self.from {
            builder.push(" AND occurred_at >= ").push_bind(time::to_db(from));
        }
        if let Some(to) = &self.to {
            builder.push(" AND occurred_at <= ").push_bind(time::to_db(to));
        }
    }
}

pub async fn insert_event(pool: &SqlitePool, event: &LearningEvent) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO learning_events
            (id, user_id, event_type, entity_type, entity_id, occurred_at, payload, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(event.id.to_string())
    .bind(event.user_id.to_string())
    .bind(&event.event_type)
    .bind(&event.entity_type)
    .bind(event.entity_id.map(|id| id.to_string()))
    .bind(time::to_db(&event.occurred_at))
    .bind(&event.payload)
    .bind(time::to_db(&event.created_at))
    .execute(pool)
    .await?;
    Ok(())
}

/// Matching events, most recent first
pub async fn find_events(
    pool: &SqlitePool,
    filter: &EventFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<LearningEvent>> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM learning_events");
    filter.push_where(&mut builder);
    builder
        .push(" ORDER BY occurred_at DESC, rowid DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);

    let rows = builder.build().fetch_all(pool).await?;
    rows.iter().map(event_from_row).collect()
}

pub async fn count_events(pool: &SqlitePool, filter: &EventFilter) -> Result<i64> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM learning_events");
    filter.push_where(&mut builder);
    Ok(builder.build_query_scalar::<i64>().fetch_one(pool).await?)
}

fn event_from_row(row: &SqliteRow) -> Result<LearningEvent> {
    Ok(LearningEvent {
        id: get_uuid(row, "id")?,
        user_id: get_uuid(row, "user_id")?,
        event_type: row.try_get("event_type")?,
        entity_type: row.try_get("entity_type")?,
        entity_id: get_opt_uuid(row, "entity_id")?,
        occurred_at: get_timestamp(row, "occurred_at")?,
        payload: row.try_get("payload")?,
        created_at: get_timestamp(row, "created_at")?,
    })
}
