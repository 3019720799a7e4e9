//! Event recording and search

use learnsmart_common::api::{Page, PageQuery};
use learnsmart_common::{time, uuid_utils, Error, Result};
use sqlx::SqlitePool;
use tracing::debug;

use crate::db::events::{self, EventFilter};
use crate::models::{LearningEvent, NewEvent};

/// Store one event; `occurredAt` defaults to now
pub async fn record_event(pool: &SqlitePool, new: NewEvent) -> Result<LearningEvent> {
    if new.event_type.trim().is_empty() {
        return Err(Error::InvalidInput("eventType is required".into()));
    }

    let now = time::now();
    let event = LearningEvent {
        id: uuid_utils::generate(),
        user_id: new.user_id,
        payload: new.payload_text(),
        event_type: new.event_type,
        entity_type: new.entity_type,
        entity_id: new.entity_id,
        occurred_at: new.occurred_at.unwrap_or(now),
        created_at: now,
    };

    events::insert_event(pool, &event).await?;
    debug!(event_id = %event.id, user_id = %event.user_id, event_type = %event.event_type, "Recorded event");
    Ok(event)
}

pub async fn search_events(
    pool: &SqlitePool,
    filter: &EventFilter,
    paging: &PageQuery,
) -> Result<Page<LearningEvent>> {
    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(Error::InvalidInput("from is after to".into()));
        }
    }

    let total = events::count_events(pool, filter).await?;
    let content = events::find_events(pool, filter, paging.size(), paging.offset()).await?;
    Ok(Page::new(content, paging, total))
}
