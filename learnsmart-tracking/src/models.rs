//! Learning event types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const EVENT_CONTENT_VIEW: &str = "content_view";
pub const EVENT_ASSESSMENT_STARTED: &str = "assessment_started";
pub const EVENT_ASSESSMENT_COMPLETED: &str = "assessment_completed";

/// Append-only record of something a learner did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub occurred_at: DateTime<Utc>,
    /// Free-form payload text, usually JSON
    pub payload: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `POST /events` body
///
/// `payload` may be a JSON string or any JSON value; non-string values are
/// stored in their serialized form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub user_id: Uuid,
    pub event_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub occurred_at: Option<DateTime<Utc>>,
    pub payload: Option<serde_json::Value>,
}

impl NewEvent {
    pub fn payload_text(&self) -> Option<String> {
        match &self.payload {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Event count and study time for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub event_count: i64,
    pub hours_studied: f64,
}
