//! Assessment data model
//!
//! Items own their options and skill links by id only; the database layer
//! assembles them with explicit foreign-key lookups.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session status set on creation
pub const STATUS_IN_PROGRESS: &str = "in_progress";
/// Session status that stamps `completed_at`
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentItem {
    pub id: Uuid,
    pub domain_id: Uuid,
    pub origin: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub stem: String,
    pub difficulty: Option<f64>,
    pub metadata: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub options: Vec<ItemOption>,
    pub skills: Vec<ItemSkill>,
}

impl AssessmentItem {
    pub fn option(&self, option_id: Uuid) -> Option<&ItemOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOption {
    pub id: Uuid,
    pub label: Option<String>,
    pub statement: String,
    pub is_correct: bool,
    pub error_tag: Option<String>,
    pub feedback_template: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSkill {
    pub skill_id: Uuid,
    pub weight: f64,
}

/// `POST /assessment-items` body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub domain_id: Uuid,
    #[serde(rename = "type")]
    pub item_type: String,
    pub stem: String,
    pub origin: Option<String>,
    pub difficulty: Option<f64>,
    pub metadata: Option<String>,
    #[serde(default)]
    pub options: Vec<NewOption>,
    #[serde(default)]
    pub skills: Vec<NewSkill>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOption {
    #[serde(alias = "statement")]
    pub text: String,
    #[serde(default, alias = "correct")]
    pub is_correct: bool,
    pub feedback: Option<String>,
    pub label: Option<String>,
    pub error_tag: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    pub skill_id: Uuid,
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSession {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub session_type: String,
    pub status: String,
    pub plan_id: Option<Uuid>,
    pub module_id: Option<Uuid>,
    pub config: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// `POST /assessments/sessions` body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub user_id: Uuid,
    #[serde(rename = "type", default = "default_session_type")]
    pub session_type: String,
    pub plan_id: Option<Uuid>,
    pub module_id: Option<Uuid>,
    pub config: Option<String>,
}

fn default_session_type() -> String {
    "diagnostic".to_string()
}

/// One submission; written once and never updated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItemResponse {
    pub id: Uuid,
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub assessment_item_id: Uuid,
    pub selected_option_id: Option<Uuid>,
    pub response_payload: Option<String>,
    pub is_correct: bool,
    pub response_time_ms: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// `POST /assessments/sessions/:id/responses` body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub assessment_item_id: Uuid,
    pub selected_option_id: Option<Uuid>,
    pub response_payload: Option<String>,
    pub response_time_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSkillMastery {
    pub user_id: Uuid,
    pub skill_id: Uuid,
    pub mastery: f64,
    pub attempts: i64,
    pub last_update: DateTime<Utc>,
}

/// Stored response plus grading feedback and the mastery rows it touched
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedResponse {
    #[serde(flatten)]
    pub response: UserItemResponse,
    pub feedback: String,
    pub mastery_updates: Vec<UserSkillMastery>,
}
