//! Learning plan data model
//!
//! Plans, modules and activities are stored in separate tables and reference
//! their parent by id. The nested shapes below are assembled for responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const PLAN_STATUS_ACTIVE: &str = "active";
pub const ITEM_STATUS_PENDING: &str = "pending";
pub const DEFAULT_GENERATED_BY: &str = "user";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPlan {
    pub id: Uuid,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub status: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub hours_per_week: Option<f64>,
    pub generated_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanModule {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub position: i64,
    pub title: String,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub status: String,
    pub target_skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanActivity {
    pub id: Uuid,
    pub module_id: Uuid,
    pub position: i64,
    pub activity_type: String,
    pub status: String,
    pub content_ref: String,
    pub estimated_minutes: Option<i64>,
    pub override_estimated_minutes: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Module with its activities, as returned inside a plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDetail {
    #[serde(flatten)]
    pub module: PlanModule,
    pub activities: Vec<PlanActivity>,
}

/// Plan with modules and activities in position order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    #[serde(flatten)]
    pub plan: LearningPlan,
    pub modules: Vec<ModuleDetail>,
}

/// `POST /plans` body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub user_id: String,
    pub goal_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub hours_per_week: Option<f64>,
    pub generated_by: Option<String>,
    #[serde(default)]
    pub modules: Vec<NewModule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewModule {
    pub title: String,
    pub description: Option<String>,
    pub estimated_hours: Option<f64>,
    pub status: Option<String>,
    #[serde(default)]
    pub target_skills: Vec<String>,
    #[serde(default)]
    pub activities: Vec<NewActivity>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    #[serde(alias = "type")]
    pub activity_type: String,
    pub content_ref: String,
    pub status: Option<String>,
    pub estimated_minutes: Option<i64>,
}

/// `PUT /plans/:id` body; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanUpdate {
    pub status: Option<String>,
    pub end_date: Option<NaiveDate>,
    pub hours_per_week: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleStatusUpdate {
    pub status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUpdate {
    pub status: String,
    pub override_estimated_minutes: Option<i64>,
}
