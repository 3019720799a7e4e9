//! Profile, goal, preference and progress view types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_HOURS_PER_WEEK: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: Uuid,
    /// Subject issued by the external identity provider
    pub auth_user_id: String,
    pub email: String,
    pub display_name: String,
    pub birth_year: Option<i32>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `POST /profiles` body
///
/// Credentials are handled by the identity provider; a `password` field in
/// the body is accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub email: String,
    pub display_name: String,
    pub locale: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub birth_year: Option<i32>,
    pub locale: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGoal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub target_level: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub intensity: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub target_level: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub intensity: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub domain: Option<String>,
    pub target_level: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub intensity: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPreferences {
    pub user_id: Uuid,
    pub hours_per_week: f64,
    pub preferred_days: Vec<String>,
    pub preferred_session_minutes: Option<i64>,
    pub notifications_enabled: bool,
}

impl StudyPreferences {
    /// Preferences reported for a user who never saved any
    pub fn defaults(user_id: Uuid) -> Self {
        Self {
            user_id,
            hours_per_week: DEFAULT_HOURS_PER_WEEK,
            preferred_days: Vec::new(),
            preferred_session_minutes: None,
            notifications_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    pub hours_per_week: Option<f64>,
    pub preferred_days: Option<Vec<String>>,
    pub preferred_session_minutes: Option<i64>,
    pub notifications_enabled: Option<bool>,
}

// ========================================
// Progress view
// ========================================

/// Best-effort combination of local data and collaborator summaries
///
/// Sections backed by a collaborator are absent when that call failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressView {
    pub profile: ProfileInfo,
    pub goals: Vec<GoalProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_plan: Option<PlanProgress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_in_progress: Option<Vec<SkillMasteryShort>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivitySummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInfo {
    pub user_id: Uuid,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: Uuid,
    pub title: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    pub plan_id: Uuid,
    pub goal_id: Option<String>,
    pub status: String,
    pub completed_modules: usize,
    pub total_modules: usize,
    pub overall_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMasteryShort {
    pub skill_id: Uuid,
    pub skill_name: Option<String>,
    pub mastery: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    pub total_hours: f64,
    pub current_streak: i64,
}
