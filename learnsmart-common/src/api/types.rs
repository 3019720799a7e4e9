//! Cross-service contract types
//!
//! Each type is serialized by the producing service and deserialized by its
//! consumers. Consumers tolerate extra fields, so producers are free to
//! return richer payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ========================================
// Planning contracts (producer: planning-service)
// ========================================

/// Plan fields needed to summarize progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub id: Uuid,
    pub user_id: String,
    pub goal_id: Option<String>,
    pub status: String,
}

/// Module fields needed to summarize progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSummary {
    pub id: Uuid,
    pub status: String,
}

/// Status value marking a finished plan module
pub const MODULE_COMPLETED: &str = "COMPLETED";

// ========================================
// Assessment contracts (producer: assessment-service)
// ========================================

/// Per-skill mastery with display names resolved from content-service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMasteryEnriched {
    pub skill_id: Uuid,
    pub skill_name: Option<String>,
    pub domain_name: Option<String>,
    pub mastery: f64,
    #[serde(default)]
    pub attempts: i64,
    pub last_update: Option<DateTime<Utc>>,
}

// ========================================
// Tracking contracts (producer: tracking-service)
// ========================================

/// Aggregate learning statistics for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserStats {
    pub total_hours: f64,
    pub current_streak: i64,
    pub lessons_completed: i64,
    pub assessments_taken: i64,
    pub total_events: i64,
}

// ========================================
// Content contracts (producer: content-service)
// ========================================

/// Skill identity with its owning domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInfo {
    pub id: Uuid,
    pub name: String,
    pub domain: Option<DomainInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    pub id: Uuid,
    pub name: String,
}
