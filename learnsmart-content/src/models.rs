//! Domain, skill and content item catalog types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInput {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// Owning domain as embedded in a skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRef {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub domain: DomainRef,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillInput {
    pub domain_id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Catalogue entry teaching one or more skills of a domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: Uuid,
    pub domain: DomainRef,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub estimated_minutes: Option<i64>,
    pub difficulty: Option<f64>,
    pub metadata: Option<String>,
    pub active: bool,
    pub skills: Vec<ContentItemSkill>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemSkill {
    pub skill_id: Uuid,
    pub skill_code: String,
    pub weight: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemInput {
    pub domain_id: Uuid,
    #[serde(rename = "type")]
    pub item_type: String,
    pub title: String,
    pub description: Option<String>,
    pub estimated_minutes: Option<i64>,
    pub difficulty: Option<f64>,
    pub metadata: Option<String>,
    pub active: Option<bool>,
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub estimated_minutes: Option<i64>,
    pub difficulty: Option<f64>,
    pub metadata: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillWeight {
    pub skill_id: Uuid,
    pub weight: f64,
}
