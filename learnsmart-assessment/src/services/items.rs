//! Assessment item authoring

use std::collections::HashSet;

use learnsmart_common::{time, uuid_utils};
use sqlx::SqlitePool;
use tracing::info;

use crate::db;
use crate::error::{AssessmentError, Result};
use crate::models::{AssessmentItem, ItemOption, ItemSkill, NewItem};

const DEFAULT_ORIGIN: &str = "static";
const DEFAULT_SKILL_WEIGHT: f64 = 1.0;

fn validate(new: &NewItem) -> Result<()> {
    if new.stem.trim().is_empty() {
        return Err(AssessmentError::InvalidInput("stem must not be empty".into()));
    }
    if new.item_type.trim().is_empty() {
        return Err(AssessmentError::InvalidInput("type must not be empty".into()));
    }
    if let Some(d) = new.difficulty {
        if !(0.0..=1.0).contains(&d) {
            return Err(AssessmentError::InvalidInput(format!(
                "difficulty {} outside [0, 1]",
                d
            )));
        }
    }
    if new.options.iter().any(|o| o.text.trim().is_empty()) {
        return Err(AssessmentError::InvalidInput("option text must not be empty".into()));
    }
    if new.skills.iter().any(|s| s.weight.is_some_and(|w| w < 0.0)) {
        return Err(AssessmentError::InvalidInput("skill weight must not be negative".into()));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = new.skills.iter().find(|s| !seen.insert(s.skill_id)) {
        return Err(AssessmentError::InvalidInput(format!(
            "duplicate skillId {}",
            dup.skill_id
        )));
    }
    Ok(())
}

/// Validate and store a new item with its options and skills
pub async fn create_item(pool: &SqlitePool, new: NewItem) -> Result<AssessmentItem> {
    validate(&new)?;

    let now = time::now();
    let item = AssessmentItem {
        id: uuid_utils::generate(),
        domain_id: new.domain_id,
        origin: new.origin.unwrap_or_else(|| DEFAULT_ORIGIN.to_string()),
        item_type: new.item_type,
        stem: new.stem,
        difficulty: new.difficulty,
        metadata: new.metadata,
        is_active: true,
        created_at: now,
        updated_at: now,
        options: new
            .options
            .into_iter()
            .map(|o| ItemOption {
                id: uuid_utils::generate(),
                label: o.label,
                statement: o.text,
                is_correct: o.is_correct,
                error_tag: o.error_tag,
                feedback_template: o.feedback,
            })
            .collect(),
        skills: new
            .skills
            .into_iter()
            .map(|s| ItemSkill {
                skill_id: s.skill_id,
                weight: s.weight.unwrap_or(DEFAULT_SKILL_WEIGHT),
            })
            .collect(),
    };

    let mut tx = pool.begin().await?;
    db::items::insert_item(&mut tx, &item).await?;
    tx.commit().await?;

    info!(
        item_id = %item.id,
        options = item.options.len(),
        skills = item.skills.len(),
        "Created assessment item"
    );
    Ok(item)
}
