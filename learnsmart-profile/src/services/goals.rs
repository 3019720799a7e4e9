//! Learning goals owned by a profile

use learnsmart_common::{time, uuid_utils};
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{ProfileError, Result};
use crate::models::{GoalUpdate, NewGoal, UserGoal};

pub async fn list_goals(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<UserGoal>> {
    Ok(db::goals::list_for_user(pool, user_id).await?)
}

pub async fn create_goal(pool: &SqlitePool, user_id: Uuid, new: NewGoal) -> Result<UserGoal> {
    if new.title.trim().is_empty() {
        return Err(ProfileError::InvalidInput("title is required".into()));
    }

    let now = time::now();
    let goal = UserGoal {
        id: uuid_utils::generate(),
        user_id,
        title: new.title,
        description: new.description,
        domain: new.domain,
        target_level: new.target_level,
        due_date: new.due_date,
        intensity: new.intensity,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    db::goals::insert_goal(pool, &goal).await?;

    info!(goal_id = %goal.id, user_id = %user_id, "Created goal");
    Ok(goal)
}

pub async fn update_goal(
    pool: &SqlitePool,
    user_id: Uuid,
    goal_id: Uuid,
    update: GoalUpdate,
) -> Result<UserGoal> {
    let mut goal = db::goals::find_owned(pool, user_id, goal_id)
        .await?
        .ok_or(ProfileError::GoalNotFound(goal_id))?;

    if let Some(title) = update.title {
        if title.trim().is_empty() {
            return Err(ProfileError::InvalidInput("title must not be blank".into()));
        }
        goal.title = title;
    }
    if update.description.is_some() {
        goal.description = update.description;
    }
    if update.domain.is_some() {
        goal.domain = update.domain;
    }
    if update.target_level.is_some() {
        goal.target_level = update.target_level;
    }
    if update.due_date.is_some() {
        goal.due_date = update.due_date;
    }
    if update.intensity.is_some() {
        goal.intensity = update.intensity;
    }
    if let Some(is_active) = update.is_active {
        goal.is_active = is_active;
    }
    goal.updated_at = time::now();

    db::goals::update_goal(pool, &goal).await?;
    Ok(goal)
}

pub async fn delete_goal(pool: &SqlitePool, user_id: Uuid, goal_id: Uuid) -> Result<()> {
    if !db::goals::delete_owned(pool, user_id, goal_id).await? {
        return Err(ProfileError::GoalNotFound(goal_id));
    }
    info!(goal_id = %goal_id, user_id = %user_id, "Deleted goal");
    Ok(())
}
