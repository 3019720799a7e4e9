//! Plan creation, lookup and progress updates

use learnsmart_common::api::{Page, PageQuery};
use learnsmart_common::{time, uuid_utils};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::db::{self, plans::PlanFilter};
use crate::error::{PlanningError, Result};
use crate::models::{
    ActivityUpdate, LearningPlan, ModuleDetail, NewPlan, PlanActivity, PlanDetail, PlanModule,
    PlanUpdate, DEFAULT_GENERATED_BY, ITEM_STATUS_PENDING, PLAN_STATUS_ACTIVE,
};

fn validate(new: &NewPlan) -> Result<()> {
    if new.user_id.trim().is_empty() {
        return Err(PlanningError::InvalidInput("userId is required".into()));
    }
    if new.hours_per_week.is_some_and(|h| h < 0.0) {
        return Err(PlanningError::InvalidInput("hoursPerWeek must not be negative".into()));
    }
    if let (Some(start), Some(end)) = (new.start_date, new.end_date) {
        if end < start {
            return Err(PlanningError::InvalidInput("endDate is before startDate".into()));
        }
    }
    for module in &new.modules {
        if module.title.trim().is_empty() {
            return Err(PlanningError::InvalidInput("module title is required".into()));
        }
        for activity in &module.activities {
            if activity.activity_type.trim().is_empty() || activity.content_ref.trim().is_empty() {
                return Err(PlanningError::InvalidInput(
                    "activity type and contentRef are required".into(),
                ));
            }
        }
    }
    Ok(())
}

fn non_blank(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Store a plan with its nested modules and activities
///
/// Positions are assigned from 1 in request order.
pub async fn create_plan(pool: &SqlitePool, new: NewPlan) -> Result<PlanDetail> {
    validate(&new)?;

    let now = time::now();
    let plan = LearningPlan {
        id: uuid_utils::generate(),
        user_id: new.user_id,
        goal_id: new.goal_id,
        status: non_blank(new.status, PLAN_STATUS_ACTIVE),
        start_date: new.start_date.unwrap_or_else(time::today),
        end_date: new.end_date,
        hours_per_week: new.hours_per_week,
        generated_by: non_blank(new.generated_by, DEFAULT_GENERATED_BY),
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await?;
    db::plans::insert_plan(&mut tx, &plan).await?;

    let mut modules = Vec::with_capacity(new.modules.len());
    for (m_idx, new_module) in new.modules.into_iter().enumerate() {
        let module = PlanModule {
            id: uuid_utils::generate(),
            plan_id: plan.id,
            position: m_idx as i64 + 1,
            title: new_module.title,
            description: new_module.description,
            estimated_hours: new_module.estimated_hours,
            status: non_blank(new_module.status, ITEM_STATUS_PENDING),
            target_skills: new_module.target_skills,
            created_at: now,
            updated_at: now,
        };
        db::modules::insert_module(&mut tx, &module).await?;

        let mut activities = Vec::with_capacity(new_module.activities.len());
        for (a_idx, new_activity) in new_module.activities.into_iter().enumerate() {
            let activity = PlanActivity {
                id: uuid_utils::generate(),
                module_id: module.id,
                position: a_idx as i64 + 1,
                activity_type: new_activity.activity_type,
                status: non_blank(new_activity.status, ITEM_STATUS_PENDING),
                content_ref: new_activity.content_ref,
                estimated_minutes: new_activity.estimated_minutes,
                override_estimated_minutes: None,
                created_at: now,
                updated_at: now,
            };
            db::activities::insert_activity(&mut tx, &activity).await?;
            activities.push(activity);
        }

        modules.push(ModuleDetail { module, activities });
    }

    tx.commit().await?;

    info!(plan_id = %plan.id, user_id = %plan.user_id, modules = modules.len(), "Created learning plan");
    Ok(PlanDetail { plan, modules })
}

async fn load_detail(conn: &mut SqliteConnection, plan: LearningPlan) -> Result<PlanDetail> {
    let mut modules = Vec::new();
    for module in db::modules::list_for_plan(conn, plan.id).await? {
        let activities = db::activities::list_for_module(conn, module.id).await?;
        modules.push(ModuleDetail { module, activities });
    }
    Ok(PlanDetail { plan, modules })
}

async fn require_plan(conn: &mut SqliteConnection, plan_id: Uuid) -> Result<LearningPlan> {
    db::plans::load_plan(conn, plan_id)
        .await?
        .ok_or(PlanningError::PlanNotFound(plan_id))
}

async fn require_module_in_plan(
    conn: &mut SqliteConnection,
    plan_id: Uuid,
    module_id: Uuid,
) -> Result<PlanModule> {
    let module = db::modules::load_module(conn, module_id)
        .await?
        .ok_or(PlanningError::ModuleNotFound(module_id))?;
    if module.plan_id != plan_id {
        return Err(PlanningError::NotInPlan {
            kind: "Module",
            id: module_id,
            plan_id,
        });
    }
    Ok(module)
}

pub async fn get_plan(pool: &SqlitePool, plan_id: Uuid) -> Result<PlanDetail> {
    let mut conn = pool.acquire().await?;
    let plan = require_plan(&mut conn, plan_id).await?;
    load_detail(&mut conn, plan).await
}

/// Plans newest first, filtered by user and status
pub async fn list_plans(
    pool: &SqlitePool,
    filter: &PlanFilter,
    paging: &PageQuery,
) -> Result<Page<PlanDetail>> {
    let mut conn = pool.acquire().await?;
    let (plans, total) =
        db::plans::list_plans(&mut conn, filter, paging.size(), paging.offset()).await?;

    let mut content = Vec::with_capacity(plans.len());
    for plan in plans {
        content.push(load_detail(&mut conn, plan).await?);
    }
    Ok(Page::new(content, paging, total))
}

pub async fn update_plan(pool: &SqlitePool, plan_id: Uuid, update: PlanUpdate) -> Result<PlanDetail> {
    if update.hours_per_week.is_some_and(|h| h < 0.0) {
        return Err(PlanningError::InvalidInput("hoursPerWeek must not be negative".into()));
    }

    let mut conn = pool.acquire().await?;
    if !db::plans::update_plan(&mut conn, plan_id, &update).await? {
        return Err(PlanningError::PlanNotFound(plan_id));
    }
    let plan = require_plan(&mut conn, plan_id).await?;

    info!(plan_id = %plan_id, status = %plan.status, "Updated learning plan");
    load_detail(&mut conn, plan).await
}

pub async fn list_modules(pool: &SqlitePool, plan_id: Uuid) -> Result<Vec<PlanModule>> {
    let mut conn = pool.acquire().await?;
    require_plan(&mut conn, plan_id).await?;
    Ok(db::modules::list_for_plan(&mut conn, plan_id).await?)
}

pub async fn update_module_status(
    pool: &SqlitePool,
    plan_id: Uuid,
    module_id: Uuid,
    status: &str,
) -> Result<PlanModule> {
    let status = status.trim();
    if status.is_empty() {
        return Err(PlanningError::InvalidInput("status is required".into()));
    }

    let mut conn = pool.acquire().await?;
    require_module_in_plan(&mut conn, plan_id, module_id).await?;
    db::modules::update_status(&mut conn, module_id, status).await?;

    info!(plan_id = %plan_id, module_id = %module_id, status = %status, "Updated module status");
    db::modules::load_module(&mut conn, module_id)
        .await?
        .ok_or(PlanningError::ModuleNotFound(module_id))
}

/// Activities of a plan, or of one of its modules
pub async fn list_activities(
    pool: &SqlitePool,
    plan_id: Uuid,
    module_id: Option<Uuid>,
) -> Result<Vec<PlanActivity>> {
    let mut conn = pool.acquire().await?;
    require_plan(&mut conn, plan_id).await?;

    match module_id {
        Some(module_id) => {
            require_module_in_plan(&mut conn, plan_id, module_id).await?;
            Ok(db::activities::list_for_module(&mut conn, module_id).await?)
        }
        None => Ok(db::activities::list_for_plan(&mut conn, plan_id).await?),
    }
}

pub async fn update_activity(
    pool: &SqlitePool,
    plan_id: Uuid,
    activity_id: Uuid,
    update: ActivityUpdate,
) -> Result<PlanActivity> {
    let status = update.status.trim();
    if status.is_empty() {
        return Err(PlanningError::InvalidInput("status is required".into()));
    }
    if update.override_estimated_minutes.is_some_and(|m| m < 0) {
        return Err(PlanningError::InvalidInput(
            "overrideEstimatedMinutes must not be negative".into(),
        ));
    }

    let mut conn = pool.acquire().await?;
    let activity = db::activities::load_activity(&mut conn, activity_id)
        .await?
        .ok_or(PlanningError::ActivityNotFound(activity_id))?;
    let module = db::modules::load_module(&mut conn, activity.module_id)
        .await?
        .ok_or(PlanningError::ModuleNotFound(activity.module_id))?;
    if module.plan_id != plan_id {
        return Err(PlanningError::NotInPlan {
            kind: "Activity",
            id: activity_id,
            plan_id,
        });
    }

    db::activities::update_activity(&mut conn, activity_id, status, update.override_estimated_minutes)
        .await?;

    info!(plan_id = %plan_id, activity_id = %activity_id, status = %status, "Updated activity");
    db::activities::load_activity(&mut conn, activity_id)
        .await?
        .ok_or(PlanningError::ActivityNotFound(activity_id))
}
