//! Learning plan rows

use learnsmart_common::db::row::{get_date, get_opt_date, get_timestamp, get_uuid};
use learnsmart_common::{time, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqliteConnection};
use uuid::Uuid;

use crate::models::{LearningPlan, PlanUpdate};

/// Plan listing filters
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    pub user_id: Option<String>,
    pub status: Option<String>,
}

impl PlanFilter {
    fn push_where(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        builder.push(" WHERE 1 = 1");
        if let Some(user_id) = &self.user_id {
            builder.push(" AND user_id = ").push_bind(user_id.clone());
        }
        if let Some(status) = &self.status {
            builder.push(" AND status = ").push_bind(status.clone());
        }
    }
}

pub async fn insert_plan(conn: &mut SqliteConnection, plan: &LearningPlan) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO learning_plans
            (id, user_id, goal_id, status, start_date, end_date, hours_per_week, generated_by, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(plan.id.to_string())
    .bind(&plan.user_id)
    .bind(&plan.goal_id)
    .bind(&plan.status)
    .bind(time::date_to_db(&plan.start_date))
    .bind(plan.end_date.as_ref().map(time::date_to_db))
    .bind(plan.hours_per_week)
    .bind(&plan.generated_by)
    .bind(time::to_db(&plan.created_at))
    .bind(time::to_db(&plan.updated_at))
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn load_plan(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<LearningPlan>> {
    let row = sqlx::query("SELECT * FROM learning_plans WHERE id = ?")
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(plan_from_row).transpose()
}

/// One page of plans, newest first, with the total match count
pub async fn list_plans(
    conn: &mut SqliteConnection,
    filter: &PlanFilter,
    limit: i64,
    offset: i64,
) -> Result<(Vec<LearningPlan>, i64)> {
    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM learning_plans");
    filter.push_where(&mut count);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(&mut *conn).await?;

    let mut select = QueryBuilder::<Sqlite>::new("SELECT * FROM learning_plans");
    filter.push_where(&mut select);
    select
        .push(" ORDER BY created_at DESC, rowid DESC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    let rows = select.build().fetch_all(&mut *conn).await?;

    let plans = rows.iter().map(plan_from_row).collect::<Result<Vec<_>>>()?;
    Ok((plans, total))
}

/// Apply the present fields of `update`; returns false if the plan is missing
pub async fn update_plan(conn: &mut SqliteConnection, id: Uuid, update: &PlanUpdate) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE learning_plans SET
            status = COALESCE(?, status),
            end_date = COALESCE(?, end_date),
            hours_per_week = COALESCE(?, hours_per_week),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(&update.status)
    .bind(update.end_date.as_ref().map(time::date_to_db))
    .bind(update.hours_per_week)
    .bind(time::to_db(&time::now()))
    .bind(id.to_string())
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

fn plan_from_row(row: &SqliteRow) -> Result<LearningPlan> {
    Ok(LearningPlan {
        id: get_uuid(row, "id")?,
        user_id: row.try_get("user_id")?,
        goal_id: row.try_get("goal_id")?,
        status: row.try_get("status")?,
        start_date: get_date(row, "start_date")?,
        end_date: get_opt_date(row, "end_date")?,
        hours_per_week: row.try_get("hours_per_week")?,
        generated_by: row.try_get("generated_by")?,
        created_at: get_timestamp(row, "created_at")?,
        updated_at: get_timestamp(row, "updated_at")?,
    })
}
