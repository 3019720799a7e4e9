//! Session lifecycle and response submission

use learnsmart_common::{time, uuid_utils};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db;
use crate::error::{AssessmentError, Result};
use crate::models::{
    AssessmentItem, AssessmentSession, GradedResponse, NewSession, SubmitResponseRequest,
    UserItemResponse, UserSkillMastery, STATUS_COMPLETED, STATUS_IN_PROGRESS,
};
use crate::services::{grading, mastery};

pub async fn start_session(pool: &SqlitePool, new: NewSession) -> Result<AssessmentSession> {
    if new.session_type.trim().is_empty() {
        return Err(AssessmentError::InvalidInput("type must not be empty".into()));
    }

    let session = AssessmentSession {
        id: uuid_utils::generate(),
        user_id: new.user_id,
        session_type: new.session_type,
        status: STATUS_IN_PROGRESS.to_string(),
        plan_id: new.plan_id,
        module_id: new.module_id,
        config: new.config,
        started_at: time::now(),
        completed_at: None,
    };

    let mut conn = pool.acquire().await?;
    db::sessions::insert_session(&mut conn, &session).await?;

    info!(session_id = %session.id, user_id = %session.user_id, "Started assessment session");
    Ok(session)
}

pub async fn get_session(pool: &SqlitePool, id: Uuid) -> Result<AssessmentSession> {
    let mut conn = pool.acquire().await?;
    db::sessions::load_session(&mut conn, id)
        .await?
        .ok_or(AssessmentError::SessionNotFound(id))
}

/// Change a session's status; moving to `completed` stamps `completed_at`
pub async fn update_status(pool: &SqlitePool, id: Uuid, status: &str) -> Result<AssessmentSession> {
    let status = status.trim();
    if status.is_empty() {
        return Err(AssessmentError::InvalidInput("status must not be empty".into()));
    }
    let completed_at = (status == STATUS_COMPLETED).then(time::now);

    let mut conn = pool.acquire().await?;
    if !db::sessions::update_status(&mut conn, id, status, completed_at).await? {
        return Err(AssessmentError::SessionNotFound(id));
    }
    let session = db::sessions::load_session(&mut conn, id)
        .await?
        .ok_or(AssessmentError::SessionNotFound(id))?;

    info!(session_id = %id, status = %session.status, "Updated session status");
    Ok(session)
}

/// Next item for a session: any active item, chosen at random
pub async fn next_item(pool: &SqlitePool, session_id: Uuid) -> Result<AssessmentItem> {
    let mut conn = pool.acquire().await?;
    db::sessions::load_session(&mut conn, session_id)
        .await?
        .ok_or(AssessmentError::SessionNotFound(session_id))?;

    db::items::random_active_item(&mut conn)
        .await?
        .ok_or(AssessmentError::NoActiveItems)
}

pub async fn list_responses(pool: &SqlitePool, session_id: Uuid) -> Result<Vec<UserItemResponse>> {
    let mut conn = pool.acquire().await?;
    db::sessions::load_session(&mut conn, session_id)
        .await?
        .ok_or(AssessmentError::SessionNotFound(session_id))?;

    Ok(db::responses::list_for_session(&mut conn, session_id).await?)
}

/// Grade a submission, store it and update mastery for every linked skill
///
/// Everything happens in one transaction: either the response and all its
/// mastery updates are stored, or nothing is. The mastery read-modify-write
/// carries no version check, so two concurrent submissions touching the
/// same (user, skill) may lose one update.
pub async fn submit_response(
    pool: &SqlitePool,
    session_id: Uuid,
    request: SubmitResponseRequest,
) -> Result<GradedResponse> {
    let mut tx = pool.begin().await?;

    let session = db::sessions::load_session(&mut tx, session_id)
        .await?
        .ok_or(AssessmentError::SessionNotFound(session_id))?;
    let item = db::items::load_item(&mut tx, request.assessment_item_id)
        .await?
        .ok_or(AssessmentError::ItemNotFound(request.assessment_item_id))?;

    let grade = grading::grade(
        &item,
        request.selected_option_id,
        request.response_payload.as_deref(),
    )?;

    let now = time::now();
    let response = UserItemResponse {
        id: uuid_utils::generate(),
        session_id: session.id,
        user_id: session.user_id,
        assessment_item_id: item.id,
        selected_option_id: request.selected_option_id,
        response_payload: request.response_payload,
        is_correct: grade.is_correct,
        response_time_ms: request.response_time_ms,
        created_at: now,
    };
    db::responses::insert_response(&mut tx, &response).await?;

    let mut mastery_updates = Vec::with_capacity(item.skills.len());
    for skill in &item.skills {
        let previous = db::mastery::load(&mut tx, session.user_id, skill.skill_id)
            .await?
            .map(|m| mastery::MasteryState {
                mastery: m.mastery,
                attempts: m.attempts,
            });
        let next = mastery::update(previous, grade.is_correct);

        let record = UserSkillMastery {
            user_id: session.user_id,
            skill_id: skill.skill_id,
            mastery: next.mastery,
            attempts: next.attempts,
            last_update: now,
        };
        db::mastery::save(&mut tx, &record).await?;
        debug!(skill_id = %skill.skill_id, mastery = next.mastery, attempts = next.attempts, "Mastery updated");
        mastery_updates.push(record);
    }

    tx.commit().await?;

    info!(
        session_id = %session_id,
        item_id = %item.id,
        correct = grade.is_correct,
        skills = mastery_updates.len(),
        "Recorded response"
    );

    Ok(GradedResponse {
        response,
        feedback: grade.feedback,
        mastery_updates,
    })
}
