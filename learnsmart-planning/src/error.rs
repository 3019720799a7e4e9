//! Error types for learnsmart-planning

use learnsmart_common::api::ApiError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("Plan not found: {0}")]
    PlanNotFound(Uuid),

    #[error("Module not found: {0}")]
    ModuleNotFound(Uuid),

    #[error("Activity not found: {0}")]
    ActivityNotFound(Uuid),

    /// Child exists but is attached to a different plan
    #[error("{kind} {id} does not belong to plan {plan_id}")]
    NotInPlan {
        kind: &'static str,
        id: Uuid,
        plan_id: Uuid,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Common(#[from] learnsmart_common::Error),
}

impl From<sqlx::Error> for PlanningError {
    fn from(err: sqlx::Error) -> Self {
        PlanningError::Common(learnsmart_common::Error::Database(err))
    }
}

impl From<PlanningError> for ApiError {
    fn from(err: PlanningError) -> Self {
        match err {
            PlanningError::PlanNotFound(_)
            | PlanningError::ModuleNotFound(_)
            | PlanningError::ActivityNotFound(_)
            | PlanningError::NotInPlan { .. } => ApiError::NotFound(err.to_string()),
            PlanningError::InvalidInput(msg) => ApiError::BadRequest(msg),
            PlanningError::Common(e) => ApiError::Common(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanningError>;
