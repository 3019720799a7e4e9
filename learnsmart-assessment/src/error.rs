//! Error types for learnsmart-assessment

use learnsmart_common::api::ApiError;
use thiserror::Error;
use uuid::Uuid;

use crate::services::grading::GradingError;

/// Assessment domain errors
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Assessment item not found: {0}")]
    ItemNotFound(Uuid),

    #[error(transparent)]
    Grading(#[from] GradingError),

    #[error("No active assessment items")]
    NoActiveItems,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Common(#[from] learnsmart_common::Error),
}

impl From<sqlx::Error> for AssessmentError {
    fn from(err: sqlx::Error) -> Self {
        AssessmentError::Common(learnsmart_common::Error::Database(err))
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::SessionNotFound(_)
            | AssessmentError::ItemNotFound(_)
            | AssessmentError::Grading(GradingError::OptionNotFound(_))
            | AssessmentError::NoActiveItems => ApiError::NotFound(err.to_string()),
            AssessmentError::InvalidInput(msg) => ApiError::BadRequest(msg),
            AssessmentError::Common(e) => ApiError::Common(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, AssessmentError>;
