//! Error types for learnsmart-profile

use learnsmart_common::api::ApiError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Missing, or owned by another user
    #[error("Goal not found: {0}")]
    GoalNotFound(Uuid),

    #[error("Email already exists: {0}")]
    EmailTaken(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Common(#[from] learnsmart_common::Error),
}

impl From<sqlx::Error> for ProfileError {
    fn from(err: sqlx::Error) -> Self {
        ProfileError::Common(learnsmart_common::Error::Database(err))
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::ProfileNotFound(_) | ProfileError::GoalNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ProfileError::EmailTaken(_) => ApiError::Conflict(err.to_string()),
            ProfileError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ProfileError::Common(e) => ApiError::Common(e),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;
