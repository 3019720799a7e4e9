//! Caller identity from request headers
//!
//! The gateway forwards the authenticated subject as `X-Auth-User-Id`.
//! `X-User-Id` carries an internal profile id and is accepted when no auth
//! subject is present. Handlers receive the identity as an argument.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use learnsmart_common::api::ApiError;
use std::fmt;
use uuid::Uuid;

pub const AUTH_USER_HEADER: &str = "x-auth-user-id";
pub const USER_ID_HEADER: &str = "x-user-id";

/// Who is calling a `/profiles/me` route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// External auth subject
    Auth(String),
    /// Internal profile id
    User(Uuid),
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Auth(subject) => write!(f, "authUserId {}", subject),
            Identity::User(id) => write!(f, "userId {}", id),
        }
    }
}

fn header_value<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl Identity {
    pub fn from_parts(parts: &Parts) -> Result<Self, ApiError> {
        if let Some(subject) = header_value(parts, AUTH_USER_HEADER) {
            return Ok(Identity::Auth(subject.to_string()));
        }

        match header_value(parts, USER_ID_HEADER) {
            Some(raw) => Uuid::parse_str(raw)
                .map(Identity::User)
                .map_err(|_| ApiError::Unauthorized(format!("Malformed {} header", USER_ID_HEADER))),
            None => Err(ApiError::Unauthorized(
                "User identity not found in request headers".to_string(),
            )),
        }
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Identity::from_parts(parts)
    }
}

/// Optional auth subject, used when registering a profile
#[derive(Debug, Clone)]
pub struct AuthSubject(pub Option<String>);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthSubject {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthSubject(header_value(parts, AUTH_USER_HEADER).map(str::to_string)))
    }
}
