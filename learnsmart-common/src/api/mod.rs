//! API module for shared HTTP API functionality
//!
//! Provides the error-to-response mapping, health route, pagination and the
//! wire types exchanged between LearnSmart services.
//!
//! # Architecture
//!
//! Shared by all 5 LearnSmart microservices:
//! - profile-service (profiles, goals, progress view)
//! - content-service (domains, skills)
//! - planning-service (plans, modules, activities)
//! - assessment-service (items, sessions, mastery)
//! - tracking-service (learning events, analytics)

pub mod error;
pub mod health;
pub mod pagination;
pub mod types;

pub use error::{ApiError, ApiResult};
pub use health::{health_routes, HealthResponse};
pub use pagination::{Page, PageQuery};
