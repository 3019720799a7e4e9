//! Tracking business logic

pub mod analytics;
pub mod events;
