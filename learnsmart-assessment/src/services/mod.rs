//! Assessment business logic

pub mod content_client;
pub mod grading;
pub mod items;
pub mod mastery;
pub mod sessions;

pub use content_client::{enrich_masteries, ContentClient, HttpContentClient};
