//! HTTP API handlers for learnsmart-tracking

pub mod analytics;
pub mod events;

pub use analytics::analytics_routes;
pub use events::event_routes;
