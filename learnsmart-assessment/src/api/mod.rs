//! HTTP API handlers for learnsmart-assessment

pub mod items;
pub mod mastery;
pub mod sessions;

pub use items::item_routes;
pub use mastery::mastery_routes;
pub use sessions::session_routes;
