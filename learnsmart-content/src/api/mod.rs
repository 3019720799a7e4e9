//! HTTP API handlers for learnsmart-content

pub mod content_items;
pub mod domains;
pub mod skills;

pub use content_items::content_item_routes;
pub use domains::domain_routes;
pub use skills::skill_routes;
