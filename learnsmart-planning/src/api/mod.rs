//! HTTP API handlers for learnsmart-planning

pub mod modules;
pub mod plans;

pub use modules::module_routes;
pub use plans::plan_routes;
