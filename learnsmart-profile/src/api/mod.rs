//! HTTP API handlers for learnsmart-profile
//!
//! Routes under `/profiles/me` act on the caller, identified by request
//! headers (see [`crate::identity`]).

pub mod goals;
pub mod preferences;
pub mod profiles;
pub mod progress;

pub use goals::goal_routes;
pub use preferences::preference_routes;
pub use profiles::profile_routes;
pub use progress::progress_routes;
