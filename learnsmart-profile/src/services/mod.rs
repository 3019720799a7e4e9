//! Profile business logic

pub mod clients;
pub mod goals;
pub mod preferences;
pub mod profiles;
pub mod progress;

pub use clients::{
    AssessmentClient, HttpAssessmentClient, HttpPlanningClient, HttpTrackingClient,
    PlanningClient, TrackingClient,
};
pub use progress::{collect_progress, Collaborators};
