//! Planning business logic

pub mod plans;
