//! # LearnSmart Common Library
//!
//! Shared code for all LearnSmart microservices including:
//! - Database initialization and row decoding helpers
//! - API error mapping, health route and cross-service contract types
//! - Configuration loading
//! - HTTP client for collaborator services
//! - Logging initialization, shutdown signal and utility functions

pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod shutdown;
pub mod time;
pub mod uuid_utils;

pub use error::{Error, Result};
