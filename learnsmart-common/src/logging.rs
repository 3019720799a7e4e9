//! Tracing subscriber setup shared by all service binaries

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Service;

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise `default_directive` (usually the
/// configured log level) applies. Repeated calls are ignored.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Log build identification immediately after tracing init
pub fn log_startup(service: Service, version: &str) {
    info!(
        "Starting LearnSmart {} v{} (default port {})",
        service.name(),
        version,
        service.default_port()
    );
}
