//! learnsmart-planning - Learning plan microservice entry point

use anyhow::{Context, Result};
use clap::Parser;
use learnsmart_common::config::{Service, ServiceArgs, ServiceConfig, TomlConfig};
use learnsmart_common::db::init_database;
use learnsmart_common::{logging, shutdown::shutdown_signal};
use learnsmart_planning::{build_router, db, AppState};
use tracing::info;

/// Command-line arguments for learnsmart-planning
#[derive(Parser, Debug)]
#[command(name = "learnsmart-planning")]
#[command(about = "Learning plan microservice for LearnSmart")]
#[command(version)]
struct Args {
    #[command(flatten)]
    service: ServiceArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml = TomlConfig::load_or_default(args.service.config.as_deref(), Service::Planning);
    let config = ServiceConfig::resolve(Service::Planning, &args.service, &toml);

    logging::init(&format!("{},tower_http=info", config.log_level));
    logging::log_startup(Service::Planning, env!("CARGO_PKG_VERSION"));

    info!("Database path: {}", config.database.display());
    let pool = init_database(&config.database)
        .await
        .context("Failed to open database")?;
    db::init_tables(&pool)
        .await
        .context("Failed to create planning tables")?;

    let app = build_router(AppState::new(pool));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("learnsmart-planning listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
