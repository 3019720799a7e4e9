//! learnsmart-assessment - Assessment microservice entry point

use anyhow::{Context, Result};
use clap::Parser;
use learnsmart_assessment::services::HttpContentClient;
use learnsmart_assessment::{build_router, db, AppState};
use learnsmart_common::config::{Service, ServiceArgs, ServiceConfig, TomlConfig};
use learnsmart_common::db::init_database;
use learnsmart_common::{logging, shutdown::shutdown_signal};
use std::sync::Arc;
use tracing::info;

/// Command-line arguments for learnsmart-assessment
#[derive(Parser, Debug)]
#[command(name = "learnsmart-assessment")]
#[command(about = "Assessment microservice for LearnSmart")]
#[command(version)]
struct Args {
    #[command(flatten)]
    service: ServiceArgs,

    /// Base URL of content-service
    #[arg(long, env = "LEARNSMART_CONTENT_URL")]
    content_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml = TomlConfig::load_or_default(args.service.config.as_deref(), Service::Assessment);
    let config = ServiceConfig::resolve(Service::Assessment, &args.service, &toml);

    logging::init(&format!("{},tower_http=info", config.log_level));
    logging::log_startup(Service::Assessment, env!("CARGO_PKG_VERSION"));

    info!("Database path: {}", config.database.display());
    let pool = init_database(&config.database)
        .await
        .context("Failed to open database")?;
    db::init_tables(&pool)
        .await
        .context("Failed to create assessment tables")?;

    let content_url = config.collaborator_url(Service::Content, args.content_url.as_deref());
    info!("content-service: {}", content_url);
    let content = HttpContentClient::new(&content_url, config.http_timeout)
        .context("Failed to build content-service client")?;

    let app = build_router(AppState::new(pool, Arc::new(content)));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("learnsmart-assessment listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
