//! learnsmart-profile - Profile microservice entry point

use anyhow::{Context, Result};
use clap::Parser;
use learnsmart_common::config::{Service, ServiceArgs, ServiceConfig, TomlConfig};
use learnsmart_common::db::init_database;
use learnsmart_common::{logging, shutdown::shutdown_signal};
use learnsmart_profile::services::{
    Collaborators, HttpAssessmentClient, HttpPlanningClient, HttpTrackingClient,
};
use learnsmart_profile::{build_router, db, AppState};
use std::sync::Arc;
use tracing::info;

/// Command-line arguments for learnsmart-profile
#[derive(Parser, Debug)]
#[command(name = "learnsmart-profile")]
#[command(about = "Profile microservice for LearnSmart")]
#[command(version)]
struct Args {
    #[command(flatten)]
    service: ServiceArgs,

    /// Base URL of planning-service
    #[arg(long, env = "LEARNSMART_PLANNING_URL")]
    planning_url: Option<String>,

    /// Base URL of assessment-service
    #[arg(long, env = "LEARNSMART_ASSESSMENT_URL")]
    assessment_url: Option<String>,

    /// Base URL of tracking-service
    #[arg(long, env = "LEARNSMART_TRACKING_URL")]
    tracking_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml = TomlConfig::load_or_default(args.service.config.as_deref(), Service::Profile);
    let config = ServiceConfig::resolve(Service::Profile, &args.service, &toml);

    logging::init(&format!("{},tower_http=info", config.log_level));
    logging::log_startup(Service::Profile, env!("CARGO_PKG_VERSION"));

    info!("Database path: {}", config.database.display());
    let pool = init_database(&config.database)
        .await
        .context("Failed to open database")?;
    db::init_tables(&pool)
        .await
        .context("Failed to create profile tables")?;

    let planning_url = config.collaborator_url(Service::Planning, args.planning_url.as_deref());
    let assessment_url = config.collaborator_url(Service::Assessment, args.assessment_url.as_deref());
    let tracking_url = config.collaborator_url(Service::Tracking, args.tracking_url.as_deref());
    info!(
        "Collaborators: planning={} assessment={} tracking={}",
        planning_url, assessment_url, tracking_url
    );

    let collaborators = Collaborators {
        planning: Arc::new(
            HttpPlanningClient::new(&planning_url, config.http_timeout)
                .context("Failed to build planning-service client")?,
        ),
        assessment: Arc::new(
            HttpAssessmentClient::new(&assessment_url, config.http_timeout)
                .context("Failed to build assessment-service client")?,
        ),
        tracking: Arc::new(
            HttpTrackingClient::new(&tracking_url, config.http_timeout)
                .context("Failed to build tracking-service client")?,
        ),
    };

    let app = build_router(AppState::new(pool, collaborators));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("learnsmart-profile listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}
