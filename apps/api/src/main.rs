mod applications;
mod config;
mod contact;
mod db;
mod errors;
mod mailer;
mod models;
mod routes;
mod state;
mod storage;
mod upload;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::applications::service::ApplicationService;
use crate::config::Config;
use crate::contact::service::ContactService;
use crate::db::create_pool;
use crate::mailer::SmtpNotifier;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::pg::{PgApplicationStore, PgContactStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("careers_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Careers API v{}", env!("CARGO_PKG_VERSION"));

    // Ensure the resume upload directory exists before accepting requests
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "failed to create upload directory '{}'",
                config.upload_dir.display()
            )
        })?;
    info!("Upload directory ready: {}", config.upload_dir.display());

    // Initialize PostgreSQL (connection failure here is fatal)
    let pool = create_pool(&config.database_url).await?;

    // Initialize SMTP transport
    let notifier = Arc::new(
        SmtpNotifier::new(&config.smtp_host, &config.smtp_user, &config.smtp_pass)
            .map_err(|e| anyhow::anyhow!("SMTP setup failed: {e}"))?,
    );
    info!("SMTP notifier initialized (relay: {})", config.smtp_host);

    // Wire services with injected store and notifier handles
    let applications = ApplicationService::new(
        Arc::new(PgApplicationStore::new(pool.clone())),
        config.upload_dir.clone(),
    );
    let contacts = ContactService::new(
        Arc::new(PgContactStore::new(pool.clone())),
        notifier,
        config.contact_recipient.clone(),
    );

    let state = AppState {
        applications,
        contacts,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
