//! Folio - contact relay server
//!
//! Main entry point for the server hosting the contact endpoint.

use anyhow::Context;
use folio::contact::{self, RelayState, ResendMailer};
use folio::storage::config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    let config = config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load configuration, using defaults: {}", e);
        config::AppConfig::default()
    });

    if std::env::var_os(&config.mail.api_key_env).is_none() {
        tracing::warn!(
            "{} is not set; contact requests will fail until it is",
            config.mail.api_key_env
        );
    }

    let mailer = ResendMailer::new(config.mail.endpoint.clone());
    let app = contact::router(
        &config.server.contact_path,
        RelayState::new(mailer, config.mail.clone()),
    );

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address))?;

    tracing::info!(
        "Contact relay listening on {} at {}",
        config.server.bind_address,
        config.server.contact_path
    );

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
