//! Boot — logging init and config load.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::ServerConfig;

/// Initialise the tracing / logging subsystem.
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beacon=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Load and validate configuration.
///
/// Returns the `ServerConfig` on success.
pub fn boot() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    info!("Starting Beacon v0.0.1");

    let config = ServerConfig::load()?;
    info!("Loaded configuration: bind_address={}", config.bind_address);
    info!(
        "Server tuning: max_concurrent_streams={}, drain_timeout={}s",
        config.max_concurrent_streams, config.drain_timeout_secs
    );

    config.validate()?;

    Ok(config)
}
