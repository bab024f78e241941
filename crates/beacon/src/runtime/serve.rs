//! Serve — wire the health service into a server and run until shutdown.
//!
//! This is the hosting side of the bootstrap: it owns the status
//! registry, the drain deadline, and the decision to force-stop.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::bootstrap::ServerBootstrap;
use crate::conf::ServerConfig;
use crate::health::{HealthServiceImpl, StatusRegistry};
use crate::proto::health_server::HealthServer;
use crate::runtime::stop::shutdown_signal;

/// Build a server with the health service registered, open the listener,
/// and serve until a shutdown signal lands. Drain is given
/// `drain_timeout_secs` to finish before the stop is forced.
pub async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(StatusRegistry::new());
    // Empty name is the whole-server entry liveness probes ask about.
    registry.set_serving("");

    let mut bootstrap =
        ServerBootstrap::new().max_concurrent_streams(config.max_concurrent_streams);
    let health = HealthServiceImpl::new(registry.clone(), bootstrap.shutdown_listener());
    bootstrap.register(HealthServer::new(health))?;

    let handle = Arc::new(bootstrap.build()?);

    let addr: SocketAddr = config.bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;
    let listener = TcpListener::bind(addr).await?;

    info!("gRPC server will bind to: {}", addr);

    let drain_timeout = Duration::from_secs(config.drain_timeout_secs);
    let stopper = Arc::clone(&handle);
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, draining in-flight requests");
        if tokio::time::timeout(drain_timeout, stopper.stop()).await.is_err() {
            warn!("Drain did not finish within {:?}, forcing stop", drain_timeout);
            stopper.force_stop().await;
        }
    });

    handle.serve(listener).await?;

    info!("Server shutdown complete");
    Ok(())
}
