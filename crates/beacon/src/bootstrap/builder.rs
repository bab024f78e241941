//! Builder — assemble the dispatch table and produce a ServerHandle.

use std::convert::Infallible;

use tokio::sync::watch;
use tonic::body::Body;
use tonic::server::NamedService;
use tonic::service::RoutesBuilder;
use tower::Service;
use tracing::warn;

use crate::error::ConfigError;
use crate::health::HEALTH_SERVICE;
use crate::runtime::handle::{Lifecycle, ServerHandle, ShutdownListener};

const DEFAULT_MAX_CONCURRENT_STREAMS: usize = 100;

/// Accumulates service registrations and produces a ready-to-serve
/// [`ServerHandle`]. Registration is append-then-freeze: after `build`
/// the dispatch table never changes.
///
/// No network resources are touched here; binding a listener is the
/// hosting process's job.
pub struct ServerBootstrap {
    routes: RoutesBuilder,
    names: Vec<&'static str>,
    lifecycle: watch::Sender<Lifecycle>,
    max_concurrent_streams: usize,
}

impl ServerBootstrap {
    pub fn new() -> Self {
        let (lifecycle, _) = watch::channel(Lifecycle::Constructed);
        Self {
            routes: RoutesBuilder::default(),
            names: Vec::new(),
            lifecycle,
            max_concurrent_streams: DEFAULT_MAX_CONCURRENT_STREAMS,
        }
    }

    /// Cap on concurrent HTTP/2 streams per client connection.
    pub fn max_concurrent_streams(mut self, limit: usize) -> Self {
        self.max_concurrent_streams = limit;
        self
    }

    /// Lifecycle observer valid for the handle this bootstrap will
    /// build. Long-lived streams (the health watch, say) use it to end
    /// when the server drains.
    pub fn shutdown_listener(&self) -> ShutdownListener {
        ShutdownListener::new(self.lifecycle.subscribe())
    }

    /// Identifiers registered so far, in registration order.
    pub fn service_names(&self) -> &[&'static str] {
        &self.names
    }

    /// Register a service implementation under its service identifier.
    ///
    /// Each identifier may be registered at most once; a duplicate is a
    /// configuration error regardless of registration order. That the
    /// implementation satisfies its service's contract is guaranteed by
    /// the trait bound.
    pub fn register<S>(&mut self, svc: S) -> Result<(), ConfigError>
    where
        S: Service<http::Request<Body>, Response = http::Response<Body>, Error = Infallible>
            + NamedService
            + Clone
            + Send
            + Sync
            + 'static,
        S::Future: Send + 'static,
    {
        if self.names.contains(&S::NAME) {
            return Err(ConfigError::DuplicateService(S::NAME));
        }
        self.names.push(S::NAME);
        self.routes.add_service(svc);
        Ok(())
    }

    /// Freeze the dispatch table into a ready-to-serve handle.
    ///
    /// Registering a health service is a convention, not a requirement;
    /// building without one only warns.
    pub fn build(self) -> Result<ServerHandle, ConfigError> {
        if self.names.is_empty() {
            return Err(ConfigError::NoServices);
        }
        if !self.names.contains(&HEALTH_SERVICE) {
            warn!("No health service registered; liveness probes will get UNIMPLEMENTED");
        }

        Ok(ServerHandle::new(
            self.routes.routes(),
            self.lifecycle,
            self.names,
            self.max_concurrent_streams,
        ))
    }
}

impl Default for ServerBootstrap {
    fn default() -> Self {
        Self::new()
    }
}
