//! Handle — the live server: serve, graceful drain, forced stop.

use tokio::net::TcpListener;
use tokio::sync::{watch, Mutex};
use tokio_stream::wrappers::TcpListenerStream;
use tonic::service::Routes;
use tonic::transport::Server;
use tracing::{info, warn};

use crate::error::ServeError;

/// Lifecycle states of a [`ServerHandle`]. Ordered: a handle only moves
/// forward, never back, and `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Lifecycle {
    Constructed,
    Serving,
    Draining,
    Stopped,
}

/// Stop requests only ever escalate: a graceful drain can be upgraded to
/// a forced stop, never the other way round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopMode {
    None,
    Graceful,
    Forced,
}

/// Observer for the server lifecycle, handed to long-lived request
/// streams so they can end instead of holding a drain open.
#[derive(Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<Lifecycle>,
}

impl ShutdownListener {
    pub(crate) fn new(rx: watch::Receiver<Lifecycle>) -> Self {
        Self { rx }
    }

    /// Resolves once the server reaches `Draining` or `Stopped`.
    pub async fn draining(&mut self) {
        // Err means the handle is gone, which counts as shut down too.
        let _ = self.rx.wait_for(|s| *s >= Lifecycle::Draining).await;
    }

    pub fn is_draining(&self) -> bool {
        *self.rx.borrow() >= Lifecycle::Draining
    }
}

/// The single-use serving runtime produced by
/// [`ServerBootstrap::build`](crate::bootstrap::ServerBootstrap::build).
///
/// Owns the frozen dispatch table for its whole lifetime. `serve` blocks
/// the calling task; `stop` and `force_stop` take `&self` and are meant
/// to be called from another task.
#[derive(Debug)]
pub struct ServerHandle {
    routes: Mutex<Option<Routes>>,
    service_names: Vec<&'static str>,
    lifecycle: watch::Sender<Lifecycle>,
    stop: watch::Sender<StopMode>,
    max_concurrent_streams: usize,
}

impl ServerHandle {
    pub(crate) fn new(
        routes: Routes,
        lifecycle: watch::Sender<Lifecycle>,
        service_names: Vec<&'static str>,
        max_concurrent_streams: usize,
    ) -> Self {
        let (stop, _) = watch::channel(StopMode::None);
        Self {
            routes: Mutex::new(Some(routes)),
            service_names,
            lifecycle,
            stop,
            max_concurrent_streams,
        }
    }

    /// Current lifecycle state.
    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.borrow()
    }

    /// Identifiers of the services registered at construction.
    pub fn service_names(&self) -> &[&'static str] {
        &self.service_names
    }

    /// Accept connections on `listener` and dispatch requests until the
    /// handle is stopped. The listener must already be bound; resolving
    /// addresses is the caller's business.
    ///
    /// Requests for identifiers outside the dispatch table fail that one
    /// request with `UNIMPLEMENTED`; they never affect the rest.
    pub async fn serve(&self, listener: TcpListener) -> Result<(), ServeError> {
        let routes = match self.routes.lock().await.take() {
            Some(routes) => routes,
            None => return Err(ServeError::AlreadyServed),
        };

        // A handle stopped before ever serving stays stopped.
        if self.lifecycle() != Lifecycle::Constructed {
            return Err(ServeError::Stopped);
        }

        let local_addr = listener.local_addr().ok();
        self.lifecycle.send_replace(Lifecycle::Serving);

        for name in &self.service_names {
            info!(service = %name, "Service registered");
        }
        if let Some(addr) = local_addr {
            info!("gRPC server listening on: {}", addr);
        }

        let mut graceful_rx = self.stop.subscribe();
        let mut forced_rx = self.stop.subscribe();

        // Completing this future makes tonic stop accepting and drain.
        let drain_signal = async {
            let _ = graceful_rx.wait_for(|m| *m != StopMode::None).await;
            info!("Draining: no new connections, waiting for in-flight requests");
            self.lifecycle.send_replace(Lifecycle::Draining);
        };

        let server = Server::builder()
            .initial_stream_window_size(1 << 20) // 1 MiB
            .concurrency_limit_per_connection(self.max_concurrent_streams)
            .add_routes(routes)
            .serve_with_incoming_shutdown(TcpListenerStream::new(listener), drain_signal);

        let forced = async {
            // Collapse the guard-holding watch `Ref` to a plain bool before
            // any further await, so this future stays `Send`.
            let forced = forced_rx.wait_for(|m| *m == StopMode::Forced).await.is_ok();
            // The sender lives in self for the whole call; if it is
            // somehow gone, never trigger the forced path.
            if !forced {
                std::future::pending::<()>().await;
            }
        };

        let result = tokio::select! {
            res = server => res.map_err(ServeError::Transport),
            _ = forced => {
                warn!("Forced stop: abandoning in-flight requests");
                Ok(())
            }
        };

        self.lifecycle.send_replace(Lifecycle::Stopped);
        info!("Server stopped");
        result
    }

    /// Graceful drain. Stops accepting new connections, lets in-flight
    /// requests finish, and returns once the handle reaches `Stopped`.
    /// On a handle that never served, parks it in `Stopped` directly.
    pub async fn stop(&self) {
        if self.park_if_idle() {
            return;
        }

        self.stop.send_if_modified(|m| {
            if *m == StopMode::None {
                *m = StopMode::Graceful;
                true
            } else {
                false
            }
        });
        self.stopped().await;
    }

    /// Immediate stop. In-flight requests are abandoned. Also usable
    /// mid-drain as the escape hatch when `stop` takes too long.
    pub async fn force_stop(&self) {
        if self.park_if_idle() {
            return;
        }

        self.stop.send_if_modified(|m| {
            if *m != StopMode::Forced {
                *m = StopMode::Forced;
                true
            } else {
                false
            }
        });
        self.stopped().await;
    }

    /// Move `Constructed` straight to `Stopped`. Returns false when a
    /// serve is (or was) running, in which case it has to be signalled.
    fn park_if_idle(&self) -> bool {
        self.lifecycle.send_if_modified(|s| {
            if *s == Lifecycle::Constructed {
                *s = Lifecycle::Stopped;
                true
            } else {
                false
            }
        })
    }

    async fn stopped(&self) {
        let mut rx = self.lifecycle.subscribe();
        let _ = rx.wait_for(|s| *s == Lifecycle::Stopped).await;
    }
}
