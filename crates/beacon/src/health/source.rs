//! Source — the capability contract a health status provider satisfies.

use tokio::sync::watch;

use crate::health::status::ServingStatus;

/// Supplies per-service health status to the transport layer.
///
/// The server only transports what a source reports; deciding whether
/// anything is healthy lives entirely with the implementation. The
/// hosting process passes one of these in at wiring time, either the
/// built-in [`StatusRegistry`](crate::health::registry::StatusRegistry)
/// or its own.
pub trait StatusSource: Send + Sync + 'static {
    /// Point-in-time status for `service`. Names the source has never
    /// seen report [`ServingStatus::Unknown`].
    fn current(&self, service: &str) -> ServingStatus;

    /// Push subscription for `service`. The receiver holds the current
    /// status and is notified on every later change. Dropping the
    /// sending side ends the subscription.
    fn subscribe(&self, service: &str) -> watch::Receiver<ServingStatus>;
}
