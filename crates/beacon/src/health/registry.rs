//! Registry — default in-memory status source backed by watch channels.

use dashmap::DashMap;
use tokio::sync::watch;
use tracing::debug;

use crate::health::source::StatusSource;
use crate::health::status::ServingStatus;

/// One watch channel per service name: a single writer per name, any
/// number of subscribers.
#[derive(Default)]
pub struct StatusRegistry {
    channels: DashMap<String, watch::Sender<ServingStatus>>,
}

impl StatusRegistry {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Record `status` for `service`, creating the channel on first use.
    pub fn set_status(&self, service: &str, status: ServingStatus) {
        debug!(service = %service, status = ?status, "Health status updated");
        self.channels
            .entry(service.to_string())
            .or_insert_with(|| watch::channel(ServingStatus::Unknown).0)
            .send_replace(status);
    }

    pub fn set_serving(&self, service: &str) {
        self.set_status(service, ServingStatus::Serving);
    }

    pub fn set_not_serving(&self, service: &str) {
        self.set_status(service, ServingStatus::NotServing);
    }

    /// Forget `service` entirely. Open watch subscriptions for it end,
    /// and later queries answer `Unknown` again.
    pub fn clear(&self, service: &str) {
        self.channels.remove(service);
    }
}

impl StatusSource for StatusRegistry {
    fn current(&self, service: &str) -> ServingStatus {
        self.channels
            .get(service)
            .map(|tx| *tx.borrow())
            .unwrap_or_default()
    }

    fn subscribe(&self, service: &str) -> watch::Receiver<ServingStatus> {
        self.channels
            .entry(service.to_string())
            .or_insert_with(|| watch::channel(ServingStatus::Unknown).0)
            .subscribe()
    }
}
