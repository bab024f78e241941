//! Route — Health gRPC handler.
//!
//! Transports externally supplied status; this module never decides
//! whether anything is healthy.

use std::pin::Pin;
use std::sync::Arc;
use tokio_stream::Stream;
use tonic::{Request, Response, Status};

use crate::health::map;
use crate::health::source::StatusSource;
use crate::proto::{health_server::Health, HealthCheckRequest, HealthCheckResponse};
use crate::runtime::handle::ShutdownListener;

/// Implementation of the Health gRPC service.
/// Answers point queries and streams status changes per service name.
pub struct HealthServiceImpl {
    source: Arc<dyn StatusSource>,
    shutdown: ShutdownListener,
}

impl HealthServiceImpl {
    pub fn new(source: Arc<dyn StatusSource>, shutdown: ShutdownListener) -> Self {
        Self { source, shutdown }
    }
}

#[tonic::async_trait]
impl Health for HealthServiceImpl {
    async fn check(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<HealthCheckResponse>, Status> {
        let service = request.into_inner().service;
        let status = self.source.current(&service);

        Ok(Response::new(HealthCheckResponse {
            status: map::to_proto(status) as i32,
        }))
    }

    type WatchStream = Pin<Box<dyn Stream<Item = Result<HealthCheckResponse, Status>> + Send>>;

    async fn watch(
        &self,
        request: Request<HealthCheckRequest>,
    ) -> Result<Response<Self::WatchStream>, Status> {
        let service = request.into_inner().service;
        let mut statuses = self.source.subscribe(&service);
        let mut shutdown = self.shutdown.clone();

        let stream = async_stream::stream! {
            loop {
                // Current value first, then one item per change.
                let status = *statuses.borrow_and_update();
                yield Ok(HealthCheckResponse {
                    status: map::to_proto(status) as i32,
                });

                tokio::select! {
                    changed = statuses.changed() => {
                        // Source dropped the channel: nothing further to report.
                        if changed.is_err() {
                            break;
                        }
                    }
                    // Ending here is what lets a graceful drain finish
                    // with watch streams open.
                    _ = shutdown.draining() => break,
                }
            }
        };

        Ok(Response::new(Box::pin(stream)))
    }
}
