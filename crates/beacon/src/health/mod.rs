//! Health module — status source contract, default registry, gRPC route.

pub mod map;
pub mod registry;
pub mod route;
pub mod source;
pub mod status;

pub use registry::StatusRegistry;
pub use route::HealthServiceImpl;
pub use source::StatusSource;
pub use status::ServingStatus;

/// Fully-qualified identifier the health service is dispatched under.
pub const HEALTH_SERVICE: &str = "beacon.health.Health";
