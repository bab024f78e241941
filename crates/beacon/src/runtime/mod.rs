//! Runtime module — server lifecycle: boot, handle, serve, shutdown.

pub mod boot;
pub mod handle;
pub mod serve;
pub mod stop;

pub use handle::{Lifecycle, ServerHandle, ShutdownListener};
