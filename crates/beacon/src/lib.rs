// Module structure for the Beacon gRPC server bootstrap.

// Core infrastructure
pub mod conf;
pub mod error;
pub mod proto;

// Domain modules
pub mod bootstrap;
pub mod health;
pub mod runtime;
