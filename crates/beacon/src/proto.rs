//! Generated protobuf / gRPC bindings for the health wire protocol.

// Include the generated protobuf code
tonic::include_proto!("beacon.health");
