fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Point prost at a vendored protoc binary when none is on PATH, so the
    // build works in environments without a system protobuf-compiler.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }

    // Compile the protobuf file into Rust code
    tonic_prost_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(&["proto/health.proto"], &["proto"])?;

    Ok(())
}
