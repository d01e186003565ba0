fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Fall back to a bundled protoc when none is installed
    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    // Compile the proto file for the worker client
    tonic_build::compile_protos("../../proto/worker.proto")?;
    Ok(())
}
