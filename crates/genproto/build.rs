use std::fs;

// The generated sources under src/gen are checked in. Set GENPROTO_REGENERATE=1
// (with protoc on PATH) to rebuild them from ../../proto.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-env-changed=GENPROTO_REGENERATE");

    if std::env::var_os("GENPROTO_REGENERATE").is_none() {
        return Ok(());
    }

    let out_dir = "src/gen";

    fs::create_dir_all(out_dir)?;

    tonic_prost_build::configure()
        .build_server(false)
        .out_dir(out_dir)
        .compile_protos(&["../../proto/authservice.proto"], &["../../proto"])?;

    println!("cargo:rerun-if-changed=../../proto");

    Ok(())
}
