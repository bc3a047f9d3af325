//! Generates the option-pattern configuration for `examples/short/short.go`.
//!
//! Run with: `cargo run --example short`

use cfgen::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("examples/short/short.go");
    let options = GeneratorOptions::new().package("generated");
    let code = generate_from_file(&path, "Config", &options)?;

    print!("{code}");
    Ok(())
}
