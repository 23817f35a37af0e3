use std::fs;
use std::path::PathBuf;
use anyhow::{bail, Context};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ddj_texture::ddj::{self, Unwrapped};

/// Strip the DDJ container from a texture, leaving the DDS stream inside.
#[derive(Parser, Debug)]
struct Args {
    input: PathBuf,
    /// Defaults to the input path with a `.dds` extension.
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let (header, payload) = match ddj::unwrap(&data)? {
        Unwrapped::Container { header, payload } => (header, payload),
        Unwrapped::Raw(_) => bail!("{} is not a DDJ file", args.input.display()),
    };
    if !header.matches_payload(payload.len()) {
        info!("writing all {} bytes after the header", payload.len());
    }

    let output = match args.output {
        Some(path) => path,
        None => args.input.with_extension("dds"),
    };
    fs::write(&output, payload)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("{} -> {} ({} bytes)", args.input.display(), output.display(), payload.len());

    Ok(())
}
