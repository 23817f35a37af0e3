use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ddj_texture::dds::DdsFile;
use ddj_texture::{ddj, dxt};

/// Decode a .ddj or .dds texture to PNG.
#[derive(Parser, Debug)]
struct Args {
    /// Texture to decode, with or without a DDJ container.
    input: PathBuf,
    output: PathBuf,
    /// Write raw RGBA8 pixels instead of PNG.
    #[arg(long)]
    raw: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let data = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let unwrapped = ddj::unwrap(&data)
        .with_context(|| format!("bad container in {}", args.input.display()))?;
    let dds = DdsFile::parse(unwrapped.payload())
        .with_context(|| format!("bad DDS header in {}", args.input.display()))?;
    info!(
        wrapped = unwrapped.header().is_some(),
        format = %dds.header.format,
        width = dds.header.width,
        height = dds.header.height,
        mips = dds.header.mip_count,
        "decoding {}", args.input.display()
    );
    let img = dxt::decode_dds(&dds)
        .with_context(|| format!("failed to decode {}", args.input.display()))?;

    let out_file = BufWriter::new(File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?);
    if args.raw {
        img.write_raw(out_file)?;
    } else {
        img.write_png(out_file)?;
    }
    info!("wrote {}", args.output.display());

    Ok(())
}
