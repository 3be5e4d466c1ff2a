use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use exr_ldr_rs::image_pipeline::{
    ConversionSettings, ExrFile, ExrToLdrPipeline, ExrsReader, TiffCompression, TiffLayerSink,
    classify,
};
use exr_ldr_rs::logger;

#[derive(Parser)]
#[command(name = "exr_ldr_rs")]
#[command(author, version, about = "Convert multi-layer EXR files into 8-bit TIFF layers")]
struct Cli {
    /// Input EXR file
    input: PathBuf,

    /// Directory receiving one TIFF per layer
    #[arg(short, long, default_value = "layers")]
    output: PathBuf,

    /// TIFF compression
    #[arg(short, long, value_enum, default_value_t = Compression::None)]
    compression: Compression,

    /// Display gamma (accepted, not applied)
    #[arg(long, default_value_t = 2.2)]
    gamma: f32,

    /// Exposure in stops (accepted, not applied)
    #[arg(long, default_value_t = 0.0)]
    exposure: f32,

    /// Knee low (accepted, not applied)
    #[arg(long, default_value_t = 0.0)]
    knee_low: f32,

    /// Knee high (accepted, not applied)
    #[arg(long, default_value_t = 5.0)]
    knee_high: f32,

    /// Defog (accepted, not applied)
    #[arg(long, default_value_t = 0.0)]
    defog: f32,

    /// Skip the zero-size check
    #[arg(long)]
    no_validate: bool,

    /// Only list layers, channels and detected layouts
    #[arg(short, long)]
    list: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Compression {
    None,
    Lzw,
    DeflateFast,
    DeflateBalanced,
    DeflateBest,
}

impl From<Compression> for TiffCompression {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::None => TiffCompression::None,
            Compression::Lzw => TiffCompression::Lzw,
            Compression::DeflateFast => TiffCompression::DeflateFast,
            Compression::DeflateBalanced => TiffCompression::DeflateBalanced,
            Compression::DeflateBest => TiffCompression::DeflateBest,
        }
    }
}

fn list_layers(file: &ExrFile) {
    println!("{} ({}x{})", file.path().display(), file.width(), file.height());
    for layer in file.layers() {
        let name = if layer.is_default() { "<default>" } else { layer.name() };
        let channels: Vec<&str> = layer.channel_names().collect();
        println!("  {:<24} {:<10} [{}]", name, classify(layer).to_string(), channels.join(", "));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let settings = ConversionSettings::builder()
        .gamma(cli.gamma)
        .exposure(cli.exposure)
        .knee_low(cli.knee_low)
        .knee_high(cli.knee_high)
        .defog(cli.defog)
        .validate_dimensions(!cli.no_validate)
        .build();

    let mut file = ExrFile::new(&cli.input);
    file.load(&ExrsReader)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    if cli.list {
        list_layers(&file);
        return Ok(());
    }

    let sink = TiffLayerSink::new(&cli.output).with_compression(cli.compression.into());
    let pipeline = ExrToLdrPipeline::with_custom(ExrsReader, sink, settings);

    info!("EXR to LDR pipeline initialized");
    info!("Compression: {:?}", TiffCompression::from(cli.compression));
    info!("Output directory: {}", pipeline.sink().directory().display());

    match pipeline.convert(&file) {
        Ok(canvas) => {
            for path in &canvas.written {
                info!("Wrote {}", path.display());
            }
            info!("Conversion successful!");
            Ok(())
        }
        Err(e) => {
            error!("Conversion failed: {}", e);
            Err(e).context("conversion failed")
        }
    }
}
