//! DifyASR - Speech recognition adapter CLI
//!
//! Transcribes a recorded audio file through a Dify workflow and prints
//! the wake-gated result.

use anyhow::{Context, Result};
use clap::Parser;
use dify_asr::asr;
use dify_asr::audio::{AudioClip, AudioFormat};
use dify_asr::config::Config;
use dify_asr::engine::AsrPlugin;
use dify_asr::gate::WakeGate;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Audio file to transcribe (wav or mp3)
    audio: PathBuf,

    /// Session identifier for the wake gate
    #[arg(short, long, default_value = "default")]
    session: String,

    /// Path to an alternate config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🎧 DifyASR v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let engine = asr::create_engine(&config)?;
    let plugin = AsrPlugin::new(engine, WakeGate::from_config(&config));

    let format = args
        .audio
        .extension()
        .and_then(|e| e.to_str())
        .map(AudioFormat::from_extension)
        .unwrap_or(AudioFormat::Mp3);
    let data = std::fs::read(&args.audio)
        .with_context(|| format!("Failed to read {}", args.audio.display()))?;
    let clip = AudioClip::new(data, format);

    let recognition = plugin.recognize(&args.session, &clip).await?;

    if recognition.emitted.is_empty() {
        info!("💤 Gate suppressed dispatch for session '{}'", args.session);
    }
    println!("emitted: {}", recognition.emitted);
    if let Some(full) = recognition.full {
        println!("full: {}", full);
    }

    Ok(())
}
