//! modrip - Extract instrument samples from tracker modules
//!
//! Every sample in a ProTracker `.mod` or FastTracker 2 `.xm` file is written
//! as `<module title> - <sample name>.wav`.
//!
//! # Usage
//!
//! ```bash
//! # Rip into the current directory
//! modrip axelf.mod tune.xm
//!
//! # Rip a whole folder into samples/, tolerating damaged files
//! modrip --output-dir samples --lenient --parallel songs/*.mod
//!
//! # Use a config file
//! modrip -c modrip.toml songs/*.xm
//! ```
//!
//! # Config (modrip.toml)
//!
//! ```toml
//! output_dir = "samples"
//! lenient = false
//! parallel = true
//!
//! [wav]
//! sample_rate = 22050
//! byte_rate = 44100
//! ```
//!
//! Flags given on the command line override the config file.

mod config;
mod rip;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use config::RipConfig;

/// modrip - Extract instrument samples from tracker modules
#[derive(Parser)]
#[command(name = "modrip")]
#[command(about = "Extract instrument samples from MOD and XM files as WAV")]
#[command(version)]
struct Cli {
    /// Module files to rip (.mod or .xm)
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Directory the .wav files are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Rip what is present in truncated modules instead of skipping them
    #[arg(long)]
    lenient: bool,

    /// Sample rate written into the WAV header (byte rate follows)
    #[arg(long, value_name = "HZ", value_parser = clap::value_parser!(u32).range(1..))]
    sample_rate: Option<u32>,

    /// Path to a modrip.toml config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rip files in parallel
    #[arg(short = 'j', long)]
    parallel: bool,

    /// Log per-file decoding details
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Load the config file (if any) and layer the command line over it
    fn resolve_config(&self) -> Result<RipConfig> {
        let mut config = match &self.config {
            Some(path) => RipConfig::load(path)?,
            None => RipConfig::default(),
        };

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(rate) = self.sample_rate {
            config.wav = config
                .wav
                .with_sample_rate(rate)
                .with_context(|| format!("Sample rate {} Hz is too high", rate))?;
        }
        config.lenient |= self.lenient;
        config.parallel |= self.parallel;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let config = cli.resolve_config()?;
    rip::execute(&cli.files, &config)?;
    Ok(())
}
