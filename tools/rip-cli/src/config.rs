//! modrip.toml config file
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nether_rip::{DecodeMode, WavFormat};
use serde::Deserialize;

/// Settings for one rip run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RipConfig {
    /// Directory the .wav files are written to
    pub output_dir: PathBuf,

    /// Decode truncated modules as far as they go.
    /// Default: false (truncated modules are skipped)
    pub lenient: bool,

    /// Rip files on the rayon thread pool
    pub parallel: bool,

    /// WAV header preset
    pub wav: WavFormat,
}

impl Default for RipConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            lenient: false,
            parallel: false,
            wav: WavFormat::default(),
        }
    }
}

impl RipConfig {
    /// Load config from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse config from a string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid modrip.toml")
    }

    /// Decode mode implied by the `lenient` setting
    pub fn decode_mode(&self) -> DecodeMode {
        if self.lenient {
            DecodeMode::Lenient
        } else {
            DecodeMode::Strict
        }
    }
}
