//! Batch ripping: read each module, decode it, dump its samples

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nether_rip::{WavFile, extract_samples};
use rayon::prelude::*;

use crate::config::RipConfig;

/// What happened to one input file
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FileReport {
    /// WAV files written
    pub written: usize,
    /// Samples whose WAV could not be written
    pub failed: usize,
    /// The module could not be decoded
    pub malformed: bool,
}

/// Totals over a whole run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RipSummary {
    /// Input files processed
    pub files: usize,
    /// WAV files written across all inputs
    pub written: usize,
    /// Samples whose WAV could not be written
    pub failed: usize,
    /// Input files that could not be decoded
    pub malformed: usize,
}

impl RipSummary {
    fn add(mut self, report: FileReport) -> Self {
        self.files += 1;
        self.written += report.written;
        self.failed += report.failed;
        self.malformed += usize::from(report.malformed);
        self
    }
}

/// Rip every file in order (or on the rayon pool with `parallel`)
///
/// An unreadable input file aborts the run. Malformed modules and failed
/// WAV writes are logged and counted.
pub fn execute(files: &[PathBuf], config: &RipConfig) -> Result<RipSummary> {
    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    let reports: Result<Vec<FileReport>> = if config.parallel {
        files.par_iter().map(|path| rip_file(path, config)).collect()
    } else {
        files.iter().map(|path| rip_file(path, config)).collect()
    };

    let summary = reports?
        .into_iter()
        .fold(RipSummary::default(), RipSummary::add);

    tracing::info!(
        "Ripped {} samples from {} files ({} malformed, {} write failures)",
        summary.written,
        summary.files,
        summary.malformed,
        summary.failed
    );
    Ok(summary)
}

/// Rip a single module into `config.output_dir`
pub fn rip_file(path: &Path, config: &RipConfig) -> Result<FileReport> {
    let data =
        std::fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;

    let samples = match extract_samples(path, &data, config.decode_mode()) {
        Ok(samples) => samples,
        Err(e) => {
            tracing::error!("{}: {}", path.display(), e);
            return Ok(FileReport {
                malformed: true,
                ..FileReport::default()
            });
        }
    };

    let mut report = FileReport::default();
    for sample in &samples {
        match WavFile::new(sample, &config.wav).dump(&config.output_dir) {
            Ok(written) => {
                tracing::info!("Wrote wav: {}", written.display());
                report.written += 1;
            }
            Err(e) => {
                tracing::error!("Error: {} {}", sample.title, e);
                report.failed += 1;
            }
        }
    }
    Ok(report)
}
