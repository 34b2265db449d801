//! Minimal RIFF/WAVE container for extracted samples
//!
//! Each file is three chunks: `RIFF` + size + `WAVE`, a 16-byte PCM `fmt `
//! block, and `data` + length + raw sample bytes. The format block comes from
//! a [`WavFormat`] preset rather than the module, since tracker samples carry
//! no absolute sample rate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RipError;
use crate::sample::Sample;

/// PCM compression code
const WAVE_FORMAT_PCM: u16 = 1;

/// Size of the format block after its length field
const FMT_BLOCK_LEN: u32 = 16;

/// `"fmt "` + length field + format block
const FORMAT_HEADER_LEN: u32 = 8 + FMT_BLOCK_LEN;

/// PCM parameters written into every `fmt ` chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavFormat {
    /// Channel count
    pub channels: u16,
    /// Samples per second
    pub sample_rate: u32,
    /// Average bytes per second
    pub byte_rate: u32,
    /// Bytes per sample frame
    pub block_align: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
}

impl Default for WavFormat {
    /// The fixed preset every extracted sample has always been written with
    fn default() -> Self {
        Self {
            channels: 1,
            sample_rate: 18042,
            byte_rate: 36084,
            block_align: 2,
            bits_per_sample: 16,
        }
    }
}

impl WavFormat {
    /// Replace the sample rate, keeping the byte rate consistent with it
    ///
    /// Returns `None` if the byte rate would not fit in its 32-bit field.
    pub fn with_sample_rate(self, sample_rate: u32) -> Option<Self> {
        let byte_rate = sample_rate.checked_mul(u32::from(self.block_align))?;
        Some(Self {
            sample_rate,
            byte_rate,
            ..self
        })
    }

    fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(b"fmt ")?;
        out.write_all(&FMT_BLOCK_LEN.to_le_bytes())?;
        out.write_all(&WAVE_FORMAT_PCM.to_le_bytes())?;
        out.write_all(&self.channels.to_le_bytes())?;
        out.write_all(&self.sample_rate.to_le_bytes())?;
        out.write_all(&self.byte_rate.to_le_bytes())?;
        out.write_all(&self.block_align.to_le_bytes())?;
        out.write_all(&self.bits_per_sample.to_le_bytes())
    }
}

/// A sample wrapped in a WAV container, ready to write out
#[derive(Debug, Clone)]
pub struct WavFile<'a> {
    sample: &'a Sample,
    format: WavFormat,
}

impl<'a> WavFile<'a> {
    /// Wrap a sample with the given format preset
    pub fn new(sample: &'a Sample, format: &WavFormat) -> Self {
        Self {
            sample,
            format: *format,
        }
    }

    /// `<title>.wav`
    ///
    /// Path separators in the title are replaced so the file always lands in
    /// the output directory; nothing else is sanitised.
    pub fn file_name(&self) -> String {
        let stem: String = self
            .sample
            .title
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("{}.wav", stem)
    }

    /// Value of the RIFF size field
    ///
    /// Counts the data, the format header, and 8 bytes for the data chunk
    /// header.
    pub fn riff_size(&self) -> u32 {
        self.data_len() + FORMAT_HEADER_LEN + 8
    }

    fn data_len(&self) -> u32 {
        self.sample.data.len() as u32
    }

    /// Serialize all three chunks
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<(), RipError> {
        out.write_all(b"RIFF")?;
        out.write_all(&self.riff_size().to_le_bytes())?;
        out.write_all(b"WAVE")?;

        self.format.write_to(out)?;

        out.write_all(b"data")?;
        out.write_all(&self.data_len().to_le_bytes())?;
        out.write_all(&self.sample.data)?;
        Ok(())
    }

    /// Serialize into a byte vector
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.sample.data.len() + 44);
        self.write_to(&mut out).expect("writing to a Vec cannot fail");
        out
    }

    /// Write `<title>.wav` into `dir`, replacing any existing file
    ///
    /// Returns the path written.
    pub fn dump(&self, dir: impl AsRef<Path>) -> Result<PathBuf, RipError> {
        let path = dir.as_ref().join(self.file_name());
        let mut out = BufWriter::new(File::create(&path)?);
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(path)
    }
}
