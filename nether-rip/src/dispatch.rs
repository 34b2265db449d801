//! Decoder selection by file extension

use std::fmt;
use std::path::Path;

use crate::cursor::DecodeMode;
use crate::error::RipError;
use crate::fasttracker::parse_fasttracker;
use crate::protracker::parse_protracker;
use crate::sample::Sample;

/// Supported tracker module formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerFormat {
    /// ProTracker and compatible `.mod` files
    ProTracker,
    /// FastTracker 2 `.xm` files
    FastTracker,
}

impl TrackerFormat {
    /// Pick a format from a file extension, ignoring case
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mod" => Some(Self::ProTracker),
            "xm" => Some(Self::FastTracker),
            _ => None,
        }
    }

    /// Pick a format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Run this format's decoder over a module image
    pub fn decode(self, data: &[u8], mode: DecodeMode) -> Result<Vec<Sample>, RipError> {
        match self {
            Self::ProTracker => parse_protracker(data, mode),
            Self::FastTracker => parse_fasttracker(data, mode),
        }
    }
}

impl fmt::Display for TrackerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProTracker => write!(f, "ProTracker"),
            Self::FastTracker => write!(f, "FastTracker 2"),
        }
    }
}

/// Extract samples from a module image, choosing the decoder from `path`
///
/// Unrecognised extensions are not an error: they log a warning and yield no
/// samples, so a batch can carry on with its other files.
pub fn extract_samples(
    path: &Path,
    data: &[u8],
    mode: DecodeMode,
) -> Result<Vec<Sample>, RipError> {
    let Some(format) = TrackerFormat::from_path(path) else {
        tracing::warn!("{}: unknown tracker format, skipping", path.display());
        return Ok(Vec::new());
    };

    tracing::debug!("{}: decoding as {}", path.display(), format);
    format.decode(data, mode)
}
