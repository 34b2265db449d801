//! Sample extraction error types

/// Errors that can occur while extracting samples from a tracker module
#[derive(Debug, thiserror::Error)]
pub enum RipError {
    /// The buffer ended before a field could be read in full
    #[error(
        "Truncated input while reading {context} at offset {offset}: needed {needed} bytes, {available} available"
    )]
    TruncatedInput {
        /// Which field was being read
        context: &'static str,
        /// Byte offset of the read
        offset: usize,
        /// Bytes the field requires
        needed: usize,
        /// Bytes actually left in the buffer
        available: usize,
    },

    /// An instrument header is too small to describe its samples
    #[error("Invalid instrument at index {0}")]
    InvalidInstrument(u16),

    /// IO error while writing an output container
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RipError {
    /// Whether this error means the input ended early
    pub fn is_truncation(&self) -> bool {
        matches!(self, RipError::TruncatedInput { .. })
    }
}
