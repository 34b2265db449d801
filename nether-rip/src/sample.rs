//! The common sample record produced by every decoder

use crate::TITLE_SEPARATOR;

/// One extracted instrument sound
///
/// `data` is copied out of the module image, so a `Sample` outlives the buffer
/// it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Module title, separator, and the in-file sample name
    pub title: String,
    /// Declared length of the waveform in bytes
    pub length: usize,
    /// Signed PCM bytes.
    ///
    /// Always `length` bytes long, unless the module was decoded leniently
    /// and ended early.
    pub data: Vec<u8>,
    /// Bits per PCM value in `data` (8, or 16 for little-endian XM samples)
    pub bits_per_sample: u8,
    /// Default volume (0..=64)
    pub volume: u8,
    /// Finetune, signed
    pub finetune: i8,
    /// Loop start in bytes
    pub loop_start: usize,
    /// Loop length in bytes; values of 2 or less mean "no loop"
    pub loop_length: usize,
}

impl Sample {
    /// Create a sample with no payload yet.
    ///
    /// Decoders read all metadata before any payload bytes, and fill `data`
    /// in a second pass.
    pub fn pending(title: String, length: usize) -> Self {
        Self {
            title,
            length,
            data: Vec::new(),
            bits_per_sample: 8,
            volume: 64,
            finetune: 0,
            loop_start: 0,
            loop_length: 0,
        }
    }

    /// Whether `data` holds every byte the header declared
    pub fn is_complete(&self) -> bool {
        self.data.len() == self.length
    }

    /// Whether the sample declares a loop
    pub fn has_loop(&self) -> bool {
        self.loop_length > 2
    }
}

/// Turn a fixed-width name field into a string.
///
/// NUL padding is dropped wherever it appears, then trailing spaces.
pub(crate) fn read_name(bytes: &[u8]) -> String {
    let filtered: Vec<u8> = bytes.iter().copied().filter(|&b| b != 0).collect();
    String::from_utf8_lossy(&filtered).trim_end().to_string()
}

/// Build `"<module> - <sample>"`
pub(crate) fn compose_title(module_title: &str, sample_name: &str) -> String {
    format!("{}{}{}", module_title, TITLE_SEPARATOR, sample_name)
}
