//! Nether-Rip: instrument sample extraction from tracker modules
//!
//! This crate walks the byte layout of ProTracker (`.mod`) and FastTracker 2
//! (`.xm`) files, recovers every embedded instrument sample, and wraps each one
//! in a minimal RIFF/WAVE container so it can be played or archived on its own.
//!
//! # Key Features
//!
//! - **Positional decoding**: tracker formats carry no self-describing chunks,
//!   so both decoders work purely from fixed offsets and length fields
//! - **Strict or lenient**: short reads are reported as
//!   [`RipError::TruncatedInput`] by default, or tolerated with
//!   [`DecodeMode::Lenient`] for damaged files
//! - **Owned output**: every [`Sample`] owns its bytes, so the source buffer can
//!   be dropped as soon as decoding finishes
//!
//! # Usage
//!
//! ```ignore
//! use nether_rip::{DecodeMode, WavFile, WavFormat, extract_samples};
//!
//! let path = std::path::Path::new("song.mod");
//! let data = std::fs::read(path)?;
//! let samples = extract_samples(path, &data, DecodeMode::Strict)?;
//!
//! for sample in &samples {
//!     WavFile::new(sample, &WavFormat::default()).dump(".")?;
//! }
//! ```
//!
//! # Format Reference
//!
//! - <https://github.com/milkytracker/MilkyTracker/blob/master/resources/reference/xm-form.txt>

mod cursor;
mod dispatch;
mod endian;
mod error;
mod fasttracker;
mod protracker;
mod sample;
mod wav;

pub use cursor::{ByteCursor, DecodeMode};
pub use dispatch::{TrackerFormat, extract_samples};
pub use endian::{big_endian_u16, little_endian_u16, little_endian_u32};
pub use error::RipError;
pub use fasttracker::parse_fasttracker;
pub use protracker::{channels_for_tag, parse_protracker, pattern_count};
pub use sample::Sample;
pub use wav::{WavFile, WavFormat};

// =============================================================================
// ProTracker Constants
// =============================================================================

/// Number of sample slots in a 31-instrument ProTracker module
pub const MOD_SAMPLE_SLOTS: usize = 31;

/// Length of the module title field
pub const MOD_TITLE_LEN: usize = 20;

/// Length of the sample name field inside a slot
pub const MOD_SAMPLE_NAME_LEN: usize = 22;

/// Size of one sample metadata slot
pub const MOD_SLOT_LEN: usize = 30;

/// Entries in the pattern order table
pub const MOD_ORDER_TABLE_LEN: usize = 128;

/// Rows in every ProTracker pattern
pub const MOD_PATTERN_ROWS: usize = 64;

/// Bytes per note cell (per row, per channel)
pub const MOD_NOTE_LEN: usize = 4;

/// Separator between the module title and the sample name
pub const TITLE_SEPARATOR: &str = " - ";

// =============================================================================
// FastTracker Constants
// =============================================================================

/// XM format magic string
pub const XM_MAGIC: &[u8; 17] = b"Extended Module: ";

/// Length of the XM module title field
pub const XM_TITLE_LEN: usize = 20;

/// Offset of the header size field, which everything after it is measured from
pub const XM_HEADER_SIZE_OFFSET: usize = 60;

/// Size of one sample header inside an instrument
pub const XM_SAMPLE_HEADER_LEN: usize = 40;

// =============================================================================
// Tests
// =============================================================================
