//! ProTracker (MOD) sample extraction
//!
//! A 31-instrument MOD is laid out as:
//!
//! | Offset | Size    | Field                                         |
//! |--------|---------|-----------------------------------------------|
//! | 0      | 20      | Module title, NUL padded                      |
//! | 20     | 31 × 30 | Sample slots (name, length, finetune, volume, loop) |
//! | 950    | 1       | Song length                                   |
//! | 951    | 1       | Restart position (unused)                     |
//! | 952    | 128     | Pattern order table                           |
//! | 1080   | 4       | Format tag (`M.K.` etc.)                      |
//! | 1084   | n × 64 rows × channels × 4 | Pattern data                    |
//! | ...    |         | Sample payloads, in slot order                |
//!
//! Every length in a slot is stored in 16-bit words.

use crate::cursor::{ByteCursor, DecodeMode};
use crate::error::RipError;
use crate::sample::{Sample, compose_title, read_name};
use crate::{
    MOD_NOTE_LEN, MOD_ORDER_TABLE_LEN, MOD_PATTERN_ROWS, MOD_SAMPLE_NAME_LEN, MOD_SAMPLE_SLOTS,
    MOD_TITLE_LEN,
};

/// Channel count assumed when the format tag is not recognised
const DEFAULT_CHANNELS: usize = 4;

/// Extract every non-empty sample from a MOD image
///
/// Slots whose length is under 2 bytes are skipped; the rest keep their slot
/// order.
///
/// # Errors
/// * [`RipError::TruncatedInput`] if the image ends early in strict mode
pub fn parse_protracker(data: &[u8], mode: DecodeMode) -> Result<Vec<Sample>, RipError> {
    let mut cursor = ByteCursor::with_mode(data, mode);

    let module_title = read_name(cursor.read(MOD_TITLE_LEN, "module title")?);

    let mut samples = Vec::new();
    for slot in 0..MOD_SAMPLE_SLOTS {
        if let Some(sample) = read_slot(&mut cursor, &module_title)? {
            samples.push(sample);
        } else {
            tracing::trace!("Slot {} is empty", slot + 1);
        }
    }

    let song_length = cursor.read_u8("song length")?;
    // Restart position, only meaningful to players
    cursor.skip(1, "restart position")?;
    let order_table = cursor.read(MOD_ORDER_TABLE_LEN, "pattern order table")?;
    let tag = cursor.read(4, "format tag")?;

    let channels = channels_for_tag(tag).unwrap_or_else(|| {
        tracing::warn!(
            "Unrecognised format tag {:?}, assuming {} channels",
            String::from_utf8_lossy(tag),
            DEFAULT_CHANNELS
        );
        DEFAULT_CHANNELS
    });
    let patterns = pattern_count(order_table, song_length);
    let pattern_bytes = patterns * MOD_PATTERN_ROWS * channels * MOD_NOTE_LEN;

    tracing::debug!(
        "{} patterns of {} channels ({} bytes) before sample data at offset {}",
        patterns,
        channels,
        pattern_bytes,
        cursor.position()
    );
    cursor.skip(pattern_bytes, "pattern data")?;

    for sample in &mut samples {
        sample.data = cursor.read(sample.length, "sample data")?.to_vec();
        if !sample.is_complete() {
            tracing::warn!(
                "Sample '{}' truncated: {} of {} bytes",
                sample.title,
                sample.data.len(),
                sample.length
            );
        }
    }

    tracing::info!("Title: {} Samples: {}", module_title, samples.len());
    Ok(samples)
}

/// Read one 30-byte sample slot, returning `None` for empty slots
fn read_slot(cursor: &mut ByteCursor<'_>, module_title: &str) -> Result<Option<Sample>, RipError> {
    let name = read_name(cursor.read(MOD_SAMPLE_NAME_LEN, "sample name")?);
    let title = compose_title(module_title, &name);

    let length = usize::from(cursor.read_u16_be("sample length")?) * 2;
    let finetune = finetune_from_nibble(cursor.read_u8("finetune")?);
    let volume = cursor.read_u8("volume")?.min(64);
    let loop_start = usize::from(cursor.read_u16_be("repeat start")?) * 2;
    let loop_length = usize::from(cursor.read_u16_be("repeat length")?) * 2;

    if length < 2 {
        return Ok(None);
    }

    Ok(Some(Sample {
        volume,
        finetune,
        loop_start,
        loop_length,
        ..Sample::pending(title, length)
    }))
}

/// Number of patterns stored in the file
///
/// Only the first `song_length` order entries are played, and pattern numbers
/// are zero-based, so the count is the highest referenced number plus one. An
/// empty song still stores pattern 0.
pub fn pattern_count(order_table: &[u8], song_length: u8) -> usize {
    let played = usize::from(song_length).min(order_table.len());
    let highest = order_table[..played].iter().copied().max().unwrap_or(0);
    usize::from(highest) + 1
}

/// Channel count implied by the 4-byte format tag at offset 1080
pub fn channels_for_tag(tag: &[u8]) -> Option<usize> {
    match tag {
        b"M.K." | b"M!K!" | b"FLT4" => Some(4),
        b"OCTA" | b"CD81" => Some(8),
        [n, b'C', b'H', b'N'] if n.is_ascii_digit() && *n != b'0' => Some(usize::from(n - b'0')),
        [hi, lo, b'C', b'H' | b'N'] if hi.is_ascii_digit() && lo.is_ascii_digit() => {
            let channels = usize::from(hi - b'0') * 10 + usize::from(lo - b'0');
            (channels > 0).then_some(channels)
        }
        _ => None,
    }
}

/// MOD finetune is a signed nibble in the low four bits
fn finetune_from_nibble(raw: u8) -> i8 {
    let nibble = (raw & 0x0F) as i8;
    if nibble > 7 { nibble - 16 } else { nibble }
}
