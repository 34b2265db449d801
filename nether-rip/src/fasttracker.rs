//! FastTracker 2 (XM) sample extraction
//!
//! XM files are little-endian throughout. After the fixed 60-byte preamble,
//! every block carries its own header size, so the decoder follows those
//! sizes rather than assuming fixed offsets:
//!
//! - Module header (size measured from offset 60)
//! - `num_patterns` × pattern header + packed pattern data
//! - `num_instruments` × instrument header, sample headers, sample payloads
//!
//! Sample payloads are stored as deltas from the previous value; they are
//! decoded back to plain signed PCM here.

use crate::cursor::{ByteCursor, DecodeMode};
use crate::error::RipError;
use crate::sample::{Sample, compose_title, read_name};
use crate::{XM_HEADER_SIZE_OFFSET, XM_MAGIC, XM_SAMPLE_HEADER_LEN, XM_TITLE_LEN};

/// XM version this layout describes
const XM_VERSION: u16 = 0x0104;

/// Smallest instrument header that still holds the sample header size field
const MIN_INSTRUMENT_HEADER_LEN: usize = 33;

/// Extract every non-empty sample from an XM image
///
/// A buffer that does not start with `"Extended Module: "` is not an XM file;
/// it yields no samples rather than an error.
///
/// # Errors
/// * [`RipError::TruncatedInput`] if the image ends early in strict mode
/// * [`RipError::InvalidInstrument`] if an instrument header is too small to
///   describe its samples
pub fn parse_fasttracker(data: &[u8], mode: DecodeMode) -> Result<Vec<Sample>, RipError> {
    let mut cursor = ByteCursor::with_mode(data, mode);

    if cursor.take(XM_MAGIC.len()) != XM_MAGIC {
        tracing::warn!("Missing XM magic string, no samples extracted");
        return Ok(Vec::new());
    }

    let module_title = read_name(cursor.read(XM_TITLE_LEN, "module title")?);

    // 0x1A marker and tracker name
    cursor.skip(1 + 20, "tracker name")?;
    let version = cursor.read_u16_le("version")?;
    if version != XM_VERSION {
        tracing::warn!("XM version 0x{:04X}, decoding as 0x{:04X}", version, XM_VERSION);
    }

    let header_size = cursor.read_u32_le("header size")? as usize;
    // Song length, restart position, channel count
    cursor.skip(2 + 2 + 2, "song header")?;
    let num_patterns = cursor.read_u16_le("pattern count")?;
    let num_instruments = cursor.read_u16_le("instrument count")?;
    // Flags, tempo, BPM, pattern order table
    cursor.skip(2 + 2 + 2 + 256, "pattern order table")?;
    cursor.seek_to(XM_HEADER_SIZE_OFFSET + header_size, "module header")?;

    tracing::debug!(
        "'{}': {} patterns, {} instruments, patterns at offset {}",
        module_title,
        num_patterns,
        num_instruments,
        cursor.position()
    );

    for _ in 0..num_patterns {
        skip_pattern(&mut cursor)?;
    }

    if cursor.remaining_len() == 0 {
        // Sample-less XM: everything after the patterns was stripped
        tracing::debug!("No instrument data after {} patterns", num_patterns);
        tracing::info!("Title: {} Samples: 0", module_title);
        return Ok(Vec::new());
    }

    let mut samples = Vec::new();
    for index in 0..num_instruments {
        match read_instrument(&mut cursor, index, &module_title) {
            Ok(instrument_samples) => samples.extend(instrument_samples),
            Err(RipError::InvalidInstrument(index)) if mode == DecodeMode::Lenient => {
                tracing::warn!(
                    "Instrument {} has a malformed header, stopping after {} samples",
                    index,
                    samples.len()
                );
                break;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!("Title: {} Samples: {}", module_title, samples.len());
    Ok(samples)
}

/// Skip one pattern header and its packed note data
fn skip_pattern(cursor: &mut ByteCursor<'_>) -> Result<(), RipError> {
    // The header length includes the length field itself
    let header_start = cursor.position();
    let header_length = cursor.read_u32_le("pattern header length")? as usize;

    // Packing type (1 byte), row count (2 bytes)
    cursor.skip(1 + 2, "pattern header")?;
    let packed_size = usize::from(cursor.read_u16_le("packed pattern size")?);

    cursor.seek_to(header_start + header_length, "pattern header")?;
    cursor.skip(packed_size, "pattern data")
}

/// Sample header fields needed for extraction
struct SampleHeader {
    length: usize,
    loop_start: usize,
    loop_length: usize,
    volume: u8,
    finetune: i8,
    loop_type: u8,
    is_16bit: bool,
}

/// Read one instrument: its header, sample headers, then sample payloads
fn read_instrument(
    cursor: &mut ByteCursor<'_>,
    index: u16,
    module_title: &str,
) -> Result<Vec<Sample>, RipError> {
    let header_start = cursor.position();
    let header_size = cursor.read_u32_le("instrument header size")? as usize;
    let name = read_name(cursor.read(22, "instrument name")?);
    cursor.skip(1, "instrument type")?;
    let num_samples = cursor.read_u16_le("instrument sample count")?;

    if num_samples == 0 {
        cursor.seek_to(header_start + header_size, "instrument header")?;
        return Ok(Vec::new());
    }
    if header_size < MIN_INSTRUMENT_HEADER_LEN {
        return Err(RipError::InvalidInstrument(index));
    }

    let sample_header_size = cursor.read_u32_le("sample header size")? as usize;
    cursor.seek_to(header_start + header_size, "instrument header")?;

    // All headers come before any payload
    let headers = (0..num_samples)
        .map(|_| read_sample_header(cursor, sample_header_size))
        .collect::<Result<Vec<_>, _>>()?;

    let numbered = headers.len() > 1;
    let mut samples = Vec::new();
    for (n, header) in headers.into_iter().enumerate() {
        let stored = cursor.read(header.length, "sample data")?;
        if header.length < 2 {
            continue;
        }

        let title = if numbered {
            compose_title(module_title, &format!("{} #{}", name, n + 1))
        } else {
            compose_title(module_title, &name)
        };
        let (data, bits_per_sample) = if header.is_16bit {
            (decode_delta_16(stored), 16)
        } else {
            (decode_delta_8(stored), 8)
        };
        let loop_length = if header.loop_type == 0 {
            0
        } else {
            header.loop_length
        };

        samples.push(Sample {
            data,
            bits_per_sample,
            volume: header.volume,
            finetune: header.finetune,
            loop_start: header.loop_start,
            loop_length,
            ..Sample::pending(title, header.length)
        });
    }

    Ok(samples)
}

/// Read a sample header
fn read_sample_header(
    cursor: &mut ByteCursor<'_>,
    header_size: usize,
) -> Result<SampleHeader, RipError> {
    let length = cursor.read_u32_le("sample length")? as usize;
    let loop_start = cursor.read_u32_le("sample loop start")? as usize;
    let loop_length = cursor.read_u32_le("sample loop length")? as usize;
    let volume = cursor.read_u8("sample volume")?.min(64);
    let finetune = cursor.read_u8("sample finetune")? as i8;
    let sample_type = cursor.read_u8("sample type")?;
    // Panning, relative note, reserved byte, sample name
    cursor.skip(1 + 1 + 1 + 22, "sample header")?;

    if header_size > XM_SAMPLE_HEADER_LEN {
        cursor.skip(header_size - XM_SAMPLE_HEADER_LEN, "sample header")?;
    }

    Ok(SampleHeader {
        length,
        loop_start,
        loop_length,
        volume,
        finetune,
        loop_type: sample_type & 0x03,
        is_16bit: (sample_type & 0x10) != 0,
    })
}

/// Undo delta encoding of 8-bit sample data
fn decode_delta_8(stored: &[u8]) -> Vec<u8> {
    let mut old = 0i8;
    stored
        .iter()
        .map(|&delta| {
            old = old.wrapping_add(delta as i8);
            old as u8
        })
        .collect()
}

/// Undo delta encoding of 16-bit sample data, producing little-endian bytes.
///
/// A trailing odd byte cannot form a value and is dropped.
fn decode_delta_16(stored: &[u8]) -> Vec<u8> {
    let mut old = 0i16;
    let mut out = Vec::with_capacity(stored.len());
    for pair in stored.chunks_exact(2) {
        old = old.wrapping_add(i16::from_le_bytes([pair[0], pair[1]]));
        out.extend_from_slice(&old.to_le_bytes());
    }
    out
}
