//! Fixed-width integer decoding
//!
//! Malformed input (the wrong number of bytes) decodes as zero instead of
//! failing. Callers that care about truncation check lengths through
//! [`crate::ByteCursor::read`] before decoding.

/// Decode a big-endian u16. Returns 0 unless given exactly 2 bytes.
pub fn big_endian_u16(bytes: &[u8]) -> u16 {
    match bytes {
        [hi, lo] => u16::from_be_bytes([*hi, *lo]),
        _ => 0,
    }
}

/// Decode a little-endian u16. Returns 0 unless given exactly 2 bytes.
pub fn little_endian_u16(bytes: &[u8]) -> u16 {
    match bytes {
        [lo, hi] => u16::from_le_bytes([*lo, *hi]),
        _ => 0,
    }
}

/// Decode a little-endian u32. Returns 0 unless given exactly 4 bytes.
pub fn little_endian_u32(bytes: &[u8]) -> u32 {
    bytes
        .try_into()
        .map(u32::from_le_bytes)
        .unwrap_or(0)
}
