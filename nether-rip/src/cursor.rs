//! Forward-only reader over an in-memory module image

use crate::endian::{big_endian_u16, little_endian_u16, little_endian_u32};
use crate::error::RipError;

/// How a decoder reacts when the buffer runs out mid-field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Short reads fail with [`RipError::TruncatedInput`]
    #[default]
    Strict,
    /// Short reads return whatever bytes remain, possibly none.
    ///
    /// Integer fields read past the end decode as zero. Damaged files then
    /// produce short or empty samples instead of an error.
    Lenient,
}

/// A forward-only cursor over a borrowed byte buffer
///
/// One cursor serves exactly one decode operation.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
    mode: DecodeMode,
}

impl<'a> ByteCursor<'a> {
    /// Create a strict cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_mode(data, DecodeMode::Strict)
    }

    /// Create a cursor at the start of `data` with an explicit mode
    pub fn with_mode(data: &'a [u8], mode: DecodeMode) -> Self {
        Self {
            data,
            position: 0,
            mode,
        }
    }

    /// Current read offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Decode mode this cursor was created with
    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Bytes left unread
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.position
    }

    /// Returns the next `n` bytes and advances past them.
    ///
    /// Never fails: if fewer than `n` bytes remain, all remaining bytes are
    /// returned and the cursor ends up at the end of the buffer.
    pub fn take(&mut self, n: usize) -> &'a [u8] {
        let end = self.position.saturating_add(n).min(self.data.len());
        let slice = &self.data[self.position..end];
        self.position = end;
        slice
    }

    /// Read a field of `n` bytes, honouring the decode mode.
    ///
    /// In strict mode a short read leaves the position untouched and returns
    /// [`RipError::TruncatedInput`].
    pub fn read(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], RipError> {
        let available = self.remaining_len();
        if available < n && self.mode == DecodeMode::Strict {
            return Err(RipError::TruncatedInput {
                context,
                offset: self.position,
                needed: n,
                available,
            });
        }
        Ok(self.take(n))
    }

    /// Skip `n` bytes, honouring the decode mode
    pub fn skip(&mut self, n: usize, context: &'static str) -> Result<(), RipError> {
        self.read(n, context).map(|_| ())
    }

    /// Move to an absolute offset at or after the current position.
    ///
    /// Used where a format stores header sizes rather than fixed layouts.
    pub fn seek_to(&mut self, offset: usize, context: &'static str) -> Result<(), RipError> {
        if offset < self.position {
            // Header sizes smaller than the fields already read; stay put
            tracing::warn!(
                "{} points backwards ({} < {}), ignoring",
                context,
                offset,
                self.position
            );
            return Ok(());
        }
        self.skip(offset - self.position, context)
    }

    /// Read a single byte
    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, RipError> {
        Ok(self.read(1, context)?.first().copied().unwrap_or(0))
    }

    /// Read a big-endian u16
    pub fn read_u16_be(&mut self, context: &'static str) -> Result<u16, RipError> {
        Ok(big_endian_u16(self.read(2, context)?))
    }

    /// Read a little-endian u16
    pub fn read_u16_le(&mut self, context: &'static str) -> Result<u16, RipError> {
        Ok(little_endian_u16(self.read(2, context)?))
    }

    /// Read a little-endian u32
    pub fn read_u32_le(&mut self, context: &'static str) -> Result<u32, RipError> {
        Ok(little_endian_u32(self.read(4, context)?))
    }
}
