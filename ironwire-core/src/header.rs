//! Length prefix for variable-size fields.
//!
//! Strings and sequences are preceded by a [`LengthPrefix`]: the string's
//! UTF-8 byte length, or the sequence's element count.

use crate::buffer::{WireReader, WireWriter};
use crate::error::{Error, Result};

/// Length prefix for strings and sequences (4 bytes).
///
/// # Wire Format
/// ```text
/// +0: length (u32, 4 bytes, little-endian)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LengthPrefix {
    /// Byte length (strings) or element count (sequences).
    pub length: u32,
}

impl LengthPrefix {
    /// Encoded length of the prefix in bytes.
    pub const ENCODED_LENGTH: usize = 4;

    /// Creates a new length prefix.
    ///
    /// # Arguments
    /// * `length` - Byte length or element count
    #[must_use]
    pub const fn new(length: u32) -> Self {
        Self { length }
    }

    /// Creates a prefix from an in-memory length.
    ///
    /// # Errors
    /// Returns [`Error::LengthOverflow`] if `length` exceeds `u32::MAX`.
    pub fn from_len(length: usize) -> Result<Self> {
        u32::try_from(length)
            .map(Self::new)
            .map_err(|_| Error::LengthOverflow { length })
    }

    /// Reads a prefix at the reader's cursor and advances past it.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than 4 bytes remain.
    #[inline]
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self> {
        reader.read_u32_le().map(Self::new)
    }

    /// Appends the prefix to the writer.
    #[inline]
    pub fn write(&self, writer: &mut WireWriter) {
        writer.write_u32_le(self.length);
    }

    /// Returns the length as `usize`.
    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.length as usize
    }

    /// Returns the total size of a byte payload with this prefix.
    #[must_use]
    pub const fn total_size(&self) -> usize {
        Self::ENCODED_LENGTH + self.length as usize
    }

    /// Returns true if the length is zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }
}
