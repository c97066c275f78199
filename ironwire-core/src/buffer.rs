//! Growable writer and bounded read cursor for the wire format.
//!
//! This module provides:
//! - [`WireWriter`] for appending little-endian primitives to a growable buffer
//! - [`WireReader`] for bounds-checked positional reads over a byte slice
//!
//! All multi-byte values use little-endian byte order.

use crate::error::{Error, Result};
use crate::types::IntegerType;
use bytes::Bytes;

/// Growable output buffer with little-endian primitive writes.
///
/// Writes always append; there is no padding or alignment between values.
#[derive(Debug, Clone, Default)]
pub struct WireWriter {
    buffer: Vec<u8>,
}

impl WireWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty writer with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Number of bytes to reserve
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Wraps an existing buffer; new writes are appended after its contents.
    #[must_use]
    pub fn from_vec(buffer: Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the written bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Reserves room for at least `additional` more bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.buffer.reserve(additional);
    }

    /// Discards everything written after `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    /// Writes a u8 and advances.
    #[inline(always)]
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Writes a u16 in little-endian and advances.
    #[inline(always)]
    pub fn write_u16_le(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u32 in little-endian and advances.
    #[inline(always)]
    pub fn write_u32_le(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u64 in little-endian and advances.
    #[inline(always)]
    pub fn write_u64_le(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u128 in little-endian and advances.
    #[inline(always)]
    pub fn write_u128_le(&mut self, value: u128) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes the low `ty.size()` bytes of `bits` in little-endian.
    ///
    /// `bits` is the two's-complement bit pattern of the value; callers are
    /// responsible for checking that the value fits `ty` beforehand.
    ///
    /// # Arguments
    /// * `ty` - Integer width and signedness
    /// * `bits` - Value reinterpreted as `u128`
    #[inline]
    pub fn write_integer(&mut self, ty: IntegerType, bits: u128) {
        debug_assert!(ty.is_supported(), "unsupported integer width {ty}");
        let bytes = bits.to_le_bytes();
        self.buffer.extend_from_slice(&bytes[..ty.size()]);
    }

    /// Writes raw bytes and advances.
    #[inline(always)]
    pub fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Consumes the writer and returns the buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.buffer
    }

    /// Consumes the writer and returns an immutable, cheaply clonable buffer.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        Bytes::from(self.buffer)
    }
}

impl AsRef<[u8]> for WireWriter {
    fn as_ref(&self) -> &[u8] {
        &self.buffer
    }
}

/// Bounds-checked read cursor over a byte slice.
///
/// The cursor only moves forward. Every read either consumes exactly the
/// bytes it decodes or fails with [`Error::Truncated`] without moving.
#[derive(Debug, Clone, Copy)]
pub struct WireReader<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> WireReader<'a> {
    /// Creates a reader positioned at the start of `buffer`.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Returns the current read position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns true if every byte has been consumed.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Consumes `len` bytes and returns them.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than `len` bytes remain.
    #[inline]
    pub fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(Error::Truncated {
                offset: self.position,
                needed: len,
                available,
            });
        }
        let start = self.position;
        self.position += len;
        Ok(&self.buffer[start..self.position])
    }

    /// Consumes exactly `N` bytes into an array.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than `N` bytes remain.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads a u8.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] at end of input.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_array::<1>().map(|b| b[0])
    }

    /// Reads a little-endian u16.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than 2 bytes remain.
    #[inline]
    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Reads a little-endian u32.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than 4 bytes remain.
    #[inline]
    pub fn read_u32_le(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Reads a little-endian u64.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than 8 bytes remain.
    #[inline]
    pub fn read_u64_le(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Reads a little-endian u128.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than 16 bytes remain.
    #[inline]
    pub fn read_u128_le(&mut self) -> Result<u128> {
        self.read_array().map(u128::from_le_bytes)
    }

    /// Reads a fixed-width integer and returns its zero-extended bits.
    ///
    /// Use [`IntegerType::sign_extend`] to recover a signed value.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than `ty.size()` bytes remain.
    #[inline]
    pub fn read_integer(&mut self, ty: IntegerType) -> Result<u128> {
        debug_assert!(ty.is_supported(), "unsupported integer width {ty}");
        let bytes = self.take(ty.size())?;
        let mut raw = [0u8; 16];
        raw[..bytes.len()].copy_from_slice(bytes);
        Ok(u128::from_le_bytes(raw))
    }

    /// Consumes `len` bytes and validates them as UTF-8.
    ///
    /// # Errors
    /// Returns [`Error::Truncated`] if fewer than `len` bytes remain, or
    /// [`Error::InvalidUtf8`] with the offset of the first invalid byte. The
    /// cursor does not move on error.
    pub fn read_str(&mut self, len: usize) -> Result<&'a str> {
        let start = self.position;
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes).map_err(|e| {
            self.position = start;
            Error::InvalidUtf8 {
                offset: start + e.valid_up_to(),
            }
        })
    }
}
