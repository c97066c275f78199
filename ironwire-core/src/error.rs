//! Error types for IronWire core operations.

use thiserror::Error;

/// Core error type for wire-level reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input ended before a read could complete.
    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    Truncated {
        /// Cursor position where the read started.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes remaining in the input.
        available: usize,
    },

    /// String bytes are not valid UTF-8.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid byte.
        offset: usize,
    },

    /// A length does not fit the 4-byte length prefix.
    #[error("length {length} does not fit a u32 length prefix")]
    LengthOverflow {
        /// Offending length.
        length: usize,
    },
}

/// Result type alias for IronWire core operations.
pub type Result<T> = std::result::Result<T, Error>;
