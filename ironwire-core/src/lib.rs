//! # IronWire Core
//!
//! Wire-level primitives for the IronWire schema-driven binary encoding.
//!
//! This crate provides:
//! - [`WireWriter`] and [`WireReader`] for little-endian appends and
//!   bounds-checked positional reads
//! - [`LengthPrefix`], the 4-byte prefix of strings and sequences
//! - [`IntegerType`] descriptors for fixed-width integers
//! - Error types for wire reads and writes

pub mod buffer;
pub mod error;
pub mod header;
pub mod types;

pub use buffer::{WireReader, WireWriter};
pub use error::{Error, Result};
pub use header::LengthPrefix;
pub use types::{IntegerType, SUPPORTED_WIDTHS};
