//! # IronWire Codec
//!
//! Schema-driven serialize and deserialize for IronWire records.
//!
//! This crate provides:
//! - [`Value`] and [`RecordValue`], the dynamic form of a record
//! - [`Codec`], bound to a [`SchemaRegistry`] and a [`CodecConfig`]
//! - Free functions for one-off calls with the default configuration
//! - [`ToRecord`] / [`FromRecord`] for typed structs
//!
//! ## Wire format
//!
//! | Field kind | Encoding |
//! |------------|----------|
//! | integer    | `W/8` bytes, little-endian two's complement |
//! | string     | `u32` LE byte length, then UTF-8 bytes |
//! | record     | its fields in schema order, no prefix |
//! | sequence   | `u32` LE element count, then each element |
//!
//! The format is not self-describing: decoding with a schema other than the
//! one used to encode gives wrong values or an error, never a mismatch report.
//!
//! ## Example
//!
//! ```
//! use ironwire_codec::{RecordValue, deserialize, serialize};
//! use ironwire_schema::SchemaRegistry;
//!
//! let mut registry = SchemaRegistry::new();
//! let purchase = registry
//!     .define_typed("Purchase", &[("name", "string"), ("price", "u32")])
//!     .unwrap();
//!
//! let value = RecordValue::new().with("name", "laptop").with("price", 853u32);
//! let bytes = serialize(&registry, purchase, &value).unwrap();
//! assert_eq!(bytes.len(), 4 + 6 + 4);
//! assert_eq!(deserialize(&registry, purchase, &bytes).unwrap(), value);
//! ```

pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod record;
pub mod value;

pub use codec::Codec;
pub use config::{CodecConfig, TrailingBytes};
pub use error::{CodecError, Result};
pub use record::{FromRecord, ToRecord};
pub use value::{FromValue, RecordValue, Value};

use ironwire_schema::{SchemaHandle, SchemaRegistry};

/// Serializes `value` with the default configuration.
///
/// # Errors
/// See [`Codec::serialize`].
pub fn serialize(
    registry: &SchemaRegistry,
    handle: SchemaHandle,
    value: &RecordValue,
) -> Result<Vec<u8>> {
    Codec::new(registry).serialize(handle, value)
}

/// Appends the encoding of `value` to `out`, leaving `out` untouched on error.
///
/// # Errors
/// See [`Codec::serialize_into`].
pub fn serialize_into(
    registry: &SchemaRegistry,
    handle: SchemaHandle,
    value: &RecordValue,
    out: &mut Vec<u8>,
) -> Result<()> {
    Codec::new(registry).serialize_into(handle, value, out)
}

/// Returns the encoded length of `value`.
///
/// # Errors
/// See [`Codec::encoded_len`].
pub fn encoded_len(
    registry: &SchemaRegistry,
    handle: SchemaHandle,
    value: &RecordValue,
) -> Result<usize> {
    Codec::new(registry).encoded_len(handle, value)
}

/// Deserializes a record, ignoring any trailing bytes.
///
/// # Errors
/// See [`Codec::deserialize`].
pub fn deserialize(
    registry: &SchemaRegistry,
    handle: SchemaHandle,
    bytes: &[u8],
) -> Result<RecordValue> {
    Codec::new(registry).deserialize(handle, bytes)
}

/// Deserializes a record that must occupy all of `bytes`.
///
/// # Errors
/// See [`Codec::deserialize`]; leftover input is
/// [`CodecError::TrailingBytes`].
pub fn deserialize_strict(
    registry: &SchemaRegistry,
    handle: SchemaHandle,
    bytes: &[u8],
) -> Result<RecordValue> {
    Codec::with_config(registry, CodecConfig::strict()).deserialize(handle, bytes)
}

/// Deserializes a record from the front of `bytes` and returns how many
/// bytes it used.
///
/// # Errors
/// See [`Codec::deserialize_prefix`].
pub fn deserialize_prefix(
    registry: &SchemaRegistry,
    handle: SchemaHandle,
    bytes: &[u8],
) -> Result<(RecordValue, usize)> {
    Codec::new(registry).deserialize_prefix(handle, bytes)
}
