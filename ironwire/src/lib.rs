//! # IronWire
//!
//! Schema-driven, Borsh-style binary encoding for Rust.
//!
//! IronWire serializes a structured record into a compact byte buffer and
//! back, following a schema registered at runtime. There is no header, tag
//! or padding on the wire: integers are fixed-width little-endian, strings
//! and sequences carry a 4-byte length prefix, nested records are inlined.
//!
//! ## Features
//!
//! - **Explicit schemas** - Records are described by immutable schemas held in
//!   a registry and addressed by handle
//! - **Validated up front** - Values are checked against the schema before a
//!   single byte is written, with field paths like `purchases[1].price`
//! - **Hostile-input safe** - Decoding is bounds-checked and never allocates
//!   more than the input can justify
//! - **Typed bridge** - [`ToRecord`] / [`FromRecord`] map Rust structs to records
//!
//! ## Quick Start
//!
//! ```
//! use ironwire::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = SchemaRegistry::new();
//! let purchase = registry
//!     .builder("Purchase")
//!     .string("purchase_id")
//!     .string("name")
//!     .integer("price", IntegerType::U32)
//!     .string("date")
//!     .define()?;
//!
//! let value = RecordValue::new()
//!     .with("purchase_id", "ord-zzz987")
//!     .with("name", "laptop")
//!     .with("price", 853u32)
//!     .with("date", "2022-01-25T02:20:42.832Z");
//!
//! let codec = Codec::new(&registry);
//! let bytes = codec.serialize(purchase, &value)?;
//! assert_eq!(bytes.len(), 56);
//! assert_eq!(codec.deserialize(purchase, &bytes)?, value);
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Wire writer and reader, length prefixes, integer types
//! - [`schema`] - Schema model, registry, validation and type expressions
//! - [`codec`] - Serialize and deserialize engine

pub mod prelude;

/// Wire-level primitives.
pub mod core {
    pub use ironwire_core::*;
}

/// Schema model and registry.
pub mod schema {
    pub use ironwire_schema::*;
}

/// Serialize and deserialize engine.
pub mod codec {
    pub use ironwire_codec::*;
}

// Re-export commonly used items at the crate root
pub use ironwire_codec::{
    Codec, CodecConfig, CodecError, FromRecord, RecordValue, ToRecord, TrailingBytes, Value,
    deserialize, deserialize_prefix, deserialize_strict, encoded_len, serialize, serialize_into,
};
pub use ironwire_core::IntegerType;
pub use ironwire_schema::{FieldDescriptor, FieldKind, SchemaError, SchemaHandle, SchemaRegistry};
