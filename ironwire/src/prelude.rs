//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```
//! use ironwire::prelude::*;
//! ```

// Wire primitives
pub use ironwire_core::error::{Error as CoreError, Result as CoreResult};
pub use ironwire_core::{IntegerType, LengthPrefix, WireReader, WireWriter};

// Schema model
pub use ironwire_schema::{
    FieldDescriptor, FieldKind, RecordSchema, SchemaBuilder, SchemaError, SchemaHandle,
    SchemaRegistry, parse_kind,
};

// Codec
pub use ironwire_codec::{
    Codec, CodecConfig, CodecError, FromRecord, FromValue, RecordValue, ToRecord, TrailingBytes,
    Value,
};
