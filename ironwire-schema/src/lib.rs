//! # IronWire Schema
//!
//! Schema model for IronWire record encoding.
//!
//! This crate provides:
//! - Field kinds and descriptors describing a record layout
//! - An append-only [`SchemaRegistry`] issuing immutable [`SchemaHandle`]s
//! - Construction-time validation (unique names, supported widths, no
//!   forward or cyclic record references)
//! - A parser for Borsh-style type expressions such as `Vec<Purchase>`

pub mod error;
pub mod parser;
pub mod registry;
pub mod types;
pub mod validation;

pub use error::{SchemaError, SchemaViolation};
pub use parser::parse_kind;
pub use registry::{SchemaBuilder, SchemaRegistry};
pub use types::{FieldDescriptor, FieldKind, RecordSchema, SchemaHandle};
pub use validation::validate_schema;

pub use ironwire_core::IntegerType;
