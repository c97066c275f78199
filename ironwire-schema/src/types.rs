//! Schema type definitions.
//!
//! This module contains the data structures describing a record layout:
//! field kinds, field descriptors and the record schema itself.

use ironwire_core::IntegerType;
use std::collections::HashMap;

/// Identity of a schema registered in a [`SchemaRegistry`](crate::SchemaRegistry).
///
/// Handles are issued by the registry, are never reused, and only resolve
/// against the registry that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaHandle {
    pub(crate) registry: u32,
    pub(crate) index: u32,
}

impl SchemaHandle {
    /// Returns the position of the schema in its registry.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index as usize
    }
}

impl std::fmt::Display for SchemaHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}.{}", self.registry, self.index)
    }
}

/// Kind of a field, which determines its wire encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Fixed-width little-endian integer.
    Integer(IntegerType),
    /// UTF-8 string with a 4-byte byte-length prefix.
    String,
    /// Nested record, encoded inline without a prefix.
    Record(SchemaHandle),
    /// Sequence with a 4-byte element-count prefix.
    Sequence(Box<FieldKind>),
}

impl FieldKind {
    /// Creates a sequence of `inner`.
    #[must_use]
    pub fn sequence(inner: FieldKind) -> Self {
        Self::Sequence(Box::new(inner))
    }

    /// Returns a short description of the kind for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Integer(ty) => ty.name(),
            Self::String => "string".to_string(),
            Self::Record(handle) => format!("record {handle}"),
            Self::Sequence(inner) => format!("Vec<{}>", inner.describe()),
        }
    }

    /// Returns true for kinds whose encoded size never varies.
    ///
    /// Records are fixed-size when all of their fields are; that is resolved
    /// through [`RecordSchema::fixed_size`].
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Integer(_))
    }
}

/// A named, typed field within a record schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Field name, unique within the owning schema.
    pub name: String,
    /// Field kind.
    pub kind: FieldKind,
}

impl FieldDescriptor {
    /// Creates a new field descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Creates an integer field.
    #[must_use]
    pub fn integer(name: impl Into<String>, ty: IntegerType) -> Self {
        Self::new(name, FieldKind::Integer(ty))
    }

    /// Creates a string field.
    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Creates a nested record field.
    #[must_use]
    pub fn record(name: impl Into<String>, handle: SchemaHandle) -> Self {
        Self::new(name, FieldKind::Record(handle))
    }

    /// Creates a sequence field.
    #[must_use]
    pub fn sequence(name: impl Into<String>, inner: FieldKind) -> Self {
        Self::new(name, FieldKind::sequence(inner))
    }
}

/// Immutable description of a record type.
///
/// Fields are kept in declaration order, which is also wire order.
#[derive(Debug, Clone)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldDescriptor>,
    field_map: HashMap<String, usize>,
    fixed_size: Option<usize>,
    min_size: usize,
}

impl RecordSchema {
    /// Builds a schema from already validated parts.
    pub(crate) fn new(
        name: String,
        fields: Vec<FieldDescriptor>,
        fixed_size: Option<usize>,
        min_size: usize,
    ) -> Self {
        let field_map = fields
            .iter()
            .enumerate()
            .map(|(idx, field)| (field.name.clone(), idx))
            .collect();
        Self {
            name,
            fields,
            field_map,
            fixed_size,
            min_size,
        }
    }

    /// Returns the record type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in wire order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.field_map.get(name).map(|&idx| &self.fields[idx])
    }

    /// Returns the wire position of a field.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.field_map.get(name).copied()
    }

    /// Returns true if a field with the given name exists.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.field_map.contains_key(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the encoded size in bytes if every field has a fixed size.
    ///
    /// Strings and sequences make a record variable-size.
    #[must_use]
    pub const fn fixed_size(&self) -> Option<usize> {
        self.fixed_size
    }

    /// Returns the smallest possible encoded size in bytes.
    ///
    /// Strings and sequences count only their length prefix.
    #[must_use]
    pub const fn min_size(&self) -> usize {
        self.min_size
    }
}

impl PartialEq for RecordSchema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fields == other.fields
    }
}

impl Eq for RecordSchema {}
