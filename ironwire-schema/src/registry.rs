//! Schema registry and fluent schema builder.
//!
//! The registry is an append-only arena of [`RecordSchema`]s. Defining a
//! schema validates it, stores it, and returns a [`SchemaHandle`] that the
//! codec uses to look it up. Schemas are never mutated or removed.

use crate::error::SchemaError;
use crate::parser::parse_kind;
use crate::types::{FieldDescriptor, FieldKind, RecordSchema, SchemaHandle};
use crate::validation::validate_schema;
use ironwire_core::{IntegerType, LengthPrefix};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_REGISTRY_ID: AtomicU32 = AtomicU32::new(0);

/// Append-only collection of record schemas.
///
/// Definition requires `&mut self`; once every schema is defined the
/// registry can be shared by reference (or behind an `Arc`) across threads.
#[derive(Debug)]
pub struct SchemaRegistry {
    id: u32,
    schemas: Vec<RecordSchema>,
    name_map: HashMap<String, SchemaHandle>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            schemas: Vec::new(),
            name_map: HashMap::new(),
        }
    }

    /// Defines a new schema from an ordered list of fields.
    ///
    /// # Arguments
    /// * `name` - Record type name, unique within the registry
    /// * `fields` - Fields in wire order
    ///
    /// # Errors
    /// Returns [`SchemaError::InvalidSchema`] if a field name is duplicated,
    /// a record field references a schema not defined in this registry, or
    /// an integer width is unsupported.
    pub fn define_schema(
        &mut self,
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
    ) -> Result<SchemaHandle, SchemaError> {
        let name = name.into();
        validate_schema(self, &name, &fields)?;

        // Sizes past usize are not fixed and saturate as minimums.
        let fixed_size = fields.iter().try_fold(0usize, |acc, field| {
            acc.checked_add(self.kind_fixed_size(&field.kind)?)
        });
        let min_size = fields
            .iter()
            .fold(0usize, |acc, field| acc.saturating_add(self.kind_min_size(&field.kind)));

        let handle = SchemaHandle {
            registry: self.id,
            index: self.schemas.len() as u32,
        };

        tracing::debug!(
            "Defined schema {} as {} ({} fields, fixed size {:?})",
            name,
            handle,
            fields.len(),
            fixed_size
        );

        self.name_map.insert(name.clone(), handle);
        self.schemas.push(RecordSchema::new(name, fields, fixed_size, min_size));
        Ok(handle)
    }

    /// Defines a schema from `(field name, type expression)` pairs.
    ///
    /// Type expressions are resolved with [`parse_kind`].
    ///
    /// # Errors
    /// Returns a parse or lookup error for a bad type expression, or
    /// [`SchemaError::InvalidSchema`] as for [`Self::define_schema`].
    pub fn define_typed(
        &mut self,
        name: impl Into<String>,
        fields: &[(&str, &str)],
    ) -> Result<SchemaHandle, SchemaError> {
        let fields = fields
            .iter()
            .map(|&(field, expr)| Ok(FieldDescriptor::new(field, parse_kind(expr, self)?)))
            .collect::<Result<Vec<_>, SchemaError>>()?;
        self.define_schema(name, fields)
    }

    /// Starts a fluent definition of a schema named `name`.
    pub fn builder(&mut self, name: impl Into<String>) -> SchemaBuilder<'_> {
        SchemaBuilder {
            registry: self,
            name: name.into(),
            fields: Vec::new(),
            error: None,
        }
    }

    /// Looks up a schema by handle.
    #[must_use]
    pub fn get(&self, handle: SchemaHandle) -> Option<&RecordSchema> {
        if handle.registry != self.id {
            return None;
        }
        self.schemas.get(handle.index())
    }

    /// Looks up a schema by handle, failing if it is not from this registry.
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownSchema`] for a foreign or unknown handle.
    pub fn resolve(&self, handle: SchemaHandle) -> Result<&RecordSchema, SchemaError> {
        self.get(handle).ok_or(SchemaError::UnknownSchema { handle })
    }

    /// Returns true if the handle was issued by this registry.
    #[must_use]
    pub fn contains(&self, handle: SchemaHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Returns the handle of the schema with the given name.
    #[must_use]
    pub fn handle_of(&self, name: &str) -> Option<SchemaHandle> {
        self.name_map.get(name).copied()
    }

    /// Looks up a schema by name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<&RecordSchema> {
        self.handle_of(name).and_then(|handle| self.get(handle))
    }

    /// Returns the encoded size of a kind if it never varies.
    #[must_use]
    pub fn kind_fixed_size(&self, kind: &FieldKind) -> Option<usize> {
        match kind {
            FieldKind::Integer(ty) => Some(ty.size()),
            FieldKind::Record(handle) => self.get(*handle)?.fixed_size(),
            FieldKind::String | FieldKind::Sequence(_) => None,
        }
    }

    /// Returns the smallest possible encoded size of a kind.
    ///
    /// Unknown record handles count as zero bytes.
    #[must_use]
    pub fn kind_min_size(&self, kind: &FieldKind) -> usize {
        match kind {
            FieldKind::Integer(ty) => ty.size(),
            FieldKind::Record(handle) => self.get(*handle).map_or(0, RecordSchema::min_size),
            FieldKind::String | FieldKind::Sequence(_) => LengthPrefix::ENCODED_LENGTH,
        }
    }

    /// Returns the number of defined schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schema has been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates over all schemas in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (SchemaHandle, &RecordSchema)> {
        let registry = self.id;
        self.schemas.iter().enumerate().map(move |(index, schema)| {
            (
                SchemaHandle {
                    registry,
                    index: index as u32,
                },
                schema,
            )
        })
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent builder for a single schema definition.
///
/// Errors from type expressions are deferred and reported by [`Self::define`].
///
/// # Example
/// ```ignore
/// let purchase = registry
///     .builder("Purchase")
///     .string("purchase_id")
///     .string("name")
///     .integer("price", IntegerType::U32)
///     .string("date")
///     .define()?;
/// ```
#[derive(Debug)]
pub struct SchemaBuilder<'r> {
    registry: &'r mut SchemaRegistry,
    name: String,
    fields: Vec<FieldDescriptor>,
    error: Option<SchemaError>,
}

impl SchemaBuilder<'_> {
    /// Appends a field of the given kind.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor::new(name, kind));
        self
    }

    /// Appends an integer field.
    #[must_use]
    pub fn integer(self, name: impl Into<String>, ty: IntegerType) -> Self {
        self.field(name, FieldKind::Integer(ty))
    }

    /// Appends a string field.
    #[must_use]
    pub fn string(self, name: impl Into<String>) -> Self {
        self.field(name, FieldKind::String)
    }

    /// Appends a nested record field.
    #[must_use]
    pub fn record(self, name: impl Into<String>, handle: SchemaHandle) -> Self {
        self.field(name, FieldKind::Record(handle))
    }

    /// Appends a sequence field.
    #[must_use]
    pub fn sequence(self, name: impl Into<String>, inner: FieldKind) -> Self {
        self.field(name, FieldKind::sequence(inner))
    }

    /// Appends a field described by a type expression such as `Vec<Purchase>`.
    #[must_use]
    pub fn typed(mut self, name: impl Into<String>, expr: &str) -> Self {
        if self.error.is_none() {
            match parse_kind(expr, self.registry) {
                Ok(kind) => return self.field(name, kind),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Validates and registers the schema.
    ///
    /// # Errors
    /// Returns the first deferred type expression error, or any error from
    /// [`SchemaRegistry::define_schema`].
    pub fn define(self) -> Result<SchemaHandle, SchemaError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.registry.define_schema(self.name, self.fields)
    }
}
