//! Schema validation utilities.
//!
//! Definitions are checked against the registry they are being added to, so
//! a record field can only point at a schema that already exists there. This
//! keeps the schema graph acyclic without any deferred resolution.

use crate::error::{SchemaError, SchemaViolation};
use crate::registry::SchemaRegistry;
use crate::types::{FieldDescriptor, FieldKind};
use std::collections::HashSet;

/// Validates a schema definition before it is registered.
///
/// # Arguments
/// * `registry` - Registry the schema will be added to
/// * `name` - Record type name
/// * `fields` - Fields in declaration order
///
/// # Errors
/// Returns [`SchemaError::InvalidSchema`] describing the first violation.
pub fn validate_schema(
    registry: &SchemaRegistry,
    name: &str,
    fields: &[FieldDescriptor],
) -> Result<(), SchemaError> {
    let invalid = |reason| SchemaError::invalid(name, reason);

    if name.is_empty() {
        return Err(invalid(SchemaViolation::EmptySchemaName));
    }
    if registry.handle_of(name).is_some() {
        return Err(invalid(SchemaViolation::DuplicateSchemaName));
    }

    let mut seen_names = HashSet::new();
    for (index, field) in fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(invalid(SchemaViolation::EmptyFieldName { index }));
        }
        if !seen_names.insert(field.name.as_str()) {
            return Err(invalid(SchemaViolation::DuplicateField {
                field: field.name.clone(),
            }));
        }
        validate_kind(registry, &field.name, &field.kind).map_err(invalid)?;
    }

    Ok(())
}

/// Validates a field kind, descending into sequence element kinds.
fn validate_kind(
    registry: &SchemaRegistry,
    field: &str,
    kind: &FieldKind,
) -> Result<(), SchemaViolation> {
    match kind {
        FieldKind::Integer(ty) if !ty.is_supported() => Err(SchemaViolation::UnsupportedWidth {
            field: field.to_string(),
            width_bits: ty.width_bits,
        }),
        FieldKind::Integer(_) | FieldKind::String => Ok(()),
        FieldKind::Record(handle) if !registry.contains(*handle) => {
            Err(SchemaViolation::UnresolvedRecord {
                field: field.to_string(),
                handle: *handle,
            })
        }
        FieldKind::Record(_) => Ok(()),
        FieldKind::Sequence(inner) => validate_kind(registry, field, inner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwire_core::IntegerType;

    #[test]
    fn test_validate_valid_schema() {
        let registry = SchemaRegistry::new();
        let fields = vec![
            FieldDescriptor::string("purchase_id"),
            FieldDescriptor::integer("price", IntegerType::U32),
        ];
        assert!(validate_schema(&registry, "Purchase", &fields).is_ok());
    }

    #[test]
    fn test_validate_duplicate_field() {
        let registry = SchemaRegistry::new();
        let fields = vec![
            FieldDescriptor::string("name"),
            FieldDescriptor::integer("name", IntegerType::U8),
        ];
        let err = validate_schema(&registry, "Dup", &fields).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidSchema {
                reason: SchemaViolation::DuplicateField { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_validate_unsupported_width_inside_sequence() {
        let registry = SchemaRegistry::new();
        let fields = vec![FieldDescriptor::sequence(
            "samples",
            FieldKind::sequence(FieldKind::Integer(IntegerType::signed(24))),
        )];
        let err = validate_schema(&registry, "Samples", &fields).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidSchema {
                reason: SchemaViolation::UnsupportedWidth { width_bits: 24, .. },
                ..
            }
        ));
    }

    #[test]
    fn test_validate_empty_names() {
        let registry = SchemaRegistry::new();
        let err = validate_schema(&registry, "", &[]).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidSchema {
                reason: SchemaViolation::EmptySchemaName,
                ..
            }
        ));

        let fields = vec![FieldDescriptor::string("")];
        let err = validate_schema(&registry, "Blank", &fields).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidSchema {
                reason: SchemaViolation::EmptyFieldName { index: 0 },
                ..
            }
        ));
    }

    #[test]
    fn test_validate_record_from_other_registry() {
        let mut other = SchemaRegistry::new();
        let foreign = other
            .define_schema("Inner", vec![FieldDescriptor::string("id")])
            .expect("define");

        let registry = SchemaRegistry::new();
        let fields = vec![FieldDescriptor::record("inner", foreign)];
        let err = validate_schema(&registry, "Outer", &fields).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidSchema {
                reason: SchemaViolation::UnresolvedRecord { .. },
                ..
            }
        ));
    }
}
