//! Error types for schema definition and lookup.

use crate::types::SchemaHandle;
use thiserror::Error;

/// Reason a schema definition was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaViolation {
    /// The schema name is empty.
    #[error("schema name is empty")]
    EmptySchemaName,

    /// A schema with this name is already registered.
    #[error("a schema with this name is already defined")]
    DuplicateSchemaName,

    /// A field name is empty.
    #[error("field #{index} has an empty name")]
    EmptyFieldName {
        /// Position of the field in declaration order.
        index: usize,
    },

    /// Two fields share a name.
    #[error("duplicate field '{field}'")]
    DuplicateField {
        /// Duplicated field name.
        field: String,
    },

    /// A record field references a schema that is not defined in this registry.
    #[error("field '{field}' references undefined schema {handle}")]
    UnresolvedRecord {
        /// Field holding the reference.
        field: String,
        /// Unresolved handle.
        handle: SchemaHandle,
    },

    /// An integer field declares a width outside 8/16/32/64/128.
    #[error("field '{field}' has unsupported integer width {width_bits}")]
    UnsupportedWidth {
        /// Field holding the integer.
        field: String,
        /// Declared width in bits.
        width_bits: u16,
    },
}

/// Error type for schema operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// The schema definition is invalid.
    #[error("invalid schema '{schema}': {reason}")]
    InvalidSchema {
        /// Name of the rejected schema.
        schema: String,
        /// Why it was rejected.
        reason: SchemaViolation,
    },

    /// A type expression names neither a built-in type nor a defined schema.
    #[error("unknown type '{type_name}'")]
    UnknownType {
        /// Unresolved type name.
        type_name: String,
    },

    /// A handle does not belong to this registry.
    #[error("schema {handle} not found")]
    UnknownSchema {
        /// Handle that failed to resolve.
        handle: SchemaHandle,
    },

    /// A type expression is malformed.
    #[error("cannot parse type expression '{expr}': {message}")]
    Parse {
        /// Offending expression.
        expr: String,
        /// What went wrong.
        message: String,
    },
}

impl SchemaError {
    /// Creates an invalid schema error.
    pub fn invalid(schema: impl Into<String>, reason: SchemaViolation) -> Self {
        Self::InvalidSchema {
            schema: schema.into(),
            reason,
        }
    }

    /// Creates a type expression parse error.
    pub fn parse(expr: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            expr: expr.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_schema_display() {
        let err = SchemaError::invalid(
            "Purchase",
            SchemaViolation::DuplicateField {
                field: "price".to_string(),
            },
        );
        let msg = err.to_string();
        assert!(msg.contains("Purchase"));
        assert!(msg.contains("duplicate field 'price'"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = SchemaError::parse("Vec<u32", "missing '>'");
        assert!(err.to_string().contains("Vec<u32"));
        assert!(err.to_string().contains("missing '>'"));
    }
}
