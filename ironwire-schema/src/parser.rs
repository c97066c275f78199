//! Type expression parser.
//!
//! Field types can be written as short Borsh-style expressions:
//!
//! ```text
//! u8 u16 u32 u64 u128      unsigned integers
//! i8 i16 i32 i64 i128      signed integers
//! string | String          UTF-8 string
//! Vec<T> | [T]             sequence of T
//! Purchase                 a schema already defined in the registry
//! ```

use crate::error::SchemaError;
use crate::registry::SchemaRegistry;
use crate::types::FieldKind;
use ironwire_core::IntegerType;

/// Parses a type expression into a [`FieldKind`].
///
/// Integer names are accepted for any width so that an unsupported width
/// surfaces as an invalid schema when the field is defined.
///
/// # Arguments
/// * `expr` - Type expression, e.g. `u32` or `Vec<Purchase>`
/// * `registry` - Registry used to resolve record names
///
/// # Errors
/// Returns [`SchemaError::Parse`] for malformed expressions and
/// [`SchemaError::UnknownType`] for names that resolve to nothing.
pub fn parse_kind(expr: &str, registry: &SchemaRegistry) -> Result<FieldKind, SchemaError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::parse(expr, "empty type expression"));
    }

    if let Some(rest) = trimmed.strip_prefix("Vec<") {
        let inner = rest
            .strip_suffix('>')
            .ok_or_else(|| SchemaError::parse(expr, "missing closing '>'"))?;
        return parse_kind(inner, registry).map(FieldKind::sequence);
    }
    if let Some(rest) = trimmed.strip_prefix('[') {
        let inner = rest
            .strip_suffix(']')
            .ok_or_else(|| SchemaError::parse(expr, "missing closing ']'"))?;
        return parse_kind(inner, registry).map(FieldKind::sequence);
    }

    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_alphanumeric() || *c == '_'))
    {
        return Err(SchemaError::parse(
            expr,
            format!("unexpected character '{bad}'"),
        ));
    }

    if matches!(trimmed, "string" | "String") {
        return Ok(FieldKind::String);
    }
    if let Some(ty) = IntegerType::from_name(trimmed) {
        return Ok(FieldKind::Integer(ty));
    }
    registry
        .handle_of(trimmed)
        .map(FieldKind::Record)
        .ok_or_else(|| SchemaError::UnknownType {
            type_name: trimmed.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldDescriptor;

    #[test]
    fn test_parse_primitives() {
        let registry = SchemaRegistry::new();
        assert_eq!(
            parse_kind("u32", &registry).expect("u32"),
            FieldKind::Integer(IntegerType::U32)
        );
        assert_eq!(
            parse_kind(" i128 ", &registry).expect("i128"),
            FieldKind::Integer(IntegerType::I128)
        );
        assert_eq!(parse_kind("string", &registry).expect("string"), FieldKind::String);
        assert_eq!(parse_kind("String", &registry).expect("String"), FieldKind::String);
    }

    #[test]
    fn test_parse_sequences() {
        let registry = SchemaRegistry::new();
        assert_eq!(
            parse_kind("Vec<u8>", &registry).expect("Vec<u8>"),
            FieldKind::sequence(FieldKind::Integer(IntegerType::U8))
        );
        assert_eq!(
            parse_kind("[Vec<string>]", &registry).expect("nested"),
            FieldKind::sequence(FieldKind::sequence(FieldKind::String))
        );
    }

    #[test]
    fn test_parse_record_reference() {
        let mut registry = SchemaRegistry::new();
        let purchase = registry
            .define_schema("Purchase", vec![FieldDescriptor::string("purchase_id")])
            .expect("define");
        assert_eq!(
            parse_kind("Purchase", &registry).expect("record"),
            FieldKind::Record(purchase)
        );
        assert_eq!(
            parse_kind("Vec<Purchase>", &registry).expect("records"),
            FieldKind::sequence(FieldKind::Record(purchase))
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        let registry = SchemaRegistry::new();
        assert_eq!(
            parse_kind("Person", &registry).unwrap_err(),
            SchemaError::UnknownType {
                type_name: "Person".to_string()
            }
        );
    }

    #[test]
    fn test_parse_malformed() {
        let registry = SchemaRegistry::new();
        for expr in ["", "Vec<u32", "[u32", "u32>", "Vec<u32>>", "map<u8, u8>"] {
            assert!(
                matches!(parse_kind(expr, &registry), Err(SchemaError::Parse { .. })),
                "expected parse error for {expr:?}"
            );
        }
    }

    #[test]
    fn test_parse_unsupported_width_is_deferred() {
        let registry = SchemaRegistry::new();
        assert_eq!(
            parse_kind("u24", &registry).expect("u24"),
            FieldKind::Integer(IntegerType::unsigned(24))
        );
    }
}
