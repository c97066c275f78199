//! Record encoding.
//!
//! Encoding is two passes over the value. The first checks conformance with
//! the schema and computes the exact encoded length; the second writes bytes.
//! Every caller-visible error is raised by the first pass, so nothing is
//! written for a value that does not conform.

use crate::config::CodecConfig;
use crate::error::{CodecError, Result};
use crate::value::{RecordValue, Value};
use ironwire_core::{LengthPrefix, WireWriter};
use ironwire_schema::{FieldKind, RecordSchema, SchemaRegistry};

/// Checks `value` against `schema` and returns its encoded length.
///
/// # Errors
/// Returns [`CodecError::FieldMissing`], [`CodecError::UnexpectedField`],
/// [`CodecError::TypeMismatch`], [`CodecError::ValueOutOfRange`],
/// [`CodecError::EncodingError`] or [`CodecError::SequenceTooLong`].
pub fn measure_record(
    registry: &SchemaRegistry,
    schema: &RecordSchema,
    value: &RecordValue,
    config: &CodecConfig,
) -> Result<usize> {
    let mut size = 0;
    for field in schema.fields() {
        let field_value = value.get(&field.name).ok_or_else(|| CodecError::FieldMissing {
            path: field.name.clone(),
        })?;
        size += measure_value(registry, &field.kind, field_value, config)
            .map_err(|e| e.at_field(&field.name))?;
    }

    // Every declared field is present, so a longer value has extras.
    if value.len() > schema.len() {
        if let Some((name, _)) = value.iter().find(|(name, _)| !schema.has_field(name)) {
            return Err(CodecError::UnexpectedField {
                path: name.to_string(),
            });
        }
    }

    Ok(size)
}

fn measure_value(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
    config: &CodecConfig,
) -> Result<usize> {
    match (kind, value) {
        (FieldKind::Integer(ty), Value::Int(n)) => {
            if ty.fits_signed(*n) {
                Ok(ty.size())
            } else {
                Err(CodecError::out_of_range(n, ty))
            }
        }
        (FieldKind::Integer(ty), Value::UInt(n)) => {
            if ty.fits_unsigned(*n) {
                Ok(ty.size())
            } else {
                Err(CodecError::out_of_range(n, ty))
            }
        }
        (FieldKind::String, Value::Str(s)) => {
            let prefix = LengthPrefix::from_len(s.len()).map_err(|_| CodecError::EncodingError {
                path: String::new(),
                reason: format!("string of {} bytes exceeds u32 length prefix", s.len()),
            })?;
            Ok(prefix.total_size())
        }
        (FieldKind::Record(handle), Value::Record(record)) => {
            let schema = registry.resolve(*handle)?;
            measure_record(registry, schema, record, config)
        }
        (FieldKind::Sequence(inner), Value::Sequence(items)) => {
            LengthPrefix::from_len(items.len()).map_err(|_| CodecError::EncodingError {
                path: String::new(),
                reason: format!("sequence of {} elements exceeds u32 count prefix", items.len()),
            })?;
            check_sequence_len(items.len(), registry.kind_min_size(inner), config)?;
            items
                .iter()
                .enumerate()
                .try_fold(LengthPrefix::ENCODED_LENGTH, |acc, (i, item)| {
                    let size = measure_value(registry, inner, item, config)
                        .map_err(|e| e.at_index(i))?;
                    Ok(acc + size)
                })
        }
        (kind, other) => Err(CodecError::mismatch(kind.describe(), other.kind_name())),
    }
}

/// Rejects sequences longer than the configured maximum.
///
/// Without a configured maximum, elements that can encode to zero bytes are
/// refused outright: the input length cannot bound how many of them a count
/// claims.
pub(crate) fn check_sequence_len(
    length: usize,
    element_min: usize,
    config: &CodecConfig,
) -> Result<()> {
    match config.max_sequence_len {
        Some(max) if length > max as usize => Err(CodecError::SequenceTooLong { length, max }),
        None if element_min == 0 && length > 0 => {
            Err(CodecError::SequenceTooLong { length, max: 0 })
        }
        _ => Ok(()),
    }
}

/// Writes `value` in schema field order.
///
/// Expects a value already accepted by [`measure_record`].
///
/// # Errors
/// Returns the same errors as [`measure_record`] if the value does not
/// conform; a caller that measured first never sees one.
pub fn write_record(
    registry: &SchemaRegistry,
    schema: &RecordSchema,
    value: &RecordValue,
    writer: &mut WireWriter,
) -> Result<()> {
    for field in schema.fields() {
        let field_value = value.get(&field.name).ok_or_else(|| CodecError::FieldMissing {
            path: field.name.clone(),
        })?;
        tracing::trace!(
            "Writing {}.{} at offset {}",
            schema.name(),
            field.name,
            writer.len()
        );
        write_value(registry, &field.kind, field_value, writer)
            .map_err(|e| e.at_field(&field.name))?;
    }
    Ok(())
}

fn write_value(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    value: &Value,
    writer: &mut WireWriter,
) -> Result<()> {
    match (kind, value) {
        (FieldKind::Integer(ty), Value::Int(n)) => writer.write_integer(*ty, *n as u128),
        (FieldKind::Integer(ty), Value::UInt(n)) => writer.write_integer(*ty, *n),
        (FieldKind::String, Value::Str(s)) => {
            LengthPrefix::from_len(s.len())?.write(writer);
            writer.write_bytes(s.as_bytes());
        }
        (FieldKind::Record(handle), Value::Record(record)) => {
            let schema = registry.resolve(*handle)?;
            write_record(registry, schema, record, writer)?;
        }
        (FieldKind::Sequence(inner), Value::Sequence(items)) => {
            LengthPrefix::from_len(items.len())?.write(writer);
            for (i, item) in items.iter().enumerate() {
                write_value(registry, inner, item, writer).map_err(|e| e.at_index(i))?;
            }
        }
        (kind, other) => {
            return Err(CodecError::mismatch(kind.describe(), other.kind_name()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwire_core::IntegerType;
    use ironwire_schema::SchemaHandle;

    fn registry_with_purchase() -> (SchemaRegistry, SchemaHandle) {
        let mut registry = SchemaRegistry::new();
        let purchase = registry
            .builder("Purchase")
            .string("purchase_id")
            .string("name")
            .integer("price", IntegerType::U32)
            .string("date")
            .define()
            .expect("purchase");
        (registry, purchase)
    }

    fn laptop() -> RecordValue {
        RecordValue::new()
            .with("purchase_id", "ord-zzz987")
            .with("name", "laptop")
            .with("price", 853u32)
            .with("date", "2022-01-25T02:20:42.832Z")
    }

    fn encode(registry: &SchemaRegistry, handle: SchemaHandle, value: &RecordValue) -> Result<Vec<u8>> {
        let schema = registry.resolve(handle)?;
        let config = CodecConfig::default();
        let size = measure_record(registry, schema, value, &config)?;
        let mut writer = WireWriter::with_capacity(size);
        write_record(registry, schema, value, &mut writer)?;
        assert_eq!(writer.len(), size);
        Ok(writer.into_vec())
    }

    #[test]
    fn test_purchase_layout() {
        let (registry, purchase) = registry_with_purchase();
        let bytes = encode(&registry, purchase, &laptop()).expect("encode");

        assert_eq!(bytes.len(), 4 + 10 + 4 + 6 + 4 + 4 + 24);
        assert_eq!(&bytes[..4], &[10, 0, 0, 0]);
        assert_eq!(&bytes[4..14], b"ord-zzz987");
        assert_eq!(&bytes[14..18], &[6, 0, 0, 0]);
        assert_eq!(&bytes[18..24], b"laptop");
        assert_eq!(&bytes[24..28], &853u32.to_le_bytes());
        assert_eq!(&bytes[28..32], &[24, 0, 0, 0]);
        assert_eq!(&bytes[32..], b"2022-01-25T02:20:42.832Z");
    }

    #[test]
    fn test_field_missing() {
        let (registry, purchase) = registry_with_purchase();
        let mut value = laptop();
        value.remove("date");
        assert_eq!(
            encode(&registry, purchase, &value).unwrap_err(),
            CodecError::FieldMissing {
                path: "date".to_string()
            }
        );
    }

    #[test]
    fn test_unexpected_field() {
        let (registry, purchase) = registry_with_purchase();
        let value = laptop().with("discount", 5u8);
        assert_eq!(
            encode(&registry, purchase, &value).unwrap_err(),
            CodecError::UnexpectedField {
                path: "discount".to_string()
            }
        );
    }

    #[test]
    fn test_type_mismatch() {
        let (registry, purchase) = registry_with_purchase();
        let value = laptop().with("name", 42u32);
        let err = encode(&registry, purchase, &value).unwrap_err();
        assert_eq!(
            err,
            CodecError::TypeMismatch {
                path: "name".to_string(),
                expected: "string".to_string(),
                found: "unsigned integer".to_string(),
            }
        );
    }

    #[test]
    fn test_value_out_of_range() {
        let (registry, purchase) = registry_with_purchase();
        for bad in [Value::UInt(1 << 32), Value::Int(-1)] {
            let mut value = laptop();
            value.insert("price", bad);
            let err = encode(&registry, purchase, &value).unwrap_err();
            assert!(
                matches!(err, CodecError::ValueOutOfRange { ref path, ref ty, .. } if path == "price" && ty == "u32"),
                "unexpected error {err:?}"
            );
        }
    }

    #[test]
    fn test_signed_value_into_unsigned_field() {
        let (registry, purchase) = registry_with_purchase();
        let mut value = laptop();
        value.insert("price", Value::Int(853));
        let bytes = encode(&registry, purchase, &value).expect("encode");
        assert_eq!(bytes, encode(&registry, purchase, &laptop()).expect("encode"));
    }

    #[test]
    fn test_signed_twos_complement() {
        let mut registry = SchemaRegistry::new();
        let handle = registry
            .builder("Deltas")
            .integer("a", IntegerType::I8)
            .integer("b", IntegerType::I64)
            .integer("c", IntegerType::I128)
            .define()
            .expect("schema");
        let value = RecordValue::new()
            .with("a", -1i8)
            .with("b", i64::MIN)
            .with("c", -2i128);
        let bytes = encode(&registry, handle, &value).expect("encode");
        assert_eq!(bytes.len(), 1 + 8 + 16);
        assert_eq!(bytes[0], 0xFF);
        assert_eq!(&bytes[1..9], &i64::MIN.to_le_bytes());
        assert_eq!(&bytes[9..], &(-2i128).to_le_bytes());
    }

    #[test]
    fn test_nested_error_path() {
        let (mut registry, purchase) = registry_with_purchase();
        let person = registry
            .builder("Person")
            .string("person_id")
            .sequence("purchases", FieldKind::Record(purchase))
            .define()
            .expect("person");
        let bad = laptop().with("price", Value::Str("free".to_string()));
        let value = RecordValue::new()
            .with("person_id", "usr-abc123")
            .with("purchases", vec![laptop(), bad]);

        let err = encode(&registry, person, &value).unwrap_err();
        assert_eq!(err.path(), Some("purchases[1].price"));
    }

    #[test]
    fn test_zero_size_elements_need_configured_limit() {
        let mut registry = SchemaRegistry::new();
        let unit = registry.builder("Unit").define().expect("unit");
        let handle = registry
            .builder("Units")
            .sequence("items", FieldKind::Record(unit))
            .define()
            .expect("schema");
        let schema = registry.get(handle).expect("schema");
        let one = RecordValue::new().with("items", vec![RecordValue::new()]);

        assert_eq!(
            measure_record(&registry, schema, &one, &CodecConfig::default()).unwrap_err(),
            CodecError::SequenceTooLong { length: 1, max: 0 }
        );
        let empty = RecordValue::new().with("items", Vec::<RecordValue>::new());
        assert_eq!(
            measure_record(&registry, schema, &empty, &CodecConfig::default()).expect("empty"),
            4
        );
        let config = CodecConfig::new().max_sequence_len(8);
        assert_eq!(measure_record(&registry, schema, &one, &config).expect("bounded"), 4);
    }

    #[test]
    fn test_sequence_limit() {
        let mut registry = SchemaRegistry::new();
        let handle = registry
            .builder("Bytes")
            .sequence("data", FieldKind::Integer(IntegerType::U8))
            .define()
            .expect("schema");
        let schema = registry.get(handle).expect("schema");
        let value = RecordValue::new().with("data", vec![1u8, 2, 3]);
        let config = CodecConfig::new().max_sequence_len(2);
        assert_eq!(
            measure_record(&registry, schema, &value, &config).unwrap_err(),
            CodecError::SequenceTooLong { length: 3, max: 2 }
        );
    }
}
