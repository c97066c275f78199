//! Record decoding.
//!
//! A single [`WireReader`] cursor is threaded through the recursive walk.
//! After field N is decoded the cursor sits exactly where field N+1 begins;
//! the format has no markers to resynchronize on.

use crate::config::CodecConfig;
use crate::encoder::check_sequence_len;
use crate::error::{CodecError, Result};
use crate::value::{RecordValue, Value};
use ironwire_core::{LengthPrefix, WireReader};
use ironwire_schema::{FieldKind, RecordSchema, SchemaRegistry};

/// Upper bound on elements preallocated for one sequence.
const MAX_PREALLOC: usize = 4096;

/// Decodes one record from the reader's current position.
///
/// # Errors
/// Returns [`CodecError::TruncatedInput`], [`CodecError::InvalidUtf8`] or
/// [`CodecError::SequenceTooLong`].
pub fn read_record(
    registry: &SchemaRegistry,
    schema: &RecordSchema,
    reader: &mut WireReader<'_>,
    config: &CodecConfig,
) -> Result<RecordValue> {
    let mut record = RecordValue::new();
    for field in schema.fields() {
        tracing::trace!(
            "Reading {}.{} at offset {}",
            schema.name(),
            field.name,
            reader.position()
        );
        let value = read_value(registry, &field.kind, reader, config)?;
        record.insert(field.name.clone(), value);
    }
    Ok(record)
}

fn read_value(
    registry: &SchemaRegistry,
    kind: &FieldKind,
    reader: &mut WireReader<'_>,
    config: &CodecConfig,
) -> Result<Value> {
    match kind {
        FieldKind::Integer(ty) => {
            let bits = reader.read_integer(*ty)?;
            if ty.signed {
                Ok(Value::Int(ty.sign_extend(bits)))
            } else {
                Ok(Value::UInt(bits))
            }
        }
        FieldKind::String => {
            let prefix = LengthPrefix::read(reader)?;
            let s = reader.read_str(prefix.as_usize())?;
            Ok(Value::Str(s.to_string()))
        }
        FieldKind::Record(handle) => {
            let schema = registry.resolve(*handle)?;
            read_record(registry, schema, reader, config).map(Value::Record)
        }
        FieldKind::Sequence(inner) => {
            let count = LengthPrefix::read(reader)?.as_usize();
            let element_min = registry.kind_min_size(inner);
            check_sequence_len(count, element_min, config)?;

            // A count the remaining input cannot possibly hold fails up front.
            let needed = count.saturating_mul(element_min);
            if needed > reader.remaining() {
                return Err(CodecError::TruncatedInput {
                    offset: reader.position(),
                    needed,
                    available: reader.remaining(),
                });
            }

            let capacity = count
                .min(reader.remaining() / element_min.max(1))
                .min(MAX_PREALLOC);
            let mut items = Vec::with_capacity(capacity);
            for _ in 0..count {
                items.push(read_value(registry, inner, reader, config)?);
            }
            Ok(Value::Sequence(items))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironwire_core::IntegerType;

    fn decode(registry: &SchemaRegistry, name: &str, bytes: &[u8]) -> Result<(RecordValue, usize)> {
        let schema = registry.get_by_name(name).expect("schema");
        let mut reader = WireReader::new(bytes);
        let record = read_record(registry, schema, &mut reader, &CodecConfig::default())?;
        Ok((record, reader.position()))
    }

    fn tagged_registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .builder("Tagged")
            .integer("id", IntegerType::I16)
            .string("label")
            .sequence("tags", FieldKind::String)
            .define()
            .expect("schema");
        registry
    }

    #[test]
    fn test_decode_fields_in_order() {
        let registry = tagged_registry();
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(-2i16).to_le_bytes());
        bytes.extend_from_slice(&[2, 0, 0, 0]);
        bytes.extend_from_slice(b"ok");
        bytes.extend_from_slice(&[2, 0, 0, 0]);
        bytes.extend_from_slice(&[1, 0, 0, 0, b'a']);
        bytes.extend_from_slice(&[0, 0, 0, 0]);

        let (record, consumed) = decode(&registry, "Tagged", &bytes).expect("decode");
        assert_eq!(consumed, bytes.len());
        assert_eq!(record.get("id"), Some(&Value::Int(-2)));
        assert_eq!(record.get("label"), Some(&Value::from("ok")));
        assert_eq!(record.get("tags"), Some(&Value::from(vec!["a", ""])));
    }

    #[test]
    fn test_decode_unsigned_is_zero_extended() {
        let mut registry = SchemaRegistry::new();
        registry
            .builder("Wide")
            .integer("a", IntegerType::U8)
            .integer("b", IntegerType::U128)
            .define()
            .expect("schema");
        let mut bytes = vec![0xFF];
        bytes.extend_from_slice(&u128::MAX.to_le_bytes());

        let (record, _) = decode(&registry, "Wide", &bytes).expect("decode");
        assert_eq!(record.get("a"), Some(&Value::UInt(255)));
        assert_eq!(record.get("b"), Some(&Value::UInt(u128::MAX)));
    }

    #[test]
    fn test_truncated_string_body() {
        let registry = tagged_registry();
        let bytes = [0, 0, 5, 0, 0, 0, b'a', b'b'];
        assert_eq!(
            decode(&registry, "Tagged", &bytes).unwrap_err(),
            CodecError::TruncatedInput {
                offset: 6,
                needed: 5,
                available: 2,
            }
        );
    }

    #[test]
    fn test_invalid_utf8_offset() {
        let registry = tagged_registry();
        let bytes = [0, 0, 3, 0, 0, 0, b'a', 0xC3, 0x28, 0, 0, 0, 0];
        assert_eq!(
            decode(&registry, "Tagged", &bytes).unwrap_err(),
            CodecError::InvalidUtf8 { offset: 7 }
        );
    }

    #[test]
    fn test_hostile_count_fails_without_allocating() {
        let mut registry = SchemaRegistry::new();
        registry
            .builder("Counts")
            .sequence("values", FieldKind::Integer(IntegerType::U64))
            .define()
            .expect("schema");
        let bytes = [0xFF, 0xFF, 0xFF, 0xFF, 1, 2, 3];
        assert!(matches!(
            decode(&registry, "Counts", &bytes),
            Err(CodecError::TruncatedInput { offset: 4, available: 3, .. })
        ));
    }

    #[test]
    fn test_zero_size_elements_rejected_by_default() {
        let mut registry = SchemaRegistry::new();
        let empty = registry.builder("Unit").define().expect("unit");
        let nested = registry
            .builder("Pair")
            .record("a", empty)
            .record("b", empty)
            .define()
            .expect("pair");
        registry
            .builder("Pairs")
            .sequence("items", FieldKind::Record(nested))
            .define()
            .expect("schema");

        assert_eq!(
            decode(&registry, "Pairs", &u32::MAX.to_le_bytes()).unwrap_err(),
            CodecError::SequenceTooLong {
                length: u32::MAX as usize,
                max: 0,
            }
        );
        let (record, consumed) = decode(&registry, "Pairs", &[0, 0, 0, 0]).expect("empty");
        assert_eq!(consumed, 4);
        assert_eq!(record.get("items"), Some(&Value::Sequence(Vec::new())));
    }

    #[test]
    fn test_zero_size_elements_respect_limit() {
        let mut registry = SchemaRegistry::new();
        let empty = registry.builder("Unit").define().expect("unit");
        registry
            .builder("Units")
            .sequence("items", FieldKind::Record(empty))
            .define()
            .expect("schema");
        let schema = registry.get_by_name("Units").expect("schema");
        let bytes = 1_000_000u32.to_le_bytes();
        let config = CodecConfig::new().max_sequence_len(1024);
        let mut reader = WireReader::new(&bytes);
        assert_eq!(
            read_record(&registry, schema, &mut reader, &config).unwrap_err(),
            CodecError::SequenceTooLong {
                length: 1_000_000,
                max: 1024,
            }
        );
    }
}
