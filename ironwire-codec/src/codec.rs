//! Codec bound to a schema registry and configuration.

use crate::config::{CodecConfig, TrailingBytes};
use crate::decoder::read_record;
use crate::encoder::{measure_record, write_record};
use crate::error::{CodecError, Result};
use crate::record::{FromRecord, ToRecord};
use crate::value::RecordValue;
use bytes::Bytes;
use ironwire_core::{WireReader, WireWriter};
use ironwire_schema::{SchemaHandle, SchemaRegistry};

/// Serializes and deserializes records against schemas in one registry.
///
/// A codec borrows the registry, so schemas cannot change while it is in
/// use. It holds no other state and can be shared freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'r> {
    registry: &'r SchemaRegistry,
    config: CodecConfig,
}

impl<'r> Codec<'r> {
    /// Creates a codec with the default configuration.
    #[must_use]
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self::with_config(registry, CodecConfig::default())
    }

    /// Creates a codec with a custom configuration.
    #[must_use]
    pub fn with_config(registry: &'r SchemaRegistry, config: CodecConfig) -> Self {
        Self { registry, config }
    }

    /// Returns the registry.
    #[must_use]
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Returns the encoded length of `value` without encoding it.
    ///
    /// # Errors
    /// Returns any serialize-time error the value would produce.
    pub fn encoded_len(&self, handle: SchemaHandle, value: &RecordValue) -> Result<usize> {
        let schema = self.registry.resolve(handle)?;
        measure_record(self.registry, schema, value, &self.config)
    }

    /// Serializes `value` into a new buffer.
    ///
    /// # Errors
    /// Returns [`CodecError::FieldMissing`], [`CodecError::UnexpectedField`],
    /// [`CodecError::TypeMismatch`], [`CodecError::ValueOutOfRange`],
    /// [`CodecError::EncodingError`], [`CodecError::SequenceTooLong`] or
    /// [`CodecError::Schema`] for a foreign handle.
    pub fn serialize(&self, handle: SchemaHandle, value: &RecordValue) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.serialize_into(handle, value, &mut out)?;
        Ok(out)
    }

    /// Serializes `value` into an immutable [`Bytes`] buffer.
    ///
    /// # Errors
    /// As for [`Self::serialize`].
    pub fn serialize_to_bytes(&self, handle: SchemaHandle, value: &RecordValue) -> Result<Bytes> {
        let schema = self.registry.resolve(handle)?;
        let size = measure_record(self.registry, schema, value, &self.config)?;
        let mut writer = WireWriter::with_capacity(size);
        write_record(self.registry, schema, value, &mut writer)?;

        tracing::debug!("Serialized {} into {} shared bytes", schema.name(), size);
        Ok(writer.into_bytes())
    }

    /// Appends the encoding of `value` to `out`.
    ///
    /// On error `out` is left exactly as it was.
    ///
    /// # Errors
    /// As for [`Self::serialize`].
    pub fn serialize_into(
        &self,
        handle: SchemaHandle,
        value: &RecordValue,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        let schema = self.registry.resolve(handle)?;
        let size = measure_record(self.registry, schema, value, &self.config)?;

        let start = out.len();
        let mut writer = WireWriter::from_vec(std::mem::take(out));
        writer.reserve(self.config.initial_capacity.unwrap_or(size));
        let result = write_record(self.registry, schema, value, &mut writer);
        if result.is_err() {
            writer.truncate(start);
        }
        *out = writer.into_vec();
        result?;

        tracing::debug!("Serialized {} into {} bytes", schema.name(), size);
        Ok(())
    }

    /// Deserializes a record, applying the configured trailing bytes policy.
    ///
    /// # Errors
    /// Returns [`CodecError::TruncatedInput`], [`CodecError::InvalidUtf8`],
    /// [`CodecError::SequenceTooLong`], [`CodecError::TrailingBytes`] in
    /// strict mode, or [`CodecError::Schema`] for a foreign handle.
    pub fn deserialize(&self, handle: SchemaHandle, bytes: &[u8]) -> Result<RecordValue> {
        let (record, consumed) = self.deserialize_prefix(handle, bytes)?;
        if consumed < bytes.len() {
            match self.config.trailing_bytes {
                TrailingBytes::Allow => {
                    tracing::trace!("Ignoring {} trailing bytes", bytes.len() - consumed);
                }
                TrailingBytes::Reject => {
                    tracing::warn!(
                        "Rejecting input with {} trailing bytes",
                        bytes.len() - consumed
                    );
                    return Err(CodecError::TrailingBytes {
                        consumed,
                        total: bytes.len(),
                    });
                }
            }
        }
        Ok(record)
    }

    /// Deserializes a record from the front of `bytes`.
    ///
    /// Returns the record and the number of bytes it occupied, so records
    /// written back to back can be read in turn. The trailing bytes policy
    /// does not apply.
    ///
    /// # Errors
    /// As for [`Self::deserialize`], except [`CodecError::TrailingBytes`].
    pub fn deserialize_prefix(
        &self,
        handle: SchemaHandle,
        bytes: &[u8],
    ) -> Result<(RecordValue, usize)> {
        let schema = self.registry.resolve(handle)?;
        let mut reader = WireReader::new(bytes);
        let record = read_record(self.registry, schema, &mut reader, &self.config)?;
        let consumed = reader.position();

        tracing::debug!("Deserialized {} from {} bytes", schema.name(), consumed);
        Ok((record, consumed))
    }

    /// Serializes a typed record.
    ///
    /// # Errors
    /// As for [`Self::serialize`].
    pub fn encode<T: ToRecord + ?Sized>(&self, handle: SchemaHandle, value: &T) -> Result<Vec<u8>> {
        self.serialize(handle, &value.to_record())
    }

    /// Deserializes a typed record.
    ///
    /// # Errors
    /// As for [`Self::deserialize`], plus any conversion error from
    /// [`FromRecord`].
    pub fn decode<T: FromRecord>(&self, handle: SchemaHandle, bytes: &[u8]) -> Result<T> {
        T::from_record(self.deserialize(handle, bytes)?)
    }
}
