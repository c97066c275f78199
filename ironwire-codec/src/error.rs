//! Error types for record encoding and decoding.

use ironwire_schema::SchemaError;
use thiserror::Error;

/// Error type for codec operations.
///
/// Serialize-time variants carry the dotted path of the offending field,
/// e.g. `purchases[1].price`. Deserialize-time variants carry byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value lacks a field the schema declares.
    #[error("missing field '{path}'")]
    FieldMissing {
        /// Path of the missing field.
        path: String,
    },

    /// The value has a field the schema does not declare.
    #[error("unexpected field '{path}'")]
    UnexpectedField {
        /// Path of the extra field.
        path: String,
    },

    /// The value's shape disagrees with the declared field kind.
    #[error("type mismatch at '{path}': expected {expected}, found {found}")]
    TypeMismatch {
        /// Path of the field.
        path: String,
        /// Declared kind.
        expected: String,
        /// Kind of the supplied value.
        found: String,
    },

    /// An integer does not fit the declared width or signedness.
    #[error("value {value} at '{path}' does not fit {ty}")]
    ValueOutOfRange {
        /// Path of the field.
        path: String,
        /// Offending value.
        value: String,
        /// Declared integer type.
        ty: String,
    },

    /// A value cannot be represented on the wire.
    #[error("cannot encode '{path}': {reason}")]
    EncodingError {
        /// Path of the field.
        path: String,
        /// Why encoding failed.
        reason: String,
    },

    /// A sequence exceeds the configured maximum length.
    #[error("sequence of {length} elements exceeds maximum {max}")]
    SequenceTooLong {
        /// Element count.
        length: usize,
        /// Configured maximum.
        max: u32,
    },

    /// The input ended before the schema was fully decoded.
    #[error("truncated input at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        /// Cursor position where the read started.
        offset: usize,
        /// Bytes the read required.
        needed: usize,
        /// Bytes remaining in the input.
        available: usize,
    },

    /// String bytes are not valid UTF-8.
    #[error("invalid UTF-8 at offset {offset}")]
    InvalidUtf8 {
        /// Byte offset of the first invalid byte.
        offset: usize,
    },

    /// Input remained after the record was decoded in strict mode.
    #[error("trailing bytes after record: consumed {consumed} of {total}")]
    TrailingBytes {
        /// Bytes consumed by the record.
        consumed: usize,
        /// Total input length.
        total: usize,
    },

    /// Schema lookup failed.
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),
}

impl CodecError {
    /// Creates a type mismatch error for a top-level field.
    pub fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            path: String::new(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an out-of-range error for a top-level field.
    pub fn out_of_range(value: impl ToString, ty: impl ToString) -> Self {
        Self::ValueOutOfRange {
            path: String::new(),
            value: value.to_string(),
            ty: ty.to_string(),
        }
    }

    /// Prefixes the error path with a field name.
    #[must_use]
    pub fn at_field(self, name: &str) -> Self {
        self.prefix_path(name)
    }

    /// Prefixes the error path with a sequence index.
    #[must_use]
    pub fn at_index(self, index: usize) -> Self {
        self.prefix_path(&format!("[{index}]"))
    }

    /// Returns the field path for serialize-time errors.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::FieldMissing { path }
            | Self::UnexpectedField { path }
            | Self::TypeMismatch { path, .. }
            | Self::ValueOutOfRange { path, .. }
            | Self::EncodingError { path, .. } => Some(path),
            _ => None,
        }
    }

    fn prefix_path(mut self, segment: &str) -> Self {
        match &mut self {
            Self::FieldMissing { path }
            | Self::UnexpectedField { path }
            | Self::TypeMismatch { path, .. }
            | Self::ValueOutOfRange { path, .. }
            | Self::EncodingError { path, .. } => {
                let separator = if path.is_empty() || path.starts_with('[') {
                    ""
                } else {
                    "."
                };
                *path = format!("{segment}{separator}{path}");
            }
            _ => {}
        }
        self
    }
}

impl From<ironwire_core::Error> for CodecError {
    fn from(err: ironwire_core::Error) -> Self {
        match err {
            ironwire_core::Error::Truncated {
                offset,
                needed,
                available,
            } => Self::TruncatedInput {
                offset,
                needed,
                available,
            },
            ironwire_core::Error::InvalidUtf8 { offset } => Self::InvalidUtf8 { offset },
            ironwire_core::Error::LengthOverflow { length } => Self::EncodingError {
                path: String::new(),
                reason: format!("length {length} exceeds u32 prefix"),
            },
        }
    }
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;
