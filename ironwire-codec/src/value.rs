//! Dynamic record values.
//!
//! A [`RecordValue`] maps field names to [`Value`]s. It carries no schema of
//! its own; the codec checks it against a schema on every call.

use crate::error::{CodecError, Result};
use std::collections::BTreeMap;

/// A single field value.
#[derive(Debug, Clone)]
pub enum Value {
    /// Signed integer. Accepted by any integer field it fits.
    Int(i128),
    /// Unsigned integer. Accepted by any integer field it fits.
    UInt(u128),
    /// UTF-8 string.
    Str(String),
    /// Nested record.
    Record(RecordValue),
    /// Ordered sequence of values.
    Sequence(Vec<Value>),
}

impl Value {
    /// Returns a short name for the value's shape.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "signed integer",
            Self::UInt(_) => "unsigned integer",
            Self::Str(_) => "string",
            Self::Record(_) => "record",
            Self::Sequence(_) => "sequence",
        }
    }

    /// Returns the value as `u128` if it is a non-negative integer.
    #[must_use]
    pub fn as_u128(&self) -> Option<u128> {
        match *self {
            Self::UInt(n) => Some(n),
            Self::Int(n) => u128::try_from(n).ok(),
            _ => None,
        }
    }

    /// Returns the value as `i128` if it is an integer within `i128` range.
    #[must_use]
    pub fn as_i128(&self) -> Option<i128> {
        match *self {
            Self::Int(n) => Some(n),
            Self::UInt(n) => i128::try_from(n).ok(),
            _ => None,
        }
    }

    /// Returns the string slice if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the nested record if this is a record.
    #[must_use]
    pub fn as_record(&self) -> Option<&RecordValue> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

/// Integers compare numerically across the signed and unsigned variants.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::UInt(a), Self::UInt(b)) => a == b,
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                u128::try_from(*a).is_ok_and(|a| a == *b)
            }
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Record(a), Self::Record(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Record(r) => write!(f, "{r}"),
            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

macro_rules! impl_value_from_int {
    ($variant:ident, $wide:ty; $($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::$variant(<$wide>::from(n))
                }
            }
        )+
    };
}

impl_value_from_int!(UInt, u128; u8, u16, u32, u64, u128);
impl_value_from_int!(Int, i128; i8, i16, i32, i64, i128);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<RecordValue> for Value {
    fn from(r: RecordValue) -> Self {
        Self::Record(r)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

/// Conversion out of a [`Value`], used by [`RecordValue::take`].
pub trait FromValue: Sized {
    /// Converts the value, reporting mismatches with an empty path.
    ///
    /// # Errors
    /// Returns [`CodecError::TypeMismatch`] or [`CodecError::ValueOutOfRange`].
    fn from_value(value: Value) -> Result<Self>;
}

macro_rules! impl_from_value_int {
    ($($ty:ty),+) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Result<Self> {
                    match value {
                        Value::UInt(n) => {
                            <$ty>::try_from(n).map_err(|_| CodecError::out_of_range(n, stringify!($ty)))
                        }
                        Value::Int(n) => {
                            <$ty>::try_from(n).map_err(|_| CodecError::out_of_range(n, stringify!($ty)))
                        }
                        other => Err(CodecError::mismatch(stringify!($ty), other.kind_name())),
                    }
                }
            }
        )+
    };
}

impl_from_value_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(CodecError::mismatch("string", other.kind_name())),
        }
    }
}

impl FromValue for RecordValue {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Record(r) => Ok(r),
            other => Err(CodecError::mismatch("record", other.kind_name())),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| T::from_value(item).map_err(|e| e.at_index(i)))
                .collect(),
            other => Err(CodecError::mismatch("sequence", other.kind_name())),
        }
    }
}

/// A record value: field name to value.
///
/// Field order here is irrelevant; wire order comes from the schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordValue {
    fields: BTreeMap<String, Value>,
}

impl RecordValue {
    /// Creates an empty record value.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field and returns the record, for chained construction.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(name.into(), value.into())
    }

    /// Returns a field value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Removes and returns a field value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.fields.remove(name)
    }

    /// Returns true if the field is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Removes a field and converts it.
    ///
    /// # Errors
    /// Returns [`CodecError::FieldMissing`] if absent, or the conversion
    /// error with this field's name prefixed to its path.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Result<T> {
        let value = self.remove(name).ok_or_else(|| CodecError::FieldMissing {
            path: name.to_string(),
        })?;
        T::from_value(value).map_err(|e| e.at_field(name))
    }

    /// Removes a nested record field and converts it to a typed record.
    ///
    /// # Errors
    /// As for [`Self::take`], plus any error from [`FromRecord`](crate::FromRecord).
    pub fn take_record<T: crate::FromRecord>(&mut self, name: &str) -> Result<T> {
        let record: RecordValue = self.take(name)?;
        T::from_record(record).map_err(|e| e.at_field(name))
    }

    /// Removes a sequence-of-records field and converts each element.
    ///
    /// # Errors
    /// As for [`Self::take_record`]; element errors carry their index.
    pub fn take_records<T: crate::FromRecord>(&mut self, name: &str) -> Result<Vec<T>> {
        let records: Vec<RecordValue> = self.take(name)?;
        records
            .into_iter()
            .enumerate()
            .map(|(i, r)| T::from_record(r).map_err(|e| e.at_index(i).at_field(name)))
            .collect()
    }
}

impl std::fmt::Display for RecordValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RecordValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
