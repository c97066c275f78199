//! Conversion between caller-side structs and [`RecordValue`].

use crate::error::Result;
use crate::value::RecordValue;

/// Converts a typed record into a [`RecordValue`].
///
/// # Example
/// ```
/// use ironwire_codec::{RecordValue, ToRecord};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl ToRecord for Point {
///     fn to_record(&self) -> RecordValue {
///         RecordValue::new().with("x", self.x).with("y", self.y)
///     }
/// }
///
/// let record = Point { x: 1, y: -1 }.to_record();
/// assert_eq!(record.len(), 2);
/// ```
pub trait ToRecord {
    /// Builds the record value.
    fn to_record(&self) -> RecordValue;
}

/// Builds a typed record from a decoded [`RecordValue`].
///
/// Implementations usually pull fields out with [`RecordValue::take`],
/// [`RecordValue::take_record`] and [`RecordValue::take_records`], which
/// report the failing field in the error path.
pub trait FromRecord: Sized {
    /// Converts the record value.
    ///
    /// # Errors
    /// Returns [`CodecError::FieldMissing`](crate::CodecError::FieldMissing),
    /// [`CodecError::TypeMismatch`](crate::CodecError::TypeMismatch) or
    /// [`CodecError::ValueOutOfRange`](crate::CodecError::ValueOutOfRange).
    fn from_record(record: RecordValue) -> Result<Self>;
}

impl ToRecord for RecordValue {
    fn to_record(&self) -> RecordValue {
        self.clone()
    }
}

impl FromRecord for RecordValue {
    fn from_record(record: RecordValue) -> Result<Self> {
        Ok(record)
    }
}
