//! Integer type descriptors for fixed-width wire fields.
//!
//! An [`IntegerType`] pairs a bit width with signedness. Supported widths are
//! 8, 16, 32, 64 and 128 bits; every integer is written as exactly
//! `width_bits / 8` little-endian two's-complement bytes.

/// Bit widths accepted for integer fields.
pub const SUPPORTED_WIDTHS: [u16; 5] = [8, 16, 32, 64, 128];

/// Fixed-width integer descriptor.
///
/// The width is stored as declared so that an unsupported width can be
/// reported by schema validation rather than rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerType {
    /// Width of the integer in bits.
    pub width_bits: u16,
    /// Whether the integer is two's-complement signed.
    pub signed: bool,
}

impl IntegerType {
    /// Unsigned 8-bit integer.
    pub const U8: Self = Self::unsigned(8);
    /// Unsigned 16-bit integer.
    pub const U16: Self = Self::unsigned(16);
    /// Unsigned 32-bit integer.
    pub const U32: Self = Self::unsigned(32);
    /// Unsigned 64-bit integer.
    pub const U64: Self = Self::unsigned(64);
    /// Unsigned 128-bit integer.
    pub const U128: Self = Self::unsigned(128);
    /// Signed 8-bit integer.
    pub const I8: Self = Self::signed(8);
    /// Signed 16-bit integer.
    pub const I16: Self = Self::signed(16);
    /// Signed 32-bit integer.
    pub const I32: Self = Self::signed(32);
    /// Signed 64-bit integer.
    pub const I64: Self = Self::signed(64);
    /// Signed 128-bit integer.
    pub const I128: Self = Self::signed(128);

    /// Creates an integer descriptor.
    ///
    /// # Arguments
    /// * `width_bits` - Width in bits
    /// * `signed` - Two's-complement signed when true
    #[must_use]
    pub const fn new(width_bits: u16, signed: bool) -> Self {
        Self { width_bits, signed }
    }

    /// Creates an unsigned integer descriptor of the given width.
    #[must_use]
    pub const fn unsigned(width_bits: u16) -> Self {
        Self::new(width_bits, false)
    }

    /// Creates a signed integer descriptor of the given width.
    #[must_use]
    pub const fn signed(width_bits: u16) -> Self {
        Self::new(width_bits, true)
    }

    /// Returns true if the width is one of [`SUPPORTED_WIDTHS`].
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self.width_bits, 8 | 16 | 32 | 64 | 128)
    }

    /// Returns the encoded size in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.width_bits as usize / 8
    }

    /// Returns the smallest representable value.
    #[must_use]
    pub const fn min_value(&self) -> i128 {
        if self.signed && self.width_bits > 0 {
            if self.width_bits >= 128 {
                i128::MIN
            } else {
                -(1i128 << (self.width_bits - 1))
            }
        } else {
            0
        }
    }

    /// Returns the largest representable value.
    #[must_use]
    pub const fn max_value(&self) -> u128 {
        let magnitude_bits = if self.signed {
            self.width_bits.saturating_sub(1)
        } else {
            self.width_bits
        };
        if magnitude_bits >= 128 {
            u128::MAX
        } else {
            (1u128 << magnitude_bits) - 1
        }
    }

    /// Returns true if a signed value is representable by this type.
    #[must_use]
    pub const fn fits_signed(&self, value: i128) -> bool {
        if value < 0 {
            value >= self.min_value()
        } else {
            value as u128 <= self.max_value()
        }
    }

    /// Returns true if an unsigned value is representable by this type.
    #[must_use]
    pub const fn fits_unsigned(&self, value: u128) -> bool {
        value <= self.max_value()
    }

    /// Reinterprets zero-extended raw bits as a signed value.
    ///
    /// The low `width_bits` of `raw` are sign-extended to 128 bits.
    #[must_use]
    pub const fn sign_extend(&self, raw: u128) -> i128 {
        if self.width_bits >= 128 {
            return raw as i128;
        }
        if self.width_bits == 0 {
            return 0;
        }
        let shift = 128 - self.width_bits as u32;
        ((raw << shift) as i128) >> shift
    }

    /// Returns the canonical short name (`u32`, `i64`, ...).
    #[must_use]
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Parses a short integer name such as `u32` or `i128`.
    ///
    /// Unsupported widths parse successfully; validation rejects them later.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (signed, digits) = match name.as_bytes().first()? {
            b'u' => (false, &name[1..]),
            b'i' => (true, &name[1..]),
            _ => return None,
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let width_bits = digits.parse::<u16>().ok()?;
        Some(Self::new(width_bits, signed))
    }
}

impl std::fmt::Display for IntegerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", if self.signed { 'i' } else { 'u' }, self.width_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes() {
        assert_eq!(IntegerType::U8.size(), 1);
        assert_eq!(IntegerType::I16.size(), 2);
        assert_eq!(IntegerType::U32.size(), 4);
        assert_eq!(IntegerType::I64.size(), 8);
        assert_eq!(IntegerType::U128.size(), 16);
    }

    #[test]
    fn test_supported_widths() {
        for width in SUPPORTED_WIDTHS {
            assert!(IntegerType::unsigned(width).is_supported());
            assert!(IntegerType::signed(width).is_supported());
        }
        assert!(!IntegerType::unsigned(24).is_supported());
        assert!(!IntegerType::signed(0).is_supported());
        assert!(!IntegerType::unsigned(256).is_supported());
    }

    #[test]
    fn test_ranges() {
        assert_eq!(IntegerType::U8.max_value(), 255);
        assert_eq!(IntegerType::U8.min_value(), 0);
        assert_eq!(IntegerType::I8.min_value(), -128);
        assert_eq!(IntegerType::I8.max_value(), 127);
        assert_eq!(IntegerType::U128.max_value(), u128::MAX);
        assert_eq!(IntegerType::I128.min_value(), i128::MIN);
        assert_eq!(IntegerType::I128.max_value(), i128::MAX as u128);
        assert_eq!(IntegerType::U64.max_value(), u64::MAX as u128);
    }

    #[test]
    fn test_fits() {
        assert!(IntegerType::U32.fits_unsigned(853));
        assert!(!IntegerType::U32.fits_unsigned(1 << 32));
        assert!(!IntegerType::U32.fits_signed(-1));
        assert!(IntegerType::I16.fits_signed(-32768));
        assert!(!IntegerType::I16.fits_signed(-32769));
        assert!(!IntegerType::I16.fits_unsigned(32768));
        assert!(IntegerType::I128.fits_signed(i128::MIN));
        assert!(!IntegerType::I128.fits_unsigned(u128::MAX));
    }

    #[test]
    fn test_sign_extend() {
        assert_eq!(IntegerType::I8.sign_extend(0xFF), -1);
        assert_eq!(IntegerType::I8.sign_extend(0x7F), 127);
        assert_eq!(IntegerType::I32.sign_extend(0xFFFF_FFFE), -2);
        assert_eq!(IntegerType::I128.sign_extend(u128::MAX), -1);
    }

    #[test]
    fn test_names() {
        assert_eq!(IntegerType::U32.name(), "u32");
        assert_eq!(IntegerType::I128.to_string(), "i128");
        assert_eq!(IntegerType::from_name("u64"), Some(IntegerType::U64));
        assert_eq!(IntegerType::from_name("i8"), Some(IntegerType::I8));
        assert_eq!(IntegerType::from_name("u24"), Some(IntegerType::unsigned(24)));
        assert_eq!(IntegerType::from_name("string"), None);
        assert_eq!(IntegerType::from_name("u"), None);
        assert_eq!(IntegerType::from_name("u3x"), None);
    }
}
