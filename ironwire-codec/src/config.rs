//! Codec configuration.

/// Policy for input left over after a record is decoded.
///
/// The wire format carries no total length, so by default a decoder reads
/// what the schema needs and ignores the rest. Callers that own the whole
/// buffer can opt into rejecting leftovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingBytes {
    /// Leftover bytes are ignored.
    #[default]
    Allow,
    /// Leftover bytes fail with [`CodecError::TrailingBytes`](crate::CodecError::TrailingBytes).
    Reject,
}

/// Configuration for a [`Codec`](crate::Codec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    /// What to do with bytes after the decoded record.
    pub trailing_bytes: TrailingBytes,
    /// Output buffer pre-allocation; `None` sizes it from the value.
    pub initial_capacity: Option<usize>,
    /// Longest sequence accepted when encoding or decoding.
    ///
    /// `None` leaves sequences bounded by the input alone, which rejects any
    /// non-empty sequence of elements that can encode to zero bytes.
    pub max_sequence_len: Option<u32>,
}

impl CodecConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that rejects trailing bytes.
    #[must_use]
    pub fn strict() -> Self {
        Self::default().trailing_bytes(TrailingBytes::Reject)
    }

    /// Sets the trailing bytes policy.
    #[must_use]
    pub fn trailing_bytes(mut self, policy: TrailingBytes) -> Self {
        self.trailing_bytes = policy;
        self
    }

    /// Sets a fixed initial output capacity.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets the maximum sequence length.
    #[must_use]
    pub fn max_sequence_len(mut self, max: u32) -> Self {
        self.max_sequence_len = Some(max);
        self
    }

    /// Returns true if trailing bytes are rejected.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.trailing_bytes == TrailingBytes::Reject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_lenient() {
        let config = CodecConfig::default();
        assert_eq!(config.trailing_bytes, TrailingBytes::Allow);
        assert!(!config.is_strict());
        assert_eq!(config.initial_capacity, None);
        assert_eq!(config.max_sequence_len, None);
    }

    #[test]
    fn test_builder() {
        let config = CodecConfig::new()
            .trailing_bytes(TrailingBytes::Reject)
            .initial_capacity(256)
            .max_sequence_len(1024);
        assert!(config.is_strict());
        assert_eq!(config.initial_capacity, Some(256));
        assert_eq!(config.max_sequence_len, Some(1024));
        assert_eq!(CodecConfig::strict().trailing_bytes, TrailingBytes::Reject);
    }
}
