//! Codec configuration.

/// Byte order of a submessage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Endianness {
    /// Network order.
    #[default]
    Big,
    /// Little-endian.
    Little,
}

impl Endianness {
    /// Byte order from the RTPS submessage E flag (set means little-endian).
    pub fn from_flag(e_flag: bool) -> Self {
        if e_flag {
            Endianness::Little
        } else {
            Endianness::Big
        }
    }

    /// The E flag value for this byte order.
    pub fn flag(self) -> bool {
        matches!(self, Endianness::Little)
    }
}

/// What to do when a peer declares more bits than the window holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthPolicy {
    /// Fail with [`WireError::BitmapTooLarge`](crate::WireError::BitmapTooLarge).
    #[default]
    Reject,
    /// Keep the first bits that fit and drop the rest.
    Clamp,
}

/// Configuration for decoding bitmap elements.
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Byte order of the enclosing submessage.
    pub endianness: Endianness,
    /// Handling of `numBits` larger than the window.
    pub oversized: LengthPolicy,
    /// Reject bases below 1, which RTPS declares invalid.
    pub validate_base: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            endianness: Endianness::Big,
            oversized: LengthPolicy::Reject,
            validate_base: true,
        }
    }
}

impl DecodeConfig {
    /// Set the byte order.
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Set the oversized length policy.
    pub fn with_oversized(mut self, oversized: LengthPolicy) -> Self {
        self.oversized = oversized;
        self
    }

    /// Enable or disable base validation.
    pub fn with_base_validation(mut self, validate_base: bool) -> Self {
        self.validate_base = validate_base;
        self
    }
}
