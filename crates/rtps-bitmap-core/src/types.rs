//! RTPS item types and the ranges built over them.
//!
//! All identifiers are newtypes so sequence and fragment numbers cannot be
//! mixed up at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bitmap::BitmapRange;
use crate::item::{BitmapItem, DefaultDistance, Distance};

/// An RTPS sequence number: a signed 64-bit value split into two words.
///
/// The value is `high * 2^32 + low`. Field order matters: the derived
/// ordering compares `high` first, which matches numeric order.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SequenceNumber {
    /// Upper 32 bits (signed).
    pub high: i32,
    /// Lower 32 bits.
    pub low: u32,
}

impl SequenceNumber {
    /// The "unknown" sequence number `{-1, 0}`.
    pub const UNKNOWN: Self = Self { high: -1, low: 0 };

    /// Create from the two wire words.
    pub const fn new(high: i32, low: u32) -> Self {
        Self { high, low }
    }

    /// Create from a 64-bit value.
    pub const fn from_value(value: i64) -> Self {
        Self {
            high: (value >> 32) as i32,
            low: value as u32,
        }
    }

    /// The 64-bit value.
    pub const fn value(&self) -> i64 {
        ((self.high as i64) << 32) | self.low as i64
    }

    /// Check for the [`UNKNOWN`](Self::UNKNOWN) sentinel.
    pub const fn is_unknown(&self) -> bool {
        self.high == Self::UNKNOWN.high && self.low == Self::UNKNOWN.low
    }
}

impl fmt::Debug for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SequenceNumber({})", self.value())
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl From<i64> for SequenceNumber {
    fn from(value: i64) -> Self {
        Self::from_value(value)
    }
}

impl From<SequenceNumber> for i64 {
    fn from(sn: SequenceNumber) -> Self {
        sn.value()
    }
}

impl BitmapItem for SequenceNumber {
    #[inline]
    fn advance(self, n: u32) -> Self {
        Self::from_value(self.value().wrapping_add(i64::from(n)))
    }
}

impl Distance<SequenceNumber> for DefaultDistance {
    #[inline]
    fn distance(to: SequenceNumber, from: SequenceNumber) -> Option<u32> {
        to.value()
            .checked_sub(from.value())
            .and_then(|d| u32::try_from(d).ok())
    }
}

/// An RTPS fragment number (1-based within a sample).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FragmentNumber(pub u32);

impl fmt::Debug for FragmentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FragmentNumber({})", self.0)
    }
}

impl fmt::Display for FragmentNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for FragmentNumber {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

impl BitmapItem for FragmentNumber {
    #[inline]
    fn advance(self, n: u32) -> Self {
        Self(self.0.wrapping_add(n))
    }
}

impl Distance<FragmentNumber> for DefaultDistance {
    #[inline]
    fn distance(to: FragmentNumber, from: FragmentNumber) -> Option<u32> {
        to.0.checked_sub(from.0)
    }
}

/// Set of sequence numbers in a 256-bit window (ACKNACK, GAP).
pub type SequenceNumberSet = BitmapRange<SequenceNumber, DefaultDistance, 256, 8>;

/// Set of fragment numbers in a 256-bit window (NACK_FRAG).
pub type FragmentNumberSet = BitmapRange<FragmentNumber, DefaultDistance, 256, 8>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_number_value_roundtrip() {
        for v in [0i64, 1, 42, u32::MAX as i64, u32::MAX as i64 + 1, -1, i64::MAX, i64::MIN] {
            assert_eq!(SequenceNumber::from_value(v).value(), v);
        }
    }

    #[test]
    fn test_sequence_number_words() {
        let sn = SequenceNumber::from_value((3i64 << 32) + 7);
        assert_eq!(sn, SequenceNumber::new(3, 7));
    }

    #[test]
    fn test_sequence_number_ordering() {
        let a = SequenceNumber::new(0, u32::MAX);
        let b = SequenceNumber::new(1, 0);
        assert!(a < b);
        assert!(SequenceNumber::UNKNOWN < SequenceNumber::new(0, 0));
        assert!(SequenceNumber::UNKNOWN.is_unknown());
    }

    #[test]
    fn test_sequence_number_advance_carries() {
        let sn = SequenceNumber::new(0, u32::MAX).advance(1);
        assert_eq!(sn, SequenceNumber::new(1, 0));
    }

    #[test]
    fn test_sequence_number_distance() {
        let from = SequenceNumber::new(0, u32::MAX - 1);
        let to = SequenceNumber::new(1, 3);
        assert_eq!(DefaultDistance::distance(to, from), Some(5));
        assert_eq!(DefaultDistance::distance(from, to), None);

        let far = SequenceNumber::new(2, 0);
        assert_eq!(DefaultDistance::distance(far, SequenceNumber::new(0, 0)), None);
    }

    #[test]
    fn test_sequence_number_display() {
        let sn = SequenceNumber::from_value(1234);
        assert_eq!(format!("{}", sn), "1234");
        assert_eq!(format!("{:?}", sn), "SequenceNumber(1234)");
    }

    #[test]
    fn test_sequence_number_serde() {
        let sn = SequenceNumber::new(2, 9);
        let json = serde_json::to_string(&sn).unwrap();
        assert_eq!(json, r#"{"high":2,"low":9}"#);
        let back: SequenceNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sn);
    }

    #[test]
    fn test_fragment_number_distance() {
        assert_eq!(DefaultDistance::distance(FragmentNumber(9), FragmentNumber(1)), Some(8));
        assert_eq!(DefaultDistance::distance(FragmentNumber(1), FragmentNumber(9)), None);
        assert_eq!(FragmentNumber(u32::MAX).advance(1), FragmentNumber(0));
    }

    #[test]
    fn test_sequence_number_set_window() {
        let mut set = SequenceNumberSet::new(SequenceNumber::from_value(1));
        assert_eq!(set.ceiling(), SequenceNumber::from_value(256));
        assert!(set.add(SequenceNumber::from_value(256)));
        assert!(!set.add(SequenceNumber::from_value(257)));
    }
}
