//! Golden wire vectors for `SequenceNumberSet`.
//!
//! Each vector lists a base and members, and the exact bytes an encoder must
//! produce for them. Decoders must reproduce the members from those bytes.

use rtps_bitmap_core::{SequenceNumber, SequenceNumberSet};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Bitmap base as a 64-bit sequence number value.
    pub base: i64,
    /// Members, ascending.
    pub items: &'static [i64],
    /// Submessage E flag.
    pub little_endian: bool,
    /// Expected element bytes (hex).
    pub expected_hex: &'static str,
}

impl GoldenVector {
    /// Expected bytes, decoded from hex.
    pub fn expected_bytes(&self) -> Vec<u8> {
        hex::decode(self.expected_hex).expect("golden vector hex")
    }

    /// Members as sequence numbers.
    pub fn sequence_numbers(&self) -> Vec<SequenceNumber> {
        self.items.iter().copied().map(SequenceNumber::from_value).collect()
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "single member at base",
            base: 1,
            items: &[1],
            little_endian: false,
            expected_hex: concat!("0000000000000001", "00000001", "80000000"),
        },
        GoldenVector {
            name: "empty set",
            base: 100,
            items: &[],
            little_endian: false,
            expected_hex: concat!("0000000000000064", "00000000"),
        },
        GoldenVector {
            name: "two words little endian",
            base: 1,
            items: &[1, 2, 33],
            little_endian: true,
            expected_hex: concat!(
                "0000000001000000",
                "21000000",
                "000000c0",
                "00000080"
            ),
        },
        GoldenVector {
            name: "top of window",
            base: 1,
            items: &[256],
            little_endian: false,
            expected_hex: concat!(
                "0000000000000001",
                "00000100",
                "00000000",
                "00000000",
                "00000000",
                "00000000",
                "00000000",
                "00000000",
                "00000000",
                "00000001"
            ),
        },
        GoldenVector {
            name: "base at low word boundary",
            base: 0xffff_ffff,
            items: &[0xffff_ffff, 0x1_0000_0000],
            little_endian: false,
            expected_hex: concat!("00000000ffffffff", "00000002", "c0000000"),
        },
        GoldenVector {
            name: "members straddling a word boundary",
            base: 1000,
            items: &[1031, 1032],
            little_endian: true,
            expected_hex: concat!(
                "00000000e8030000",
                "21000000",
                "01000000",
                "00000080"
            ),
        },
    ]
}

/// Build the set a vector describes.
pub fn set_from_vector(vector: &GoldenVector) -> SequenceNumberSet {
    let mut set = SequenceNumberSet::new(SequenceNumber::from_value(vector.base));
    for sn in vector.sequence_numbers() {
        set.add(sn);
    }
    set
}
