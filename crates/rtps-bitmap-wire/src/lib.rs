//! # RTPS Bitmap Wire
//!
//! Encoder and decoder for the bitmap elements carried in RTPS submessages:
//! `SequenceNumberSet` (ACKNACK, GAP) and `FragmentNumberSet` (NACK_FRAG).
//!
//! ## Overview
//!
//! The core crate keeps a range's bitmap in wire order already, so encoding
//! is a matter of writing the base, the significant length and the
//! significant words in the submessage byte order. Decoding is where the
//! trust boundary sits: the decoder checks that the buffer really holds every
//! declared word and applies the [`LengthPolicy`] to oversized bitmaps before
//! anything reaches [`BitmapRange::restore`](rtps_bitmap_core::BitmapRange::restore).
//!
//! ## Usage
//!
//! ```rust
//! use rtps_bitmap_core::{SequenceNumber, SequenceNumberSet};
//! use rtps_bitmap_wire::{decode_sequence_number_set, encode_to_vec, DecodeConfig, Endianness};
//!
//! let mut set = SequenceNumberSet::new(SequenceNumber::from_value(1));
//! set.add(SequenceNumber::from_value(4));
//!
//! let bytes = encode_to_vec(&set, Endianness::Little);
//! let config = DecodeConfig::default().with_endianness(Endianness::Little);
//! let decoded = decode_sequence_number_set(&mut &bytes[..], &config).unwrap();
//! assert_eq!(decoded, set);
//! ```

pub mod codec;
pub mod config;
pub mod error;

pub use codec::{
    decode, decode_fragment_number_set, decode_from_slice, decode_sequence_number_set, encode,
    encode_to_vec, encoded_len, WireItem,
};
pub use config::{DecodeConfig, Endianness, LengthPolicy};
pub use error::{Result, WireError};
