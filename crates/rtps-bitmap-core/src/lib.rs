//! # RTPS Bitmap Core
//!
//! Fixed-size bitmap ranges: compact sets over a sliding window of ordered
//! items, as carried by ACKNACK, NACK_FRAG and GAP submessages.
//!
//! This crate contains no I/O and no logging, and none of the range
//! operations allocate. It is pure computation over a `[u32; WORDS]` bitmap.
//!
//! ## Key Types
//!
//! - [`BitmapRange`] - The windowed bitmap set
//! - [`SequenceNumber`] - RTPS 64-bit sequence number (`high:low`)
//! - [`FragmentNumber`] - RTPS 32-bit fragment number
//! - [`SequenceNumberSet`] / [`FragmentNumberSet`] - 256-bit ranges over those
//!
//! ## Bit Layout
//!
//! Bit `31 - k` of word `w` holds the item at offset `w * 32 + k` from the
//! range base, which is the order words and bits travel on the wire.
//!
//! ```rust
//! use rtps_bitmap_core::BitmapRange;
//!
//! let mut range: BitmapRange<u32> = BitmapRange::new(100);
//! assert!(range.add(105));
//! assert!(range.add(130));
//! range.rebase(110);
//! assert_eq!(range.iter().collect::<Vec<_>>(), vec![130]);
//! ```

pub mod bitmap;
pub mod error;
pub mod item;
pub mod types;

pub use bitmap::{BitmapRange, BitmapSnapshot, Iter};
pub use error::BitmapError;
pub use item::{BitmapItem, DefaultDistance, Distance};
pub use types::{FragmentNumber, FragmentNumberSet, SequenceNumber, SequenceNumberSet};
