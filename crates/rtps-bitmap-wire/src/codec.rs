//! Encoding and decoding of bitmap elements.
//!
//! Layout, all integers in the submessage byte order:
//!
//! ```text
//! +----------------------+---------------+-----------------------------+
//! | bitmapBase (item)    | numBits: u32  | bitmap: ceil(numBits/32)*u32|
//! +----------------------+---------------+-----------------------------+
//! ```
//!
//! Only the significant words are written. On decode every declared word is
//! consumed from the buffer, even the ones a clamped length throws away, so
//! the caller stays aligned on the next element.

use std::fmt;

use bytes::{Buf, BufMut};

use rtps_bitmap_core::{
    BitmapItem, BitmapRange, Distance, FragmentNumber, FragmentNumberSet, SequenceNumber,
    SequenceNumberSet,
};

use crate::config::{DecodeConfig, Endianness, LengthPolicy};
use crate::error::{Result, WireError};

/// An item that can serve as the base of a bitmap element.
pub trait WireItem: BitmapItem + fmt::Debug {
    /// Encoded size in bytes.
    const ENCODED_LEN: usize;

    /// Write the item.
    fn put<B: BufMut>(&self, buf: &mut B, endianness: Endianness);

    /// Read the item. The caller checks that `ENCODED_LEN` bytes remain.
    fn get<B: Buf>(buf: &mut B, endianness: Endianness) -> Self;

    /// Whether the item is acceptable as a bitmap base.
    fn is_valid_base(&self) -> bool;
}

fn put_u32<B: BufMut>(buf: &mut B, value: u32, endianness: Endianness) {
    match endianness {
        Endianness::Big => buf.put_u32(value),
        Endianness::Little => buf.put_u32_le(value),
    }
}

fn get_u32<B: Buf>(buf: &mut B, endianness: Endianness) -> u32 {
    match endianness {
        Endianness::Big => buf.get_u32(),
        Endianness::Little => buf.get_u32_le(),
    }
}

impl WireItem for SequenceNumber {
    const ENCODED_LEN: usize = 8;

    fn put<B: BufMut>(&self, buf: &mut B, endianness: Endianness) {
        match endianness {
            Endianness::Big => buf.put_i32(self.high),
            Endianness::Little => buf.put_i32_le(self.high),
        }
        put_u32(buf, self.low, endianness);
    }

    fn get<B: Buf>(buf: &mut B, endianness: Endianness) -> Self {
        let high = match endianness {
            Endianness::Big => buf.get_i32(),
            Endianness::Little => buf.get_i32_le(),
        };
        let low = get_u32(buf, endianness);
        SequenceNumber::new(high, low)
    }

    fn is_valid_base(&self) -> bool {
        self.value() >= 1
    }
}

impl WireItem for FragmentNumber {
    const ENCODED_LEN: usize = 4;

    fn put<B: BufMut>(&self, buf: &mut B, endianness: Endianness) {
        put_u32(buf, self.0, endianness);
    }

    fn get<B: Buf>(buf: &mut B, endianness: Endianness) -> Self {
        FragmentNumber(get_u32(buf, endianness))
    }

    fn is_valid_base(&self) -> bool {
        self.0 >= 1
    }
}

fn ensure_remaining<B: Buf>(buf: &B, needed: usize) -> Result<()> {
    if buf.remaining() < needed {
        return Err(WireError::Truncated {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

/// Encoded size of a range.
pub fn encoded_len<T, D, const NBITS: u32, const WORDS: usize>(
    range: &BitmapRange<T, D, NBITS, WORDS>,
) -> usize
where
    T: WireItem,
    D: Distance<T>,
{
    T::ENCODED_LEN + 4 + 4 * range.snapshot().num_words
}

/// Write a range as a bitmap element.
pub fn encode<T, D, B, const NBITS: u32, const WORDS: usize>(
    range: &BitmapRange<T, D, NBITS, WORDS>,
    endianness: Endianness,
    buf: &mut B,
) where
    T: WireItem,
    D: Distance<T>,
    B: BufMut,
{
    let snapshot = range.snapshot();
    range.base().put(buf, endianness);
    put_u32(buf, snapshot.num_bits, endianness);
    for &word in snapshot.significant_words() {
        put_u32(buf, word, endianness);
    }
}

/// Encode a range into a new buffer.
pub fn encode_to_vec<T, D, const NBITS: u32, const WORDS: usize>(
    range: &BitmapRange<T, D, NBITS, WORDS>,
    endianness: Endianness,
) -> Vec<u8>
where
    T: WireItem,
    D: Distance<T>,
{
    let mut buf = Vec::with_capacity(encoded_len(range));
    encode(range, endianness, &mut buf);
    buf
}

/// Read a bitmap element into a range.
pub fn decode<T, D, B, const NBITS: u32, const WORDS: usize>(
    buf: &mut B,
    config: &DecodeConfig,
) -> Result<BitmapRange<T, D, NBITS, WORDS>>
where
    T: WireItem,
    D: Distance<T>,
    B: Buf,
{
    let endianness = config.endianness;

    ensure_remaining(&*buf, T::ENCODED_LEN + 4)?;
    let base = T::get(buf, endianness);
    let num_bits = get_u32(buf, endianness);
    tracing::debug!(?base, num_bits, "decoding bitmap element");

    if config.validate_base && !base.is_valid_base() {
        tracing::warn!(?base, "rejecting bitmap with invalid base");
        return Err(WireError::InvalidBase(format!("{:?}", base)));
    }

    if num_bits > NBITS {
        match config.oversized {
            LengthPolicy::Reject => {
                tracing::warn!(num_bits, max = NBITS, "rejecting oversized bitmap");
                return Err(WireError::BitmapTooLarge {
                    num_bits,
                    max: NBITS,
                });
            }
            LengthPolicy::Clamp => {
                tracing::warn!(num_bits, max = NBITS, "clamping oversized bitmap");
            }
        }
    }

    let declared_words = num_bits.div_ceil(32) as usize;
    ensure_remaining(&*buf, declared_words * 4)?;

    let mut words = [0u32; WORDS];
    let kept = declared_words.min(WORDS);
    for word in words.iter_mut().take(kept) {
        *word = get_u32(buf, endianness);
    }
    buf.advance((declared_words - kept) * 4);

    let mut range = BitmapRange::new(base);
    range.restore(num_bits, &words[..kept])?;
    Ok(range)
}

/// Decode a range from the start of `bytes`. Trailing bytes are ignored.
pub fn decode_from_slice<T, D, const NBITS: u32, const WORDS: usize>(
    mut bytes: &[u8],
    config: &DecodeConfig,
) -> Result<BitmapRange<T, D, NBITS, WORDS>>
where
    T: WireItem,
    D: Distance<T>,
{
    decode(&mut bytes, config)
}

/// Decode a `SequenceNumberSet`.
pub fn decode_sequence_number_set<B: Buf>(
    buf: &mut B,
    config: &DecodeConfig,
) -> Result<SequenceNumberSet> {
    decode(buf, config)
}

/// Decode a `FragmentNumberSet`.
pub fn decode_fragment_number_set<B: Buf>(
    buf: &mut B,
    config: &DecodeConfig,
) -> Result<FragmentNumberSet> {
    decode(buf, config)
}
