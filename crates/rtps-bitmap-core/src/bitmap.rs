//! Fixed-size bitmap range: a set of items inside a sliding window.
//!
//! The window is `[base, base + NBITS - 1]`. Membership is stored MSB-first in
//! `WORDS` 32-bit words, exactly as the `bitmap` field of a `SequenceNumberSet`
//! travels on the wire, so snapshots can be handed to an encoder unchanged.
//!
//! Besides the bitmap the range keeps `num_bits`, the significant length:
//! one past the offset of the highest bit that may be set. It is a prefix
//! bound, not a population count. Every bit at or past `num_bits` is zero.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::error::BitmapError;
use crate::item::{BitmapItem, DefaultDistance, Distance};

/// Bits for in-word offsets `lo..hi`, MSB-first. Requires `lo < 32`, `hi <= 32`.
const fn word_mask(lo: u32, hi: u32) -> u32 {
    let above = if hi >= 32 { 0 } else { u32::MAX >> hi };
    (u32::MAX >> lo) & !above
}

/// Single-bit mask for an absolute offset.
#[inline]
const fn bit_mask(offset: u32) -> u32 {
    1 << (31 - (offset & 31))
}

/// A windowed set of items backed by a fixed `[u32; WORDS]` bitmap.
///
/// `WORDS` must equal `ceil(NBITS / 32)`; this is checked when the range is
/// constructed (a compile error for a mismatched instantiation).
///
/// The distance type `D` is never stored; it only selects how offsets from
/// the base are measured.
pub struct BitmapRange<T, D = DefaultDistance, const NBITS: u32 = 256, const WORDS: usize = 8> {
    /// Lowest representable item.
    base: T,
    /// Highest representable item, always `base + (NBITS - 1)`.
    range_max: T,
    /// Membership words.
    bitmap: [u32; WORDS],
    /// Significant length.
    num_bits: u32,
    _distance: PhantomData<fn() -> D>,
}

/// Serialization view of a range.
///
/// `bitmap` is the whole word array; only the first `num_words` words are
/// meaningful and should be put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapSnapshot<const WORDS: usize> {
    /// Significant length (`numBits` on the wire).
    pub num_bits: u32,
    /// All storage words.
    pub bitmap: [u32; WORDS],
    /// `ceil(num_bits / 32)`.
    pub num_words: usize,
}

impl<const WORDS: usize> BitmapSnapshot<WORDS> {
    /// The words an encoder must emit.
    pub fn significant_words(&self) -> &[u32] {
        &self.bitmap[..self.num_words]
    }
}

impl<T, D, const NBITS: u32, const WORDS: usize> BitmapRange<T, D, NBITS, WORDS>
where
    T: BitmapItem,
    D: Distance<T>,
{
    /// Window width in items.
    pub const CAPACITY: u32 = NBITS;

    const LAYOUT_OK: () = assert!(
        NBITS > 0 && WORDS == NBITS.div_ceil(32) as usize,
        "bitmap range needs NBITS > 0 and WORDS == ceil(NBITS / 32)"
    );

    /// Valid offsets in the last word.
    const TAIL_MASK: u32 = word_mask(0, NBITS - (NBITS - 1) / 32 * 32);

    /// Create an empty range starting at `base`.
    pub fn new(base: T) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::LAYOUT_OK;
        Self {
            base,
            range_max: base.advance(NBITS - 1),
            bitmap: [0; WORDS],
            num_bits: 0,
            _distance: PhantomData,
        }
    }

    /// The lowest item of the window.
    pub fn base(&self) -> T {
        self.base
    }

    /// The highest item of the window.
    pub fn ceiling(&self) -> T {
        self.range_max
    }

    /// Reset the range to an empty window starting at `base`.
    ///
    /// All membership is discarded. Use [`rebase`](Self::rebase) to keep the
    /// items the old and new windows have in common.
    pub fn set_base(&mut self, base: T) {
        self.base = base;
        self.range_max = base.advance(NBITS - 1);
        self.clear();
    }

    /// Drop all members, keeping the window where it is.
    pub fn clear(&mut self) {
        self.num_bits = 0;
        self.bitmap = [0; WORDS];
    }

    /// Check whether no bit is set.
    pub fn is_empty(&self) -> bool {
        self.num_bits == 0
    }

    /// The significant length.
    pub fn significant_bits(&self) -> u32 {
        self.num_bits
    }

    /// The item at the significant length boundary, `base + num_bits - 1`.
    ///
    /// After [`add`](Self::add), [`remove`](Self::remove) and
    /// [`rebase`](Self::rebase) this is the highest member. A range loaded
    /// with [`restore`](Self::restore) reports the declared length instead.
    pub fn highest(&self) -> Option<T> {
        (self.num_bits > 0).then(|| self.base.advance(self.num_bits - 1))
    }

    /// The lowest member.
    pub fn lowest(&self) -> Option<T> {
        self.iter().next()
    }

    /// Number of members.
    pub fn len(&self) -> u32 {
        self.significant_words().iter().map(|w| w.count_ones()).sum()
    }

    /// Offset of `item` from the base, if it lies inside the window.
    fn offset_of(&self, item: T) -> Option<u32> {
        if item >= self.base && self.range_max >= item {
            D::distance(item, self.base).filter(|&offset| offset < NBITS)
        } else {
            None
        }
    }

    /// Add an item.
    ///
    /// Returns `false`, leaving the range untouched, when the item lies
    /// outside `[base, ceiling]`. Adding a member twice has no effect.
    pub fn add(&mut self, item: T) -> bool {
        match self.offset_of(item) {
            Some(offset) => {
                self.num_bits = self.num_bits.max(offset + 1);
                self.bitmap[(offset >> 5) as usize] |= bit_mask(offset);
                true
            }
            None => false,
        }
    }

    /// Add every item of `[from, to)` that falls inside the window.
    pub fn add_range(&mut self, from: T, to: T) {
        if from >= to || self.base >= to || from > self.range_max {
            return;
        }

        let start = if from > self.base {
            D::distance(from, self.base)
        } else {
            Some(0)
        };
        let end = if to > self.range_max {
            Some(NBITS)
        } else {
            D::distance(to, self.base)
        };
        let (Some(start), Some(end)) = (start, end) else {
            return;
        };
        let end = end.min(NBITS);
        if start >= end {
            return;
        }

        let first_word = (start >> 5) as usize;
        let last_word = ((end - 1) >> 5) as usize;
        for (w, word) in self.bitmap[first_word..=last_word].iter_mut().enumerate() {
            let w = first_word + w;
            let lo = if w == first_word { start & 31 } else { 0 };
            let hi = if w == last_word { ((end - 1) & 31) + 1 } else { 32 };
            *word |= word_mask(lo, hi);
        }
        self.num_bits = self.num_bits.max(end);
    }

    /// Remove an item. Returns whether it was a member.
    pub fn remove(&mut self, item: T) -> bool {
        let Some(offset) = self.offset_of(item) else {
            return false;
        };
        if offset >= self.num_bits {
            return false;
        }

        let word = (offset >> 5) as usize;
        let mask = bit_mask(offset);
        if self.bitmap[word] & mask == 0 {
            return false;
        }
        self.bitmap[word] &= !mask;

        if offset + 1 == self.num_bits {
            self.num_bits = self.scan_num_bits(word + 1);
        }
        true
    }

    /// Check whether `item` is a member.
    pub fn contains(&self, item: T) -> bool {
        self.offset_of(item).map_or(false, |offset| {
            offset < self.num_bits && self.bitmap[(offset >> 5) as usize] & bit_mask(offset) != 0
        })
    }

    fn num_words(&self) -> usize {
        self.num_bits.div_ceil(32) as usize
    }

    fn significant_words(&self) -> &[u32] {
        &self.bitmap[..self.num_words()]
    }

    /// Current state for serialization.
    pub fn snapshot(&self) -> BitmapSnapshot<WORDS> {
        BitmapSnapshot {
            num_bits: self.num_bits,
            bitmap: self.bitmap,
            num_words: self.num_words(),
        }
    }

    /// Load state received from the wire, keeping the current base.
    ///
    /// `num_bits` above `NBITS` is clamped. `words` must hold at least
    /// `ceil(min(num_bits, NBITS) / 32)` words; extra words are ignored.
    /// On error the range is left untouched.
    pub fn restore(&mut self, num_bits: u32, words: &[u32]) -> Result<(), BitmapError> {
        let num_bits = num_bits.min(NBITS);
        let needed = num_bits.div_ceil(32) as usize;
        if words.len() < needed {
            return Err(BitmapError::ShortWordBuffer {
                needed,
                supplied: words.len(),
            });
        }

        self.bitmap = [0; WORDS];
        self.bitmap[..needed].copy_from_slice(&words[..needed]);
        if let Some(last) = self.bitmap[..needed].last_mut() {
            *last &= word_mask(0, num_bits - (needed as u32 - 1) * 32);
        }
        self.num_bits = num_bits;
        Ok(())
    }

    /// Iterate over members in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        let words = self.significant_words();
        Iter {
            base: self.base,
            words,
            index: 0,
            bits: words.first().copied().unwrap_or(0),
        }
    }

    /// Call `f` on every member in ascending order.
    pub fn for_each<F: FnMut(T)>(&self, f: F) {
        self.iter().for_each(f)
    }

    /// Move the window to start at `base`, keeping the members both windows share.
    ///
    /// Moving forward drops members below the new base; moving backward drops
    /// members above the new ceiling. A distance that does not fit in 32 bits
    /// moves the window past every member and leaves the range empty.
    ///
    /// An empty range stays empty when moved backward: the significant length
    /// is not grown by the shift, so `significant_bits()` remains 0.
    pub fn rebase(&mut self, base: T) {
        if base == self.base {
            return;
        }

        if base > self.base {
            self.shift_left(D::distance(base, self.base).unwrap_or(u32::MAX));
        } else {
            self.shift_right(D::distance(self.base, base).unwrap_or(u32::MAX));
        }

        self.base = base;
        self.range_max = base.advance(NBITS - 1);
    }

    /// Shift content towards offset 0 (window moves forward).
    fn shift_left(&mut self, n_bits: u32) {
        if n_bits >= self.num_bits {
            self.clear();
            return;
        }

        self.num_bits -= n_bits;

        let n_words = (n_bits >> 5) as usize;
        let n_bits = n_bits & 31;
        if n_bits == 0 {
            self.bitmap.copy_within(n_words.., 0);
        } else {
            // Shifting 44 bits: one whole word plus 12 bits carried in from
            // the word to the right.
            // aaaaaaaa bbbbbbbb cccccccc dddddddd
            // bbbbbccc cccccddd ddddd000 00000000
            let overflow_bits = 32 - n_bits;
            let last = WORDS - 1;
            for i in 0..last - n_words {
                self.bitmap[i] = (self.bitmap[i + n_words] << n_bits)
                    | (self.bitmap[i + n_words + 1] >> overflow_bits);
            }
            self.bitmap[last - n_words] = self.bitmap[last] << n_bits;
        }
        self.bitmap[WORDS - n_words..].fill(0);
    }

    /// Shift content away from offset 0 (window moves backward).
    fn shift_right(&mut self, n_bits: u32) {
        if n_bits >= NBITS {
            self.clear();
            return;
        }
        if self.num_bits == 0 {
            return;
        }

        let new_num_bits = self.num_bits.saturating_add(n_bits);
        let truncated = new_num_bits > NBITS;

        let n_words = (n_bits >> 5) as usize;
        let n_bits = n_bits & 31;
        if n_bits == 0 {
            self.bitmap.copy_within(..WORDS - n_words, n_words);
        } else {
            // Shifting 44 bits: one whole word plus 12 bits carried in from
            // the word to the left.
            // aaaaaaaa bbbbbbbb cccccccc dddddddd
            // 00000000 000aaaaa aaabbbbb bbbccccc
            let overflow_bits = 32 - n_bits;
            for i in (n_words + 1..WORDS).rev() {
                self.bitmap[i] = (self.bitmap[i - n_words] >> n_bits)
                    | (self.bitmap[i - n_words - 1] << overflow_bits);
            }
            self.bitmap[n_words] = self.bitmap[0] >> n_bits;
        }
        self.bitmap[..n_words].fill(0);
        self.bitmap[WORDS - 1] &= Self::TAIL_MASK;

        self.num_bits = if truncated {
            self.scan_num_bits(WORDS)
        } else {
            new_num_bits
        };
    }

    /// Significant length from the highest set bit in `bitmap[..upto]`.
    ///
    /// Bits are MSB-first, so the highest offset in a word is its least
    /// significant set bit.
    fn scan_num_bits(&self, upto: usize) -> u32 {
        match self.bitmap[..upto].iter().rposition(|&w| w != 0) {
            Some(i) => i as u32 * 32 + 32 - self.bitmap[i].trailing_zeros(),
            None => 0,
        }
    }
}

impl<T, D, const NBITS: u32, const WORDS: usize> Default for BitmapRange<T, D, NBITS, WORDS>
where
    T: BitmapItem + Default,
    D: Distance<T>,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Copy, D, const NBITS: u32, const WORDS: usize> Clone for BitmapRange<T, D, NBITS, WORDS> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Copy, D, const NBITS: u32, const WORDS: usize> Copy for BitmapRange<T, D, NBITS, WORDS> {}

impl<T: PartialEq, D, const NBITS: u32, const WORDS: usize> PartialEq
    for BitmapRange<T, D, NBITS, WORDS>
{
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.num_bits == other.num_bits && self.bitmap == other.bitmap
    }
}

impl<T: Eq, D, const NBITS: u32, const WORDS: usize> Eq for BitmapRange<T, D, NBITS, WORDS> {}

impl<T: fmt::Debug, D, const NBITS: u32, const WORDS: usize> fmt::Debug
    for BitmapRange<T, D, NBITS, WORDS>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_words = self.num_bits.div_ceil(32) as usize;
        f.debug_struct("BitmapRange")
            .field("base", &self.base)
            .field("range_max", &self.range_max)
            .field("num_bits", &self.num_bits)
            .field("bitmap", &&self.bitmap[..num_words])
            .finish()
    }
}

impl<'a, T, D, const NBITS: u32, const WORDS: usize> IntoIterator
    for &'a BitmapRange<T, D, NBITS, WORDS>
where
    T: BitmapItem,
    D: Distance<T>,
{
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over the members of a [`BitmapRange`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    base: T,
    words: &'a [u32],
    index: usize,
    /// Unvisited bits of `words[index]`.
    bits: u32,
}

impl<T: BitmapItem> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            if self.bits != 0 {
                let offset = self.bits.leading_zeros();
                self.bits &= !(1 << (31 - offset));
                return Some(self.base.advance(self.index as u32 * 32 + offset));
            }
            if self.index >= self.words.len() {
                return None;
            }
            self.index += 1;
            self.bits = self.words.get(self.index).copied().unwrap_or(0);
        }
    }
}

impl<T: BitmapItem> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    type Range = BitmapRange<u32>;
    type Narrow = BitmapRange<u32, DefaultDistance, 100, 4>;

    fn items<const N: u32, const W: usize>(range: &BitmapRange<u32, DefaultDistance, N, W>) -> Vec<u32> {
        range.iter().collect()
    }

    #[test]
    fn test_new_is_empty() {
        let range = Range::new(100);
        assert_eq!(Range::CAPACITY, 256);
        assert!(range.is_empty());
        assert_eq!(range.base(), 100);
        assert_eq!(range.ceiling(), 355);
        assert_eq!(range.highest(), None);
        assert_eq!(range.lowest(), None);
        assert_eq!(range.len(), 0);
        assert!(items(&range).is_empty());
    }

    #[test]
    fn test_default_base() {
        let range = Range::default();
        assert_eq!(range.base(), 0);
        assert_eq!(range.ceiling(), 255);
        assert!(range.is_empty());
    }

    #[test]
    fn test_add_window_bounds() {
        let mut range = Range::new(100);
        assert!(range.add(355));
        assert!(!range.add(356));
        assert!(!range.add(99));
        assert_eq!(items(&range), vec![355]);
        assert_eq!(range.significant_bits(), 256);
    }

    #[test]
    fn test_add_out_of_window_leaves_state() {
        let mut range = Range::new(100);
        range.add(120);
        let before = range;
        assert!(!range.add(50));
        assert!(!range.add(1000));
        assert_eq!(range, before);
    }

    #[test]
    fn test_add_single_item() {
        let mut range = Range::new(100);
        assert!(range.add(140));
        assert!(!range.is_empty());
        assert_eq!(range.highest(), Some(140));
        assert_eq!(items(&range), vec![140]);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut range = Range::new(0);
        range.add(7);
        let once = range;
        range.add(7);
        assert_eq!(range, once);
        assert_eq!(items(&range), vec![7]);
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_bit_layout_msb_first() {
        let mut range = Range::new(0);
        range.add(0);
        range.add(31);
        range.add(32);
        let snap = range.snapshot();
        assert_eq!(snap.bitmap[0], 0x8000_0001);
        assert_eq!(snap.bitmap[1], 0x8000_0000);
        assert_eq!(snap.num_bits, 33);
        assert_eq!(snap.num_words, 2);
        assert_eq!(snap.significant_words(), &[0x8000_0001, 0x8000_0000]);
    }

    #[test]
    fn test_scenario_add_and_rebase() {
        let mut range = Range::new(100);
        range.add(100);
        range.add(105);
        range.add(130);
        assert_eq!(range.significant_bits(), 31);
        assert_eq!(items(&range), vec![100, 105, 130]);

        range.rebase(110);
        assert_eq!(range.base(), 110);
        assert_eq!(range.ceiling(), 365);
        assert_eq!(items(&range), vec![130]);
        assert_eq!(range.significant_bits(), 21);
    }

    #[test]
    fn test_rebase_same_base_is_noop() {
        let mut range = Range::new(100);
        range.add(101);
        range.add(300);
        let before = range;
        range.rebase(100);
        assert_eq!(range, before);
    }

    #[test]
    fn test_rebase_forward_past_highest_empties() {
        let mut range = Range::new(100);
        range.add(100);
        range.add(120);
        range.rebase(121);
        assert!(range.is_empty());
        assert_eq!(range.base(), 121);
        assert!(items(&range).is_empty());
    }

    #[test]
    fn test_rebase_forward_cross_word() {
        let mut range = Range::new(0);
        range.add(33);
        range.add(64);
        range.add(200);
        range.rebase(40);
        assert_eq!(items(&range), vec![64, 200]);
        assert_eq!(range.significant_bits(), 161);
        assert_eq!(range.highest(), Some(200));
    }

    #[test]
    fn test_rebase_forward_whole_words() {
        let mut range = Range::new(0);
        range.add(64);
        range.add(255);
        range.rebase(64);
        assert_eq!(items(&range), vec![64, 255]);
        assert_eq!(range.significant_bits(), 192);
        assert_eq!(range.snapshot().bitmap[6..], [0, 0]);
    }

    #[test]
    fn test_rebase_backward_keeps_members() {
        let mut range = Range::new(100);
        range.add(100);
        range.add(131);
        range.rebase(63);
        assert_eq!(items(&range), vec![100, 131]);
        assert_eq!(range.significant_bits(), 69);
        assert_eq!(range.highest(), Some(131));
    }

    #[test]
    fn test_rebase_backward_whole_words() {
        let mut range = Range::new(64);
        range.add(64);
        range.add(95);
        range.rebase(0);
        assert_eq!(items(&range), vec![64, 95]);
        assert_eq!(range.snapshot().bitmap[..3], [0, 0, 0x8000_0001]);
    }

    #[test]
    fn test_rebase_backward_truncates_top() {
        let mut range = Range::new(100);
        range.add(100);
        range.add(300);
        range.add(355);
        assert_eq!(range.significant_bits(), 256);

        range.rebase(90);
        assert_eq!(items(&range), vec![100, 300]);
        assert_eq!(range.significant_bits(), 211);
        assert_eq!(range.highest(), Some(300));
    }

    #[test]
    fn test_rebase_backward_truncates_everything() {
        let mut range = Range::new(100);
        range.add(350);
        range.rebase(80);
        assert!(range.is_empty());
        assert_eq!(range.highest(), None);
    }

    #[test]
    fn test_rebase_backward_past_width_empties() {
        let mut range = Range::new(1000);
        range.add(1000);
        range.rebase(744);
        assert!(range.is_empty());
        assert_eq!(range.base(), 744);
    }

    #[test]
    fn test_rebase_backward_empty_stays_empty() {
        let mut range = Range::new(100);
        range.rebase(50);
        assert!(range.is_empty());
        assert_eq!(range.significant_bits(), 0);
        assert_eq!(range.highest(), None);
    }

    #[test]
    fn test_rebase_distance_overflow_empties() {
        let mut range: BitmapRange<u64> = BitmapRange::new(0);
        range.add(10);
        range.rebase(u64::from(u32::MAX) + 10);
        assert!(range.is_empty());

        let mut range: BitmapRange<u64> = BitmapRange::new(u64::from(u32::MAX) + 10);
        range.add(u64::from(u32::MAX) + 10);
        range.rebase(0);
        assert!(range.is_empty());
    }

    #[test]
    fn test_set_base_discards() {
        let mut range = Range::new(100);
        range.add(100);
        range.add(150);
        range.set_base(120);
        assert!(range.is_empty());
        assert_eq!(range.base(), 120);
        assert_eq!(range.ceiling(), 375);
        assert!(items(&range).is_empty());
    }

    #[test]
    fn test_narrow_window() {
        let mut range = Narrow::new(0);
        assert_eq!(range.ceiling(), 99);
        assert!(range.add(99));
        assert!(!range.add(100));
        assert_eq!(range.significant_bits(), 100);
    }

    #[test]
    fn test_narrow_rebase_backward_masks_tail() {
        let mut range = Narrow::new(10);
        range.add(10);
        range.add(60);
        range.add(109);
        range.rebase(5);
        assert_eq!(items(&range), vec![10, 60]);
        assert_eq!(range.significant_bits(), 56);
        assert_eq!(range.snapshot().bitmap[3], 0);
        assert!(!range.contains(109));
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut range = Range::new(1000);
        for item in [1000, 1001, 1031, 1032, 1100, 1255] {
            range.add(item);
        }
        let snap = range.snapshot();

        let mut restored = Range::new(1000);
        restored.restore(snap.num_bits, snap.significant_words()).unwrap();
        assert_eq!(restored, range);
        assert_eq!(items(&restored), items(&range));
    }

    #[test]
    fn test_restore_short_buffer() {
        let mut range = Range::new(0);
        range.add(3);
        let before = range;
        let err = range.restore(64, &[1]).unwrap_err();
        assert_eq!(err, BitmapError::ShortWordBuffer { needed: 2, supplied: 1 });
        assert_eq!(range, before);
    }

    #[test]
    fn test_restore_clamps_length() {
        let mut range = Range::new(0);
        range.restore(1000, &[u32::MAX; 8]).unwrap();
        assert_eq!(range.significant_bits(), 256);
        assert_eq!(range.len(), 256);
        assert_eq!(range.highest(), Some(255));
    }

    #[test]
    fn test_restore_masks_trailing_bits() {
        let mut range = Range::new(0);
        range.add(200);
        range.restore(4, &[u32::MAX, u32::MAX]).unwrap();
        assert_eq!(range.snapshot().bitmap[0], 0xF000_0000);
        assert_eq!(range.snapshot().bitmap[1], 0);
        assert_eq!(items(&range), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_restore_zero_length() {
        let mut range = Range::new(0);
        range.add(5);
        range.restore(0, &[]).unwrap();
        assert!(range.is_empty());
        assert!(items(&range).is_empty());
    }

    #[test]
    fn test_for_each_ascending() {
        let mut range = Range::new(0);
        for item in [250, 3, 64, 31, 32, 0] {
            range.add(item);
        }
        let mut seen = Vec::new();
        range.for_each(|item| seen.push(item));
        assert_eq!(seen, vec![0, 3, 31, 32, 64, 250]);
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut range = Range::new(0);
        range.add(1);
        range.add(2);
        let mut iter = range.iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next(), Some(2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert_eq!((&range).into_iter().count(), 2);
    }

    #[test]
    fn test_add_range() {
        let mut range = Range::new(0);
        range.add_range(30, 70);
        assert_eq!(items(&range), (30..70).collect::<Vec<_>>());
        assert_eq!(range.len(), 40);
        assert_eq!(range.significant_bits(), 70);
    }

    #[test]
    fn test_add_range_clipped() {
        let mut range = Range::new(100);
        range.add_range(50, 103);
        assert_eq!(items(&range), vec![100, 101, 102]);

        range.add_range(350, 400);
        assert_eq!(range.significant_bits(), 256);
        assert_eq!(range.len(), 9);

        let before = range;
        range.add_range(5, 5);
        range.add_range(10, 100);
        range.add_range(356, 500);
        assert_eq!(range, before);
    }

    #[test]
    fn test_remove_recomputes_length() {
        let mut range = Range::new(0);
        range.add(3);
        range.add(40);
        range.add(200);

        assert!(range.remove(200));
        assert_eq!(range.significant_bits(), 41);
        assert_eq!(range.highest(), Some(40));

        assert!(!range.remove(7));
        assert!(range.remove(40));
        assert_eq!(range.significant_bits(), 4);

        assert!(range.remove(3));
        assert!(range.is_empty());
        assert!(!range.remove(3));
    }

    #[test]
    fn test_contains() {
        let mut range = Range::new(10);
        range.add(12);
        assert!(range.contains(12));
        assert!(!range.contains(13));
        assert!(!range.contains(9));
        assert!(!range.contains(500));
    }

    #[test]
    fn test_lowest_and_len() {
        let mut range = Range::new(0);
        range.add(77);
        range.add(40);
        assert_eq!(range.lowest(), Some(40));
        assert_eq!(range.len(), 2);
    }

    #[test]
    fn test_debug_shows_significant_words() {
        let mut range = Range::new(0);
        range.add(0);
        let debug = format!("{:?}", range);
        assert!(debug.starts_with("BitmapRange"));
        assert!(debug.contains("num_bits: 1"));
        assert!(debug.contains("2147483648"));
    }

    proptest! {
        #[test]
        fn test_rebase_matches_filtered_members(
            offsets in prop::collection::btree_set(0u32..256, 0..40),
            new_base in 0u32..1200,
        ) {
            let base = 500;
            let mut range = Range::new(base);
            for offset in &offsets {
                range.add(base + offset);
            }
            range.rebase(new_base);

            let expected: Vec<u32> = offsets
                .iter()
                .map(|o| base + o)
                .filter(|&item| item >= new_base && item <= new_base + 255)
                .collect();
            prop_assert_eq!(items(&range), expected.clone());
            let expected_bits = expected.last().map_or(0, |&top| top - new_base + 1);
            prop_assert_eq!(range.significant_bits(), expected_bits);
        }

        #[test]
        fn test_narrow_rebase_matches_filtered_members(
            offsets in prop::collection::btree_set(0u32..100, 0..20),
            new_base in 0u32..400,
        ) {
            let base = 150;
            let mut range = Narrow::new(base);
            for offset in &offsets {
                range.add(base + offset);
            }
            range.rebase(new_base);

            let expected: Vec<u32> = offsets
                .iter()
                .map(|o| base + o)
                .filter(|&item| item >= new_base && item <= new_base + 99)
                .collect();
            prop_assert_eq!(items(&range), expected);
        }
    }
}
