//! Proptest generators for property-based testing.

use proptest::prelude::*;

use rtps_bitmap_core::{BitmapRange, DefaultDistance, FragmentNumber, SequenceNumber};

use crate::model::ModelRange;

/// Generate a window base far enough from zero that backward moves stay positive.
pub fn base() -> impl Strategy<Value = u64> {
    1_000u64..=1_000_000u64
}

/// Generate a valid (positive) sequence number.
pub fn sequence_number() -> impl Strategy<Value = SequenceNumber> {
    (1i64..=i64::MAX / 2).prop_map(SequenceNumber::from_value)
}

/// Generate a valid (1-based) fragment number.
pub fn fragment_number() -> impl Strategy<Value = FragmentNumber> {
    (1u32..=u32::MAX / 2).prop_map(FragmentNumber)
}

/// Generate a set of offsets below `width`.
pub fn offsets(width: u32, max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    prop::collection::btree_set(0..width, 0..=max_len).prop_map(|set| set.into_iter().collect())
}

/// One mutation of a range. Positions are relative to the base at the time
/// the op is applied, so generated sequences keep hitting the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add(i64),
    AddRange(i64, u32),
    Remove(i64),
    Rebase(i64),
    SetBase(i64),
}

impl Op {
    /// Apply the op to a range and its model.
    ///
    /// Returns the result of `add`/`remove` on both sides so callers can
    /// compare them.
    pub fn apply<const NBITS: u32, const WORDS: usize>(
        self,
        range: &mut BitmapRange<u64, DefaultDistance, NBITS, WORDS>,
        model: &mut ModelRange,
    ) -> Option<(bool, bool)> {
        let current = model.base();
        let at = |delta: i64| current.checked_add_signed(delta);
        match self {
            Op::Add(delta) => {
                let item = at(delta)?;
                Some((range.add(item), model.add(item)))
            }
            Op::AddRange(delta, len) => {
                let from = at(delta)?;
                let to = from + u64::from(len);
                range.add_range(from, to);
                model.add_range(from, to);
                None
            }
            Op::Remove(delta) => {
                let item = at(delta)?;
                Some((range.remove(item), model.remove(item)))
            }
            Op::Rebase(delta) => {
                let base = at(delta)?;
                range.rebase(base);
                model.rebase(base);
                None
            }
            Op::SetBase(delta) => {
                let base = at(delta)?;
                range.set_base(base);
                model.set_base(base);
                None
            }
        }
    }
}

/// Generate an op for a window of `width` items.
pub fn op(width: u32) -> impl Strategy<Value = Op> {
    let w = i64::from(width);
    prop_oneof![
        6 => (-8..w + 8).prop_map(Op::Add),
        1 => (-16..w + 16, 0u32..96).prop_map(|(d, len)| Op::AddRange(d, len)),
        2 => (-8..w + 8).prop_map(Op::Remove),
        3 => (-(2 * w)..2 * w).prop_map(Op::Rebase),
        1 => (-w..w).prop_map(Op::SetBase),
    ]
}

/// Generate a sequence of ops.
pub fn ops(width: u32, max_len: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(width), 0..=max_len)
}
