//! Reference model of bitmap range semantics.
//!
//! `ModelRange` keeps members in a `BTreeSet<u64>` and derives everything
//! else from it. It is slow and obviously correct, which makes it the oracle
//! for property tests against [`BitmapRange`].

use std::collections::BTreeSet;

use rtps_bitmap_core::{BitmapRange, DefaultDistance};

/// Naive windowed set over `u64` items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRange {
    base: u64,
    width: u64,
    items: BTreeSet<u64>,
}

impl ModelRange {
    /// Create an empty model window of `width` items starting at `base`.
    pub fn new(base: u64, width: u32) -> Self {
        Self {
            base,
            width: u64::from(width),
            items: BTreeSet::new(),
        }
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn ceiling(&self) -> u64 {
        self.base + self.width - 1
    }

    fn in_window(&self, item: u64) -> bool {
        item >= self.base && item <= self.ceiling()
    }

    pub fn add(&mut self, item: u64) -> bool {
        if !self.in_window(item) {
            return false;
        }
        self.items.insert(item);
        true
    }

    pub fn add_range(&mut self, from: u64, to: u64) {
        for item in from.max(self.base)..to.min(self.ceiling() + 1) {
            self.items.insert(item);
        }
    }

    pub fn remove(&mut self, item: u64) -> bool {
        self.items.remove(&item)
    }

    pub fn contains(&self, item: u64) -> bool {
        self.items.contains(&item)
    }

    pub fn set_base(&mut self, base: u64) {
        self.base = base;
        self.items.clear();
    }

    pub fn rebase(&mut self, base: u64) {
        self.base = base;
        let ceiling = self.ceiling();
        self.items.retain(|&item| item >= base && item <= ceiling);
    }

    pub fn items(&self) -> Vec<u64> {
        self.items.iter().copied().collect()
    }

    pub fn highest(&self) -> Option<u64> {
        self.items.last().copied()
    }

    /// Offset of the highest member plus one.
    pub fn significant_bits(&self) -> u32 {
        self.highest().map_or(0, |top| (top - self.base + 1) as u32)
    }

    pub fn len(&self) -> u32 {
        self.items.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Build the bitmap range holding the same members.
    pub fn to_range<const NBITS: u32, const WORDS: usize>(
        &self,
    ) -> BitmapRange<u64, DefaultDistance, NBITS, WORDS> {
        let mut range = BitmapRange::new(self.base);
        for &item in &self.items {
            range.add(item);
        }
        range
    }

    /// Check that `range` agrees with the model on every observable.
    pub fn matches<const NBITS: u32, const WORDS: usize>(
        &self,
        range: &BitmapRange<u64, DefaultDistance, NBITS, WORDS>,
    ) -> Result<(), String> {
        if range.base() != self.base {
            return Err(format!("base {} != model {}", range.base(), self.base));
        }
        if range.ceiling() != self.ceiling() {
            return Err(format!("ceiling {} != model {}", range.ceiling(), self.ceiling()));
        }
        let got: Vec<u64> = range.iter().collect();
        if got != self.items() {
            return Err(format!("items {:?} != model {:?}", got, self.items()));
        }
        if range.significant_bits() != self.significant_bits() {
            return Err(format!(
                "significant bits {} != model {}",
                range.significant_bits(),
                self.significant_bits()
            ));
        }
        if range.highest() != self.highest() || range.is_empty() != self.is_empty() {
            return Err(format!("highest {:?} != model {:?}", range.highest(), self.highest()));
        }
        if range.len() != self.len() {
            return Err(format!("len {} != model {}", range.len(), self.len()));
        }
        for item in self.base.saturating_sub(2)..=self.ceiling().saturating_add(2) {
            if range.contains(item) != self.contains(item) {
                return Err(format!(
                    "contains({}) {} != model {}",
                    item,
                    range.contains(item),
                    self.contains(item)
                ));
            }
        }
        Ok(())
    }
}
