//! Item and distance contracts for bitmap ranges.
//!
//! A range only needs two things from its items: an ordering, and a way to
//! step forward by a small unsigned offset. Measuring the offset between two
//! items is a separate, zero-sized [`Distance`] type so the same item type can
//! be paired with different distance rules.

/// An item that can be tracked in a [`BitmapRange`](crate::BitmapRange).
pub trait BitmapItem: Copy + PartialOrd {
    /// Return the item `n` positions after `self`.
    fn advance(self, n: u32) -> Self;
}

/// Unsigned 32-bit distance between two items.
pub trait Distance<T> {
    /// Compute `to - from`.
    ///
    /// Returns `None` when `to < from` or the distance does not fit in 32 bits.
    fn distance(to: T, from: T) -> Option<u32>;
}

/// Distance by plain subtraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultDistance;

macro_rules! impl_unsigned_item {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BitmapItem for $ty {
                #[inline]
                fn advance(self, n: u32) -> Self {
                    self.wrapping_add(n as $ty)
                }
            }

            impl Distance<$ty> for DefaultDistance {
                #[inline]
                fn distance(to: $ty, from: $ty) -> Option<u32> {
                    to.checked_sub(from).and_then(|d| u32::try_from(d).ok())
                }
            }
        )*
    };
}

impl_unsigned_item!(u32, u64, usize);

// u16 cannot hold an arbitrary u32 offset, so it widens before wrapping.
impl BitmapItem for u16 {
    #[inline]
    fn advance(self, n: u32) -> Self {
        (u32::from(self).wrapping_add(n)) as u16
    }
}

impl Distance<u16> for DefaultDistance {
    #[inline]
    fn distance(to: u16, from: u16) -> Option<u32> {
        to.checked_sub(from).map(u32::from)
    }
}
