//! Error types for the wire codec.

use thiserror::Error;

use rtps_bitmap_core::BitmapError;

/// Errors that can occur while decoding a bitmap element.
#[derive(Debug, Error)]
pub enum WireError {
    /// The buffer ends before the element does.
    #[error("truncated element: need {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    /// `numBits` exceeds the window width.
    #[error("bitmap too large: {num_bits} bits, max {max}")]
    BitmapTooLarge { num_bits: u32, max: u32 },

    /// The bitmap base is not a valid protocol value.
    #[error("invalid bitmap base: {0}")]
    InvalidBase(String),

    /// The decoded words could not be loaded into the range.
    #[error("bitmap error: {0}")]
    Bitmap(#[from] BitmapError),
}

/// Result type for wire operations.
pub type Result<T> = std::result::Result<T, WireError>;
