//! Error types for the bitmap core.

use thiserror::Error;

/// Errors that can occur when loading bitmap state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitmapError {
    /// The word buffer handed to `restore` is shorter than the declared length needs.
    #[error("short word buffer: need {needed} words, got {supplied}")]
    ShortWordBuffer { needed: usize, supplied: usize },
}
