//! # RTPS Bitmap Testkit
//!
//! Testing utilities for RTPS bitmap ranges.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Reference model**: [`ModelRange`], a `BTreeSet`-backed window used as
//!   the oracle in property tests
//! - **Generators**: Proptest strategies, including scripted [`Op`] sequences
//! - **Golden vectors**: Known sets with their exact wire bytes
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use rtps_bitmap_core::BitmapRange;
//! use rtps_bitmap_testkit::{generators, ModelRange};
//!
//! proptest! {
//!     #[test]
//!     fn range_matches_model(start in generators::base(), script in generators::ops(256, 50)) {
//!         let mut range = BitmapRange::<u64>::new(start);
//!         let mut model = ModelRange::new(start, 256);
//!         for op in script {
//!             op.apply(&mut range, &mut model);
//!             prop_assert_eq!(model.matches(&range), Ok(()));
//!         }
//!     }
//! }
//! ```
//!
//! ## Golden Vectors
//!
//! ```rust
//! use rtps_bitmap_testkit::vectors::{all_vectors, set_from_vector};
//!
//! for vector in all_vectors() {
//!     let set = set_from_vector(&vector);
//!     assert_eq!(set.iter().count(), vector.items.len());
//! }
//! ```

pub mod generators;
pub mod model;
pub mod vectors;

pub use generators::Op;
pub use model::ModelRange;
pub use vectors::{all_vectors, set_from_vector, GoldenVector};
