#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::float_cmp)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
//! Testing harness for Arbora layouts.
//!
//! Drive a [`Session`](arbora_layout::Session) through a layout script and
//! assert on the deltas it queued:
//!
//! ```
//! use arbora_test::DeltaHarness;
//!
//! let mut harness = DeltaHarness::new();
//! harness.run(|session| {
//!     session.columns(vec![3.0_f64, 2.0, 1.0])?;
//!     Ok(())
//! })?;
//! harness
//!     .assert_delta_count(4)
//!     .assert_column_weights(&[3.0 / 6.0, 2.0 / 6.0, 1.0 / 6.0]);
//! # Ok::<(), arbora_core::LayoutError>(())
//! ```

mod harness;

pub use harness::DeltaHarness;
