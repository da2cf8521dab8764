#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
//! Core types for the Arbora layout tree.
//!
//! This crate provides the pieces the block tree is built from:
//! - Delta records: [`Delta`], [`DeltaPath`], [`BlockPayload`], [`ElementPayload`]
//! - Column weights: [`LayoutSpec`] and [`normalize`]
//! - Argument validation: [`Columns`], [`Expander`], [`Tabs`]
//! - Errors: [`LayoutError`]
//! - Configuration: [`LayoutConfig`]

mod block;
mod config;
mod delta;
mod error;
pub mod validation;
mod weights;

pub use block::{BlockKind, BlockState, RootContainer};
pub use config::LayoutConfig;
pub use delta::{BlockPayload, Delta, DeltaPath, DeltaPayload, ElementPayload, Gap};
pub use error::{LayoutError, Result};
pub use validation::{validate_expander, validate_tabs, Columns, Expander, Tabs};
pub use weights::{
    normalize, weights_sum_to_one, LayoutSpec, MIN_WEIGHT_TOLERANCE, WEIGHT_TOLERANCE,
};
