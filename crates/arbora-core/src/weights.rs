//! Column weight normalization.
//!
//! A column layout is requested either as a count (`3` equal columns) or as a
//! list of relative widths (`[3, 2, 1]`). Both forms resolve here, once, into
//! fractional weights that sum to 1.0 and keep the requested order.

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default absolute tolerance for "weights sum to one" checks.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Smallest accepted tolerance; tighter bounds are below the rounding error
/// of summing normalized weights.
pub const MIN_WEIGHT_TOLERANCE: f64 = 1e-12;

/// Requested column layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutSpec {
    /// N equal-width columns
    Count(usize),
    /// Relative widths, one per column
    Weights(Vec<f64>),
}

impl LayoutSpec {
    /// Number of columns this spec asks for.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Count(n) => *n,
            Self::Weights(w) => w.len(),
        }
    }

    /// Check if the spec asks for no columns at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<usize> for LayoutSpec {
    fn from(n: usize) -> Self {
        Self::Count(n)
    }
}

impl From<Vec<f64>> for LayoutSpec {
    fn from(weights: Vec<f64>) -> Self {
        Self::Weights(weights)
    }
}

impl From<&[f64]> for LayoutSpec {
    fn from(weights: &[f64]) -> Self {
        Self::Weights(weights.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for LayoutSpec {
    fn from(weights: [f64; N]) -> Self {
        Self::Weights(weights.to_vec())
    }
}

impl TryFrom<&Value> for LayoutSpec {
    type Error = LayoutError;

    /// Resolve a script-supplied value: an integer is a count, an array of
    /// numbers is a weight list. Anything else is rejected.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Self::Count)
                .ok_or_else(|| spec_type_error(value)),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_f64().ok_or_else(|| spec_type_error(item)))
                .collect::<Result<Vec<_>>>()
                .map(Self::Weights),
            _ => Err(spec_type_error(value)),
        }
    }
}

fn spec_type_error(value: &Value) -> LayoutError {
    LayoutError::InvalidSpec(format!(
        "expected a positive integer or a list of positive numbers, got {value}"
    ))
}

/// Normalize a layout spec into column weights.
///
/// `Count(n)` yields `n` weights of exactly `1.0 / n`. `Weights(w)` yields
/// `w[i] / sum(w)` in input order. When `sum(w)` overflows, the weights are
/// first scaled by the largest one.
///
/// # Errors
///
/// Returns [`LayoutError::InvalidSpec`] for a zero count, an empty list, any
/// weight that is not a finite positive number, or a weight so small next to
/// the others that its share rounds to zero.
pub fn normalize(spec: &LayoutSpec) -> Result<Vec<f64>> {
    match spec {
        LayoutSpec::Count(0) => Err(LayoutError::InvalidSpec(
            "column count must be at least 1".to_string(),
        )),
        LayoutSpec::Count(n) => {
            let weight = 1.0 / *n as f64;
            Ok(vec![weight; *n])
        }
        LayoutSpec::Weights(weights) => {
            if weights.is_empty() {
                return Err(LayoutError::InvalidSpec(
                    "weight list must not be empty".to_string(),
                ));
            }
            if let Some((index, w)) = weights
                .iter()
                .enumerate()
                .find(|(_, w)| !w.is_finite() || **w <= 0.0)
            {
                return Err(LayoutError::InvalidSpec(format!(
                    "weight at index {index} must be a positive number, got {w}"
                )));
            }
            let total: f64 = weights.iter().sum();
            let normalized: Vec<f64> = if total.is_finite() {
                weights.iter().map(|w| w / total).collect()
            } else {
                let max = weights.iter().copied().fold(0.0_f64, f64::max);
                let scaled: Vec<f64> = weights.iter().map(|w| w / max).collect();
                let scaled_total: f64 = scaled.iter().sum();
                scaled.iter().map(|w| w / scaled_total).collect()
            };
            if let Some(index) = normalized
                .iter()
                .position(|w| !w.is_finite() || *w <= 0.0)
            {
                return Err(LayoutError::InvalidSpec(format!(
                    "weight at index {index} is too small relative to the other weights"
                )));
            }
            Ok(normalized)
        }
    }
}

/// Check that weights sum to 1.0 within `tolerance`.
#[must_use]
pub fn weights_sum_to_one(weights: &[f64], tolerance: f64) -> bool {
    let total: f64 = weights.iter().sum();
    (total - 1.0).abs() <= tolerance
}
