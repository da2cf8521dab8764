//! Argument validation for layout calls.
//!
//! Layout calls take loosely typed script arguments. The builders here hold
//! those arguments as supplied and resolve them with `validate`, which is the
//! only way to obtain the parameters the block tree consumes. Nothing is
//! mutated until validation succeeds.

use crate::delta::{BlockPayload, Gap};
use crate::error::{LayoutError, Result};
use crate::weights::{normalize, LayoutSpec};
use serde_json::Value;

/// JSON type name of a value, used in error messages.
#[must_use]
pub const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Validate tab labels.
///
/// `None` means the labels argument was omitted entirely.
///
/// # Errors
///
/// - [`LayoutError::EmptySpec`] if labels are missing or empty
/// - [`LayoutError::InvalidLabelType`] if any label is not a string; numbers
///   and booleans are not coerced
pub fn validate_tabs(labels: Option<&[Value]>) -> Result<Vec<String>> {
    let labels = match labels {
        Some(labels) if !labels.is_empty() => labels,
        _ => return Err(LayoutError::EmptySpec),
    };
    labels
        .iter()
        .enumerate()
        .map(|(index, label)| match label {
            Value::String(s) => Ok(s.clone()),
            other => Err(LayoutError::InvalidLabelType {
                index,
                found: json_type_name(other),
            }),
        })
        .collect()
}

/// Validate an expander label.
///
/// # Errors
///
/// Returns [`LayoutError::MissingLabel`] if no label was given.
pub fn validate_expander(label: Option<&str>) -> Result<&str> {
    label.ok_or(LayoutError::MissingLabel)
}

/// Arguments of a `columns` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    spec: LayoutSpec,
    gap: Option<Gap>,
}

impl Columns {
    /// Columns for a count or weight list.
    #[must_use]
    pub fn new(spec: impl Into<LayoutSpec>) -> Self {
        Self {
            spec: spec.into(),
            gap: None,
        }
    }

    /// Columns from a script-supplied spec value.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpec`] if the value is neither an
    /// integer nor an array of numbers.
    pub fn from_value(spec: &Value) -> Result<Self> {
        Ok(Self::new(LayoutSpec::try_from(spec)?))
    }

    /// Set the gutter between columns.
    #[must_use]
    pub const fn gap(mut self, gap: Gap) -> Self {
        self.gap = Some(gap);
        self
    }

    /// Requested spec.
    #[must_use]
    pub const fn spec(&self) -> &LayoutSpec {
        &self.spec
    }

    /// Explicit gap, if one was set.
    #[must_use]
    pub const fn gap_value(&self) -> Option<Gap> {
        self.gap
    }

    /// Resolve the normalized column weights.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidSpec`] for a malformed spec.
    pub fn validate(&self) -> Result<Vec<f64>> {
        normalize(&self.spec)
    }
}

/// Arguments of an `expander` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expander {
    label: Option<String>,
    expanded: bool,
}

impl Expander {
    /// Expander with a label, collapsed by default.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            expanded: false,
        }
    }

    /// Set whether the panel starts expanded.
    #[must_use]
    pub const fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    /// Label, if one was given.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Resolve into the block payload.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::MissingLabel`] if no label was given.
    pub fn validate(&self) -> Result<BlockPayload> {
        let label = validate_expander(self.label())?;
        Ok(BlockPayload::Expandable {
            label: label.to_string(),
            expanded: self.expanded,
        })
    }
}

/// Arguments of a `tabs` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tabs {
    labels: Option<Vec<Value>>,
}

impl Tabs {
    /// Tabs from any sequence of label values.
    ///
    /// Labels are kept as supplied; non-string values are rejected by
    /// [`Tabs::validate`].
    #[must_use]
    pub fn new<I, T>(labels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            labels: Some(labels.into_iter().map(Into::into).collect()),
        }
    }

    /// Number of labels supplied.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.as_ref().map_or(0, Vec::len)
    }

    /// Check if no labels were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve the tab labels.
    ///
    /// # Errors
    ///
    /// See [`validate_tabs`].
    pub fn validate(&self) -> Result<Vec<String>> {
        validate_tabs(self.labels.as_deref())
    }
}
