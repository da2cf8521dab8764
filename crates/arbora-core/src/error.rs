//! Error types for arbora layout calls.

use crate::block::BlockState;
use crate::delta::DeltaPath;
use thiserror::Error;

/// Result alias used across the arbora crates.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors raised by layout calls.
///
/// Every variant is reported before the block tree or the delta queue is
/// touched, so a failed call never leaves partial output behind.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Column spec is not a positive count or a list of positive weights.
    #[error("invalid column spec: {0}")]
    InvalidSpec(String),

    /// No tab labels were supplied.
    #[error("at least one tab label is required")]
    EmptySpec,

    /// A tab label is not a string.
    #[error("tab label at index {index} must be a string, found {found}")]
    InvalidLabelType {
        /// Position of the offending label
        index: usize,
        /// JSON type name of the offending value
        found: &'static str,
    },

    /// Expander called without a label.
    #[error("expander requires a label")]
    MissingLabel,

    /// Columns nested deeper than the configured limit.
    #[error("columns can only be placed inside other columns up to {max} level(s) of nesting")]
    ColumnsTooDeep {
        /// Configured nesting limit
        max: usize,
    },

    /// Columns placed inside a column of the sidebar.
    #[error("columns cannot be placed inside other columns in the sidebar")]
    SidebarColumnNesting,

    /// Expander placed inside another expander.
    #[error("expanders may not be nested inside other expanders")]
    NestedExpander,

    /// Container cannot be entered in its current lifecycle state.
    #[error("container at {path} cannot be entered while {state}")]
    ContainerUnavailable {
        /// Path of the container
        path: DeltaPath,
        /// State it was found in
        state: BlockState,
    },

    /// Handle was issued by another session or an earlier render pass.
    #[error("container handle does not belong to the current render pass")]
    StaleHandle,

    /// Configuration value out of range or unparsable.
    #[error("config error: {0}")]
    Config(String),

    /// IO error while loading configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LayoutError {
    /// Short machine-readable name of the error class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidSpec(_) => "invalid_spec",
            Self::EmptySpec => "empty_spec",
            Self::InvalidLabelType { .. } => "invalid_label_type",
            Self::MissingLabel => "missing_label",
            Self::ColumnsTooDeep { .. } => "columns_too_deep",
            Self::SidebarColumnNesting => "sidebar_column_nesting",
            Self::NestedExpander => "nested_expander",
            Self::ContainerUnavailable { .. } => "container_unavailable",
            Self::StaleHandle => "stale_handle",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }
}

impl From<toml::de::Error> for LayoutError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}
