//! Delta records emitted for every addition to the block tree.
//!
//! A [`Delta`] pairs the position of the new node (its [`DeltaPath`]) with a
//! payload describing either a block (container) or a leaf element. Deltas
//! are immutable once created; their order in the queue is the order the
//! client must apply them in.

use crate::block::{BlockKind, RootContainer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a node in the block tree.
///
/// The first entry is the root container index, every following entry is a
/// child index within its parent.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeltaPath(Vec<usize>);

impl DeltaPath {
    /// Path of a root container.
    #[must_use]
    pub fn root(root: RootContainer) -> Self {
        Self(vec![root.index()])
    }

    /// Path of the child at `index` below this path.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = Vec::with_capacity(self.0.len() + 1);
        indices.extend_from_slice(&self.0);
        indices.push(index);
        Self(indices)
    }

    /// Path of the parent, or `None` for a root path.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Root container this path starts from.
    #[must_use]
    pub fn root_container(&self) -> Option<RootContainer> {
        self.0.first().copied().and_then(RootContainer::from_index)
    }

    /// Index within the parent (last entry).
    #[must_use]
    pub fn last_index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Number of entries, root included.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Raw indices.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Check if `self` lies strictly below `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, ancestor: &Self) -> bool {
        self.0.len() > ancestor.0.len() && self.0.starts_with(&ancestor.0)
    }
}

impl From<Vec<usize>> for DeltaPath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for DeltaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// Spacing between columns of a horizontal group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gap {
    /// Narrow gutter
    #[default]
    Small,
    /// Medium gutter
    Medium,
    /// Wide gutter
    Large,
}

/// Payload of a block delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockPayload {
    /// Generic vertical container
    Vertical,
    /// Horizontal group; its columns follow immediately
    Horizontal {
        /// Column gutter
        gap: Gap,
    },
    /// Column with a normalized width weight
    Column {
        /// Fraction of the group width, in (0, 1]
        weight: f64,
        /// Column gutter
        gap: Gap,
    },
    /// Collapsible panel
    Expandable {
        /// Header label
        label: String,
        /// Whether the panel starts expanded
        expanded: bool,
    },
    /// Tab group; its tabs follow immediately
    TabContainer,
    /// Single tab
    Tab {
        /// Tab label
        label: String,
    },
}

impl BlockPayload {
    /// Block kind this payload creates.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        match self {
            Self::Vertical => BlockKind::Vertical,
            Self::Horizontal { .. } => BlockKind::Horizontal,
            Self::Column { .. } => BlockKind::Column,
            Self::Expandable { .. } => BlockKind::Expandable,
            Self::TabContainer => BlockKind::TabContainer,
            Self::Tab { .. } => BlockKind::Tab,
        }
    }

    /// Column weight, if this is a column.
    #[must_use]
    pub const fn column_weight(&self) -> Option<f64> {
        match self {
            Self::Column { weight, .. } => Some(*weight),
            _ => None,
        }
    }

    /// Label of an expander or tab.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Expandable { label, .. } | Self::Tab { label } => Some(label),
            _ => None,
        }
    }
}

/// Payload of a leaf element delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementPayload {
    /// Markdown-formatted text
    Markdown {
        /// Markdown source
        body: String,
    },
    /// Fixed-width plain text
    Text {
        /// Text content
        body: String,
    },
}

impl ElementPayload {
    /// Body text of the element.
    #[must_use]
    pub fn body(&self) -> &str {
        match self {
            Self::Markdown { body } | Self::Text { body } => body,
        }
    }
}

/// Block or element payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaPayload {
    /// A container was added
    AddBlock(BlockPayload),
    /// A leaf element was added
    NewElement(ElementPayload),
}

/// One ordered addition to the block tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    path: DeltaPath,
    payload: DeltaPayload,
}

impl Delta {
    /// Create a block delta.
    #[must_use]
    pub const fn block(path: DeltaPath, block: BlockPayload) -> Self {
        Self {
            path,
            payload: DeltaPayload::AddBlock(block),
        }
    }

    /// Create an element delta.
    #[must_use]
    pub const fn element(path: DeltaPath, element: ElementPayload) -> Self {
        Self {
            path,
            payload: DeltaPayload::NewElement(element),
        }
    }

    /// Path of the added node.
    #[must_use]
    pub const fn path(&self) -> &DeltaPath {
        &self.path
    }

    /// Payload of the delta.
    #[must_use]
    pub const fn payload(&self) -> &DeltaPayload {
        &self.payload
    }

    /// Block payload, if this delta adds a block.
    #[must_use]
    pub const fn add_block(&self) -> Option<&BlockPayload> {
        match &self.payload {
            DeltaPayload::AddBlock(block) => Some(block),
            DeltaPayload::NewElement(_) => None,
        }
    }

    /// Element payload, if this delta adds an element.
    #[must_use]
    pub const fn new_element(&self) -> Option<&ElementPayload> {
        match &self.payload {
            DeltaPayload::NewElement(element) => Some(element),
            DeltaPayload::AddBlock(_) => None,
        }
    }

    /// Check if this delta adds a block.
    #[must_use]
    pub const fn is_block(&self) -> bool {
        matches!(self.payload, DeltaPayload::AddBlock(_))
    }
}
