//! Block kinds and lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level container a delta path starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootContainer {
    /// Main app area
    #[default]
    Main,
    /// Sidebar
    Sidebar,
}

impl RootContainer {
    /// All root containers in path-index order.
    pub const ALL: [Self; 2] = [Self::Main, Self::Sidebar];

    /// Index used as the first entry of a delta path.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Main => 0,
            Self::Sidebar => 1,
        }
    }

    /// Root container for a path index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Main),
            1 => Some(Self::Sidebar),
            _ => None,
        }
    }
}

/// Kind tag of a container in the block tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// One of the root containers
    Root(RootContainer),
    /// Generic vertical container
    Vertical,
    /// Horizontal group holding columns
    Horizontal,
    /// Column inside a horizontal group
    Column,
    /// Collapsible panel
    Expandable,
    /// Group holding tabs
    TabContainer,
    /// Single tab
    Tab,
}

impl BlockKind {
    /// Check if this is a root container.
    #[must_use]
    pub const fn is_root(self) -> bool {
        matches!(self, Self::Root(_))
    }

    /// Check if this kind only exists to hold generated children.
    ///
    /// Group blocks are closed as soon as their children exist.
    #[must_use]
    pub const fn is_group(self) -> bool {
        matches!(self, Self::Horizontal | Self::TabContainer)
    }
}

/// Lifecycle state of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockState {
    /// Created but never entered
    #[default]
    Pending,
    /// On the active container stack, accepting children
    Open,
    /// Scope exited; no further children
    Closed,
}

impl BlockState {
    /// Check if the container may be entered.
    #[must_use]
    pub const fn can_enter(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "pending",
            Self::Open => "open",
            Self::Closed => "closed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_index_roundtrip() {
        for root in RootContainer::ALL {
            assert_eq!(RootContainer::from_index(root.index()), Some(root));
        }
        assert_eq!(RootContainer::from_index(2), None);
    }

    #[test]
    fn test_group_kinds() {
        assert!(BlockKind::Horizontal.is_group());
        assert!(BlockKind::TabContainer.is_group());
        assert!(!BlockKind::Column.is_group());
        assert!(!BlockKind::Expandable.is_group());
        assert!(BlockKind::Root(RootContainer::Sidebar).is_root());
    }

    #[test]
    fn test_only_pending_can_enter() {
        assert!(BlockState::Pending.can_enter());
        assert!(!BlockState::Open.can_enter());
        assert!(!BlockState::Closed.can_enter());
        assert_eq!(BlockState::default(), BlockState::Pending);
    }
}
