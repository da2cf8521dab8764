//! Arena-backed block tree.
//!
//! Containers are owned by the arena and refer to their parent by index, so
//! there is no ownership cycle between a container and its children. Parent
//! links are only walked upwards, for paths and nesting rules.

use arbora_core::{BlockKind, BlockState, DeltaPath, RootContainer};

/// Index of a container in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    /// Arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One child position of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildSlot {
    /// Nested container
    Block(BlockId),
    /// Leaf element
    Element,
}

/// A node of the block tree.
#[derive(Debug, Clone)]
pub struct Container {
    kind: BlockKind,
    parent: Option<BlockId>,
    path: DeltaPath,
    children: Vec<ChildSlot>,
    state: BlockState,
}

impl Container {
    /// Kind tag.
    #[must_use]
    pub const fn kind(&self) -> BlockKind {
        self.kind
    }

    /// Parent container, `None` for roots.
    #[must_use]
    pub const fn parent(&self) -> Option<BlockId> {
        self.parent
    }

    /// Path of this container.
    #[must_use]
    pub const fn path(&self) -> &DeltaPath {
        &self.path
    }

    /// Child slots in insertion order.
    #[must_use]
    pub fn children(&self) -> &[ChildSlot] {
        &self.children
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> BlockState {
        self.state
    }
}

/// Arena of containers, seeded with the root containers.
#[derive(Debug, Clone)]
pub struct BlockTree {
    nodes: Vec<Container>,
}

impl Default for BlockTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockTree {
    /// Create a tree holding only the root containers.
    ///
    /// Roots occupy the first arena slots in [`RootContainer::index`] order
    /// and are always open.
    #[must_use]
    pub fn new() -> Self {
        let nodes = RootContainer::ALL
            .iter()
            .map(|&root| Container {
                kind: BlockKind::Root(root),
                parent: None,
                path: DeltaPath::root(root),
                children: Vec::new(),
                state: BlockState::Open,
            })
            .collect();
        Self { nodes }
    }

    /// Id of a root container.
    #[must_use]
    pub const fn root(&self, root: RootContainer) -> BlockId {
        BlockId(root.index())
    }

    /// Look up a container.
    #[must_use]
    pub fn get(&self, id: BlockId) -> Option<&Container> {
        self.nodes.get(id.0)
    }

    /// Number of containers, roots included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree holds nothing but its roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == RootContainer::ALL.len()
    }

    /// Append a child container under `parent`.
    pub(crate) fn add_block(&mut self, parent: BlockId, kind: BlockKind) -> BlockId {
        let id = BlockId(self.nodes.len());
        let path = self.push_slot(parent, ChildSlot::Block(id));
        self.nodes.push(Container {
            kind,
            parent: Some(parent),
            path,
            children: Vec::new(),
            state: BlockState::Pending,
        });
        id
    }

    /// Append a leaf element slot under `parent`, returning its path.
    pub(crate) fn add_element(&mut self, parent: BlockId) -> DeltaPath {
        self.push_slot(parent, ChildSlot::Element)
    }

    fn push_slot(&mut self, parent: BlockId, slot: ChildSlot) -> DeltaPath {
        let node = &mut self.nodes[parent.0];
        let path = node.path.child(node.children.len());
        node.children.push(slot);
        path
    }

    pub(crate) fn set_state(&mut self, id: BlockId, state: BlockState) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            if !node.kind.is_root() {
                node.state = state;
            }
        }
    }

    /// Iterate over `id` and its ancestors, innermost first.
    pub fn ancestors(&self, id: BlockId) -> impl Iterator<Item = &Container> + '_ {
        std::iter::successors(self.get(id), move |node| {
            node.parent.and_then(|parent| self.get(parent))
        })
    }

    /// Number of columns enclosing `id`, counting `id` itself.
    #[must_use]
    pub fn column_depth(&self, id: BlockId) -> usize {
        self.ancestors(id)
            .filter(|node| node.kind == BlockKind::Column)
            .count()
    }

    /// Check if `id` or one of its ancestors has `kind`.
    #[must_use]
    pub fn within(&self, id: BlockId, kind: BlockKind) -> bool {
        self.ancestors(id).any(|node| node.kind == kind)
    }

    /// Root container `id` lives under.
    #[must_use]
    pub fn root_of(&self, id: BlockId) -> Option<RootContainer> {
        self.get(id).and_then(|node| node.path.root_container())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tree_has_open_roots() {
        let tree = BlockTree::new();
        assert_eq!(tree.len(), 2);
        assert!(tree.is_empty());
        for root in RootContainer::ALL {
            let node = tree.get(tree.root(root)).unwrap();
            assert_eq!(node.kind(), BlockKind::Root(root));
            assert_eq!(node.state(), BlockState::Open);
            assert_eq!(node.path(), &DeltaPath::root(root));
        }
    }

    #[test]
    fn test_child_paths_follow_slots() {
        let mut tree = BlockTree::new();
        let main = tree.root(RootContainer::Main);
        let first = tree.add_element(main);
        let block = tree.add_block(main, BlockKind::Vertical);
        let nested = tree.add_element(block);

        assert_eq!(first.as_slice(), &[0, 0]);
        assert_eq!(tree.get(block).unwrap().path().as_slice(), &[0, 1]);
        assert_eq!(nested.as_slice(), &[0, 1, 0]);
        assert_eq!(
            tree.get(main).unwrap().children(),
            &[ChildSlot::Element, ChildSlot::Block(block)]
        );
    }

    #[test]
    fn test_sidebar_paths() {
        let mut tree = BlockTree::new();
        let sidebar = tree.root(RootContainer::Sidebar);
        let block = tree.add_block(sidebar, BlockKind::Expandable);
        assert_eq!(tree.get(block).unwrap().path().as_slice(), &[1, 0]);
        assert_eq!(tree.root_of(block), Some(RootContainer::Sidebar));
    }

    #[test]
    fn test_new_blocks_are_pending() {
        let mut tree = BlockTree::new();
        let main = tree.root(RootContainer::Main);
        let block = tree.add_block(main, BlockKind::Expandable);
        assert_eq!(tree.get(block).unwrap().state(), BlockState::Pending);
        assert_eq!(tree.get(block).unwrap().parent(), Some(main));
    }

    #[test]
    fn test_roots_stay_open() {
        let mut tree = BlockTree::new();
        let main = tree.root(RootContainer::Main);
        tree.set_state(main, BlockState::Closed);
        assert_eq!(tree.get(main).unwrap().state(), BlockState::Open);
    }

    #[test]
    fn test_column_depth_and_within() {
        let mut tree = BlockTree::new();
        let main = tree.root(RootContainer::Main);
        let row = tree.add_block(main, BlockKind::Horizontal);
        let col = tree.add_block(row, BlockKind::Column);
        let exp = tree.add_block(col, BlockKind::Expandable);
        let inner_row = tree.add_block(exp, BlockKind::Horizontal);
        let inner_col = tree.add_block(inner_row, BlockKind::Column);

        assert_eq!(tree.column_depth(main), 0);
        assert_eq!(tree.column_depth(col), 1);
        assert_eq!(tree.column_depth(exp), 1);
        assert_eq!(tree.column_depth(inner_col), 2);
        assert!(tree.within(inner_col, BlockKind::Expandable));
        assert!(!tree.within(col, BlockKind::Expandable));
        assert_eq!(tree.ancestors(inner_col).count(), 6);
    }
}
