//! Per-session layout state and the layout entry points.
//!
//! A [`Session`] owns one block tree, the stack of active containers and a
//! delta sink. Every layout call validates its arguments first, then mutates
//! the tree and emits deltas in call order:
//!
//! ```
//! use arbora_layout::Session;
//!
//! let mut session = Session::new();
//! let columns = session.columns(vec![3.0_f64, 2.0, 1.0])?;
//! for column in columns {
//!     let mut scope = session.enter(column)?;
//!     scope.write("Hello");
//! }
//! // 1 horizontal block + 3 columns + 3 elements
//! assert_eq!(session.sink().len(), 7);
//! # Ok::<(), arbora_core::LayoutError>(())
//! ```

use crate::queue::{DeltaQueue, DeltaSink};
use crate::scope::ContainerScope;
use crate::tree::{BlockId, BlockTree, Container};
use arbora_core::{
    weights_sum_to_one, BlockKind, BlockPayload, BlockState, Columns, Delta, DeltaPath,
    ElementPayload, Expander, LayoutConfig, LayoutError, LayoutSpec, Result, RootContainer, Tabs,
    WEIGHT_TOLERANCE,
};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of render pass ids; unique across every session in the process.
static NEXT_RUN: AtomicU64 = AtomicU64::new(1);

fn next_run() -> u64 {
    NEXT_RUN.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a container created during a render pass.
///
/// Handles are only valid in the session and render pass that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerHandle {
    id: BlockId,
    run: u64,
}

impl ContainerHandle {
    pub(crate) const fn new(id: BlockId, run: u64) -> Self {
        Self { id, run }
    }

    /// Arena id of the container.
    #[must_use]
    pub const fn id(self) -> BlockId {
        self.id
    }
}

/// Layout state of one user session.
#[derive(Debug)]
pub struct Session<S: DeltaSink = DeltaQueue> {
    config: LayoutConfig,
    tree: BlockTree,
    stack: Vec<BlockId>,
    sink: S,
    run: u64,
}

impl Default for Session<DeltaQueue> {
    fn default() -> Self {
        Self::new()
    }
}

impl Session<DeltaQueue> {
    /// Session with default config and an in-memory queue.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    /// Session with `config` and an in-memory queue.
    #[must_use]
    pub fn with_config(config: LayoutConfig) -> Self {
        Self::with_sink(config, DeltaQueue::new())
    }

    /// End the render pass: reset the tree and take every queued delta.
    pub fn finish_run(&mut self) -> Vec<Delta> {
        self.reset();
        let deltas = self.sink.drain();
        tracing::debug!(deltas = deltas.len(), "render pass finished");
        deltas
    }
}

impl<S: DeltaSink> Session<S> {
    /// Session emitting into a custom sink.
    pub fn with_sink(config: LayoutConfig, sink: S) -> Self {
        let tree = BlockTree::new();
        let stack = vec![tree.root(RootContainer::Main)];
        Self {
            config,
            tree,
            stack,
            sink,
            run: next_run(),
        }
    }

    // === Accessors ===

    /// Layout rules of this session.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Delta sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable delta sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the session, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Block tree of the current render pass.
    #[must_use]
    pub const fn tree(&self) -> &BlockTree {
        &self.tree
    }

    /// Id of the current render pass.
    #[must_use]
    pub const fn run_id(&self) -> u64 {
        self.run
    }

    /// Handle to the main area.
    #[must_use]
    pub const fn main(&self) -> ContainerHandle {
        self.handle(self.tree.root(RootContainer::Main))
    }

    /// Handle to the sidebar.
    #[must_use]
    pub const fn sidebar(&self) -> ContainerHandle {
        self.handle(self.tree.root(RootContainer::Sidebar))
    }

    /// Container new blocks and elements currently attach to.
    #[must_use]
    pub fn active(&self) -> ContainerHandle {
        self.handle(self.active_id())
    }

    /// Number of entries on the active container stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Lifecycle state of a container.
    pub fn block_state(&self, handle: ContainerHandle) -> Result<BlockState> {
        Ok(self.resolve(handle)?.state())
    }

    /// Kind of a container.
    pub fn block_kind(&self, handle: ContainerHandle) -> Result<BlockKind> {
        Ok(self.resolve(handle)?.kind())
    }

    /// Path of a container.
    pub fn path(&self, handle: ContainerHandle) -> Result<DeltaPath> {
        Ok(self.resolve(handle)?.path().clone())
    }

    // === Layout entry points ===

    /// Insert a row of columns.
    ///
    /// `spec` is a column count or a list of relative widths. Returns one
    /// handle per column, left to right.
    pub fn columns(&mut self, spec: impl Into<LayoutSpec>) -> Result<Vec<ContainerHandle>> {
        self.add_columns(&Columns::new(spec))
    }

    /// Insert a row of columns from a script-supplied spec value.
    pub fn columns_from_value(&mut self, spec: &Value) -> Result<Vec<ContainerHandle>> {
        let columns = Columns::from_value(spec).map_err(|e| Self::rejected("columns", e))?;
        self.add_columns(&columns)
    }

    /// Insert a row of columns with explicit options.
    pub fn add_columns(&mut self, columns: &Columns) -> Result<Vec<ContainerHandle>> {
        let weights = columns
            .validate()
            .and_then(|weights| self.check_column_nesting().map(|()| weights))
            .map_err(|e| Self::rejected("columns", e))?;
        debug_assert!(weights_sum_to_one(&weights, WEIGHT_TOLERANCE));

        let gap = columns.gap_value().unwrap_or(self.config.default_gap);
        let columns = weights
            .into_iter()
            .map(|weight| BlockPayload::Column { weight, gap });
        Ok(self.emit_group(BlockPayload::Horizontal { gap }, columns))
    }

    /// Insert a collapsed expander.
    pub fn expander(&mut self, label: impl Into<String>) -> Result<ContainerHandle> {
        self.add_expander(&Expander::new(label))
    }

    /// Insert an expander with explicit options.
    pub fn add_expander(&mut self, expander: &Expander) -> Result<ContainerHandle> {
        let payload = expander
            .validate()
            .and_then(|payload| self.check_expander_nesting().map(|()| payload))
            .map_err(|e| Self::rejected("expander", e))?;
        let parent = self.active_id();
        let id = self.emit_block(parent, payload);
        Ok(self.handle(id))
    }

    /// Insert a tab group. Returns one handle per tab, in label order.
    pub fn tabs<I, T>(&mut self, labels: I) -> Result<Vec<ContainerHandle>>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.add_tabs(&Tabs::new(labels))
    }

    /// Insert a tab group from prepared arguments.
    pub fn add_tabs(&mut self, tabs: &Tabs) -> Result<Vec<ContainerHandle>> {
        let labels = tabs.validate().map_err(|e| Self::rejected("tabs", e))?;
        let tabs = labels.into_iter().map(|label| BlockPayload::Tab { label });
        Ok(self.emit_group(BlockPayload::TabContainer, tabs))
    }

    /// Insert a generic vertical container.
    pub fn container(&mut self) -> ContainerHandle {
        let parent = self.active_id();
        let id = self.emit_block(parent, BlockPayload::Vertical);
        self.handle(id)
    }

    // === Elements ===

    /// Write markdown into the active container.
    pub fn markdown(&mut self, body: impl Into<String>) -> DeltaPath {
        self.emit_element(ElementPayload::Markdown { body: body.into() })
    }

    /// Write fixed-width text into the active container.
    pub fn text(&mut self, body: impl Into<String>) -> DeltaPath {
        self.emit_element(ElementPayload::Text { body: body.into() })
    }

    /// Write a string into the active container; rendered as markdown.
    pub fn write(&mut self, body: impl Into<String>) -> DeltaPath {
        self.markdown(body)
    }

    // === Scopes ===

    /// Make `handle` the active container until the returned scope drops.
    ///
    /// Root containers may be entered any number of times; every other
    /// container can be entered once.
    pub fn enter(&mut self, handle: ContainerHandle) -> Result<ContainerScope<'_, S>> {
        let node = self.resolve(handle)?;
        let id = handle.id;
        if !node.kind().is_root() {
            if !node.state().can_enter() {
                let err = LayoutError::ContainerUnavailable {
                    path: node.path().clone(),
                    state: node.state(),
                };
                return Err(Self::rejected("enter", err));
            }
            self.tree.set_state(id, BlockState::Open);
        }
        self.stack.push(id);
        tracing::trace!(path = %self.node_path(id), depth = self.stack.len(), "enter container");
        Ok(ContainerScope::new(self, id))
    }

    /// Run `f` with `handle` as the active container.
    ///
    /// The container is exited on every path out of `f`, including errors
    /// and panics.
    pub fn with_container<T, F>(&mut self, handle: ContainerHandle, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let mut scope = self.enter(handle)?;
        let session: &mut Self = &mut scope;
        f(session)
    }

    // === Lifecycle ===

    /// Discard the block tree and active stack for a new render pass.
    ///
    /// Handles issued before the reset become stale. The sink is left alone.
    pub fn reset(&mut self) {
        self.tree = BlockTree::new();
        self.stack.clear();
        self.stack.push(self.tree.root(RootContainer::Main));
        self.run = next_run();
    }

    /// Pop `id` off the active stack. Called by [`ContainerScope`] on drop.
    pub(crate) fn exit(&mut self, id: BlockId, run: u64) {
        if run != self.run {
            // Reset inside the scope already replaced the stack.
            return;
        }
        if self.stack.len() > 1 && self.stack.last() == Some(&id) {
            self.stack.pop();
            self.tree.set_state(id, BlockState::Closed);
            tracing::trace!(path = %self.node_path(id), depth = self.stack.len(), "exit container");
        } else {
            tracing::warn!(path = %self.node_path(id), "exit does not match the active container");
        }
    }

    // === Internals ===

    const fn handle(&self, id: BlockId) -> ContainerHandle {
        ContainerHandle::new(id, self.run)
    }

    fn active_id(&self) -> BlockId {
        self.stack
            .last()
            .copied()
            .unwrap_or_else(|| self.tree.root(RootContainer::Main))
    }

    fn resolve(&self, handle: ContainerHandle) -> Result<&Container> {
        if handle.run != self.run {
            return Err(LayoutError::StaleHandle);
        }
        self.tree.get(handle.id).ok_or(LayoutError::StaleHandle)
    }

    fn node_path(&self, id: BlockId) -> DeltaPath {
        self.tree
            .get(id)
            .map(|node| node.path().clone())
            .unwrap_or_default()
    }

    fn check_column_nesting(&self) -> Result<()> {
        let active = self.active_id();
        let depth = self.tree.column_depth(active);
        if depth == 0 {
            return Ok(());
        }
        if self.tree.root_of(active) == Some(RootContainer::Sidebar) {
            return Err(LayoutError::SidebarColumnNesting);
        }
        if depth > self.config.max_column_nesting {
            return Err(LayoutError::ColumnsTooDeep {
                max: self.config.max_column_nesting,
            });
        }
        Ok(())
    }

    fn check_expander_nesting(&self) -> Result<()> {
        if !self.config.allow_nested_expanders
            && self.tree.within(self.active_id(), BlockKind::Expandable)
        {
            return Err(LayoutError::NestedExpander);
        }
        Ok(())
    }

    fn emit_block(&mut self, parent: BlockId, payload: BlockPayload) -> BlockId {
        let kind = payload.kind();
        let id = self.tree.add_block(parent, kind);
        let path = self.node_path(id);
        tracing::debug!(path = %path, kind = ?kind, "add block");
        self.sink.enqueue(Delta::block(path, payload));
        id
    }

    /// Emit a group block followed by its children. Group kinds are closed
    /// once their children exist; only the children can be entered.
    fn emit_group<I>(&mut self, group: BlockPayload, children: I) -> Vec<ContainerHandle>
    where
        I: IntoIterator<Item = BlockPayload>,
    {
        let parent = self.active_id();
        let kind = group.kind();
        let group_id = self.emit_block(parent, group);
        let handles = children
            .into_iter()
            .map(|child| {
                let id = self.emit_block(group_id, child);
                self.handle(id)
            })
            .collect();
        if kind.is_group() {
            self.tree.set_state(group_id, BlockState::Closed);
        }
        handles
    }

    fn emit_element(&mut self, element: ElementPayload) -> DeltaPath {
        let parent = self.active_id();
        let path = self.tree.add_element(parent);
        tracing::debug!(path = %path, "new element");
        self.sink.enqueue(Delta::element(path.clone(), element));
        path
    }

    fn rejected(call: &str, err: LayoutError) -> LayoutError {
        tracing::warn!(call, error = %err, "layout call rejected");
        err
    }
}
