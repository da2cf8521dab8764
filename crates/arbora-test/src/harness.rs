//! Delta-queue harness.

use arbora_core::{
    weights_sum_to_one, BlockKind, BlockPayload, Delta, DeltaPath, ElementPayload, LayoutConfig,
    Result,
};
use arbora_layout::Session;
use serde_json::Value;

/// Test harness wrapping one session and its delta queue.
#[derive(Debug, Default)]
pub struct DeltaHarness {
    session: Session,
}

impl DeltaHarness {
    /// Create a harness with default layout rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a harness with custom layout rules.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            session: Session::with_config(config),
        }
    }

    /// Session under test.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session under test.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run a layout script against the session.
    pub fn run<T, F>(&mut self, script: F) -> Result<T>
    where
        F: FnOnce(&mut Session) -> Result<T>,
    {
        script(&mut self.session)
    }

    /// End the render pass, returning the queued deltas.
    pub fn finish_run(&mut self) -> Vec<Delta> {
        self.session.finish_run()
    }

    // === Queries ===

    /// Every queued delta, oldest first.
    pub fn get_all_deltas_from_queue(&self) -> &[Delta] {
        self.session.sink().as_slice()
    }

    /// Delta at `index`; negative indices count from the end (`-1` is the
    /// most recent delta).
    pub fn get_delta_from_queue(&self, index: isize) -> Option<&Delta> {
        let deltas = self.get_all_deltas_from_queue();
        let resolved = if index < 0 {
            deltas.len().checked_sub(index.unsigned_abs())?
        } else {
            index.unsigned_abs()
        };
        deltas.get(resolved)
    }

    /// Block payloads in emission order.
    pub fn block_deltas(&self) -> Vec<&BlockPayload> {
        self.session.sink().blocks().collect()
    }

    /// Element payloads in emission order.
    pub fn element_deltas(&self) -> Vec<&ElementPayload> {
        self.session
            .sink()
            .iter()
            .filter_map(Delta::new_element)
            .collect()
    }

    /// Weights of every queued column.
    pub fn column_weights(&self) -> Vec<f64> {
        self.session
            .sink()
            .blocks()
            .filter_map(BlockPayload::column_weight)
            .collect()
    }

    /// Labels of every queued tab.
    pub fn tab_labels(&self) -> Vec<&str> {
        self.session
            .sink()
            .blocks()
            .filter_map(|block| match block {
                BlockPayload::Tab { label } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Dotted delta paths in emission order.
    pub fn paths(&self) -> Vec<String> {
        self.session
            .sink()
            .iter()
            .map(|delta| delta.path().to_string())
            .collect()
    }

    /// Deltas placed anywhere below `ancestor`, in emission order.
    pub fn deltas_within(&self, ancestor: &[usize]) -> Vec<&Delta> {
        let ancestor = DeltaPath::from(ancestor.to_vec());
        self.session
            .sink()
            .iter()
            .filter(|delta| delta.path().is_descendant_of(&ancestor))
            .collect()
    }

    /// Child slot indices of the direct children of `parent`, in emission
    /// order.
    pub fn child_indices(&self, parent: &[usize]) -> Vec<usize> {
        self.session
            .sink()
            .iter()
            .filter(|delta| {
                delta
                    .path()
                    .parent()
                    .is_some_and(|p| p.as_slice() == parent)
            })
            .filter_map(|delta| delta.path().last_index())
            .collect()
    }

    /// Queue as the JSON a client would receive.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self.session.sink()).unwrap_or_default()
    }

    // === Assertions ===

    /// Assert the number of queued deltas.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_delta_count(&self, expected: usize) -> &Self {
        let actual = self.session.sink().len();
        assert_eq!(
            actual, expected,
            "Expected {expected} deltas but found {actual}: {:?}",
            self.paths()
        );
        self
    }

    /// Assert that nothing was queued.
    ///
    /// # Panics
    ///
    /// Panics if the queue holds any delta.
    pub fn assert_empty(&self) -> &Self {
        self.assert_delta_count(0)
    }

    /// Assert column weights, in order, within the configured tolerance.
    ///
    /// # Panics
    ///
    /// Panics if the weights differ or do not sum to 1.
    pub fn assert_column_weights(&self, expected: &[f64]) -> &Self {
        let tolerance = self.session.config().weight_tolerance;
        let actual = self.column_weights();
        assert_eq!(
            actual.len(),
            expected.len(),
            "Expected {} columns but found {actual:?}",
            expected.len()
        );
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() <= tolerance,
                "Column {i}: expected weight {e} but got {a}"
            );
        }
        if !actual.is_empty() {
            assert!(
                weights_sum_to_one(&actual, tolerance),
                "Column weights {actual:?} do not sum to 1"
            );
        }
        self
    }

    /// Assert tab labels, in order.
    ///
    /// # Panics
    ///
    /// Panics if the labels differ.
    pub fn assert_tab_labels(&self, expected: &[&str]) -> &Self {
        let actual = self.tab_labels();
        assert_eq!(actual, expected, "Tab labels do not match");
        self
    }

    /// Assert the kind of the block delta at `index`.
    ///
    /// # Panics
    ///
    /// Panics if there is no delta at `index` or it is not a block of `kind`.
    pub fn assert_block_at(&self, index: isize, kind: BlockKind) -> &Self {
        let block = self.block_at(index);
        assert_eq!(block.kind(), kind, "Unexpected block at {index}");
        self
    }

    /// Assert the expander delta at `index`.
    ///
    /// # Panics
    ///
    /// Panics if the delta at `index` is not an expander with `label` and
    /// `expanded`.
    pub fn assert_expander(&self, index: isize, label: &str, expanded: bool) -> &Self {
        match self.block_at(index) {
            BlockPayload::Expandable {
                label: actual,
                expanded: actual_expanded,
            } => {
                assert_eq!(actual, label, "Expander label at {index}");
                assert_eq!(*actual_expanded, expanded, "Expander state at {index}");
            }
            other => panic!("Expected expander at {index} but found {other:?}"),
        }
        self
    }

    /// Assert how many deltas were placed below `ancestor`.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_within_count(&self, ancestor: &[usize], expected: usize) -> &Self {
        let actual = self.deltas_within(ancestor).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} deltas below {ancestor:?} but found {actual}"
        );
        self
    }

    /// Assert the path of the delta at `index`.
    ///
    /// # Panics
    ///
    /// Panics if there is no delta at `index` or its path differs.
    pub fn assert_path(&self, index: isize, expected: &[usize]) -> &Self {
        let delta = self.delta_at(index);
        assert_eq!(delta.path().as_slice(), expected, "Path of delta {index}");
        self
    }

    // === Internal ===

    fn delta_at(&self, index: isize) -> &Delta {
        let Some(delta) = self.get_delta_from_queue(index) else {
            panic!(
                "No delta at {index}; queue holds {}",
                self.session.sink().len()
            );
        };
        delta
    }

    fn block_at(&self, index: isize) -> &BlockPayload {
        let delta = self.delta_at(index);
        let Some(block) = delta.add_block() else {
            panic!("Expected a block at {index} but found {:?}", delta.payload());
        };
        block
    }
}
