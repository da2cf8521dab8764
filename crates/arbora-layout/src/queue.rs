//! Delta sinks.

use arbora_core::{BlockPayload, Delta};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Append-only destination for deltas.
///
/// Implementations must keep deltas in the order they are enqueued; that
/// order is what clients apply.
pub trait DeltaSink {
    /// Append a delta.
    fn enqueue(&mut self, delta: Delta);
}

impl DeltaSink for Vec<Delta> {
    fn enqueue(&mut self, delta: Delta) {
        self.push(delta);
    }
}

impl<T: DeltaSink + ?Sized> DeltaSink for &mut T {
    fn enqueue(&mut self, delta: Delta) {
        (**self).enqueue(delta);
    }
}

/// In-memory delta queue for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeltaQueue {
    deltas: Vec<Delta>,
}

impl DeltaQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued deltas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Check if the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Delta at `index`, oldest first.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Delta> {
        self.deltas.get(index)
    }

    /// Most recent delta.
    #[must_use]
    pub fn last(&self) -> Option<&Delta> {
        self.deltas.last()
    }

    /// All deltas in emission order.
    #[must_use]
    pub fn as_slice(&self) -> &[Delta] {
        &self.deltas
    }

    /// Iterate in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Delta> {
        self.deltas.iter()
    }

    /// Iterate over block payloads only.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockPayload> + '_ {
        self.deltas.iter().filter_map(Delta::add_block)
    }

    /// Take every queued delta, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<Delta> {
        std::mem::take(&mut self.deltas)
    }
}

impl DeltaSink for DeltaQueue {
    fn enqueue(&mut self, delta: Delta) {
        self.deltas.push(delta);
    }
}

impl Index<usize> for DeltaQueue {
    type Output = Delta;

    fn index(&self, index: usize) -> &Delta {
        &self.deltas[index]
    }
}

impl<'a> IntoIterator for &'a DeltaQueue {
    type Item = &'a Delta;
    type IntoIter = std::slice::Iter<'a, Delta>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbora_core::{DeltaPath, ElementPayload, Gap};

    fn horizontal(index: usize) -> Delta {
        Delta::block(
            DeltaPath::from(vec![0, index]),
            BlockPayload::Horizontal { gap: Gap::Small },
        )
    }

    #[test]
    fn test_queue_keeps_order() {
        let mut queue = DeltaQueue::new();
        for i in 0..3 {
            queue.enqueue(horizontal(i));
        }
        assert_eq!(queue.len(), 3);
        let indices: Vec<_> = queue.iter().map(|d| d.path().last_index()).collect();
        assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
        assert_eq!(queue[1], horizontal(1));
        assert_eq!(queue.last(), Some(&horizontal(2)));
    }

    #[test]
    fn test_drain_empties_queue() {
        let mut queue = DeltaQueue::new();
        queue.enqueue(horizontal(0));
        let drained = queue.drain();
        assert_eq!(drained.len(), 1);
        assert!(queue.is_empty());
        assert!(queue.get(0).is_none());
    }

    #[test]
    fn test_blocks_skips_elements() {
        let mut queue = DeltaQueue::new();
        queue.enqueue(horizontal(0));
        queue.enqueue(Delta::element(
            DeltaPath::from(vec![0, 1]),
            ElementPayload::Text {
                body: "x".to_string(),
            },
        ));
        assert_eq!(queue.blocks().count(), 1);
        assert_eq!((&queue).into_iter().count(), 2);
    }

    fn enqueue_into<S: DeltaSink>(mut sink: S, delta: Delta) {
        sink.enqueue(delta);
    }

    #[test]
    fn test_vec_and_mut_ref_sinks() {
        let mut deltas: Vec<Delta> = Vec::new();
        enqueue_into(&mut deltas, horizontal(0));
        deltas.enqueue(horizontal(1));
        assert_eq!(deltas.len(), 2);
    }

    #[test]
    fn test_queue_serializes_as_array() {
        let mut queue = DeltaQueue::new();
        queue.enqueue(horizontal(0));
        let json = serde_json::to_value(&queue).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["payload"]["add_block"]["type"], "horizontal");
        let back: DeltaQueue = serde_json::from_value(json).unwrap();
        assert_eq!(back, queue);
    }
}
