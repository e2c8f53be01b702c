//! Frontier priority queue for best-first searches.
//!
//! Entries live in a min-heap keyed by `(key, insertion_order)`. Lower keys
//! pop first; equal keys pop in the order they were pushed, which keeps the
//! expansion order identical on every host.
//!
//! There is no decrease-key. A point may be pushed several times; callers
//! discard the stale copies when they pop them.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use skirmish_core::Point;

#[derive(Debug, Clone, Copy)]
struct Entry {
    key: u32,
    /// Monotonically increasing push counter used to break ties.
    seq: u64,
    point: Point,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap: smaller key first, then
        // smaller seq. `seq` is unique so this is a total order.
        self.key.cmp(&other.key).then(self.seq.cmp(&other.seq))
    }
}

/// A min-priority queue of grid points.
#[derive(Debug, Default)]
pub struct FrontierQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    seq: u64,
}

impl FrontierQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `point` with estimated total cost `key`.
    pub fn push(&mut self, point: Point, key: u32) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { key, seq, point }));
    }

    /// Pop the point with the lowest key (ties broken FIFO), along with its
    /// key.
    pub fn pop(&mut self) -> Option<(Point, u32)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.point, entry.key))
    }

    /// The lowest key currently queued.
    pub fn peek_key(&self) -> Option<u32> {
        self.heap.peek().map(|Reverse(entry)| entry.key)
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of queued entries, stale duplicates included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Drop every entry. The tie-break counter keeps running.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
