//! Candidate sets for k-nearest-neighbors searches.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A wrapper around a node and its distance for use in the bounded max-heap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct NeighborNode {
    pub(crate) id: usize,
    pub(crate) dist: f64,
}

impl Eq for NeighborNode {}

impl Ord for NeighborNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist
            .total_cmp(&other.dist)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for NeighborNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The `k` closest nodes seen so far, with the farthest on top.
#[derive(Debug)]
pub(crate) struct BoundedHeap {
    k: usize,
    heap: BinaryHeap<NeighborNode>,
}

impl BoundedHeap {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Distance of the farthest kept candidate, or infinity while not full.
    #[inline]
    pub(crate) fn worst(&self) -> f64 {
        match self.heap.peek() {
            Some(top) if self.is_full() => top.dist,
            _ => f64::INFINITY,
        }
    }

    /// Admit a node if there is room or it is strictly closer than the current worst.
    pub(crate) fn offer(&mut self, id: usize, dist: f64) {
        if !self.is_full() {
            self.heap.push(NeighborNode { id, dist });
        } else if dist < self.worst() {
            self.heap.pop();
            self.heap.push(NeighborNode { id, dist });
        }
    }

    /// Arena positions in ascending distance order.
    pub(crate) fn into_sorted_ids(self) -> Vec<usize> {
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|node| node.id)
            .collect()
    }
}

/// Fixed-capacity candidate list with swap-based placement.
///
/// A node is only ever appended while the list has room. After appending, the node is swapped into
/// the first slot whose entry is strictly farther, and that entry moves to the last slot. The list
/// is not kept in distance order.
#[derive(Debug)]
pub(crate) struct SwapList {
    k: usize,
    ids: Vec<usize>,
}

impl SwapList {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            ids: Vec::with_capacity(k),
        }
    }

    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.ids.len() >= self.k
    }

    #[inline]
    pub(crate) fn first(&self) -> Option<usize> {
        self.ids.first().copied()
    }

    /// Append `id` if there is room, then place it. `dist` gives the distance of any arena entry.
    pub(crate) fn offer(&mut self, id: usize, dist: impl Fn(usize) -> f64) {
        if self.is_full() {
            return;
        }
        self.ids.push(id);
        let last = self.ids.len() - 1;
        let current = dist(id);
        if let Some(slot) = (0..last).find(|&i| current < dist(self.ids[i])) {
            self.ids.swap(slot, last);
        }
    }

    pub(crate) fn into_ids(self) -> Vec<usize> {
        self.ids
    }
}
