//! KD Tree Common

use ordered_float::OrderedFloat;
use photon_core::geometry::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node of the implicit tree. The node at the middle of a range splits the
/// range; nodes before it lie below the splitting plane and nodes after it lie
/// above.
#[derive(Copy, Clone, Debug)]
pub(crate) struct KdNode {
    /// Position of the point.
    pub(crate) p: Point3f,

    /// Index of the point in the slice the tree was built from.
    pub(crate) index: usize,

    /// Split axis. Unused for single node ranges.
    pub(crate) split_axis: Axis,
}

impl KdNode {
    /// Create a new `KdNode` with a default split axis.
    ///
    /// * `p`     - Position of the point.
    /// * `index` - Index of the point.
    pub(crate) fn new(p: Point3f, index: usize) -> Self {
        Self {
            p,
            index,
            split_axis: Axis::default(),
        }
    }
}

/// Returns the ordering of two nodes along an axis. NaN coordinates compare
/// equal.
///
/// * `n1`   - First node.
/// * `n2`   - Second node.
/// * `axis` - The axis.
pub(crate) fn compare_along(n1: &KdNode, n2: &KdNode, axis: Axis) -> Ordering {
    n1.p[axis].partial_cmp(&n2.p[axis]).unwrap_or(Ordering::Equal)
}

/// Bounded max-heap of the closest candidates found so far keyed by squared
/// distance.
pub(crate) struct CandidateHeap {
    /// Maximum number of candidates to keep.
    k: usize,

    /// Candidates as (squared distance, index); the farthest is on top.
    heap: BinaryHeap<(OrderedFloat<Float>, usize)>,
}

impl CandidateHeap {
    /// Create a new `CandidateHeap`.
    ///
    /// * `k` - Maximum number of candidates to keep.
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k + 1),
        }
    }

    /// Returns true if `k` candidates have been found.
    pub(crate) fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Returns the squared distance of the farthest kept candidate or
    /// infinity when the heap still has room.
    pub(crate) fn bound(&self) -> Float {
        if self.is_full() {
            self.heap.peek().map_or(INFINITY, |c| c.0.into_inner())
        } else {
            INFINITY
        }
    }

    /// Offer a candidate. It is kept if the heap has room or it is closer
    /// than the farthest kept candidate.
    ///
    /// * `distance_squared` - Squared distance to the query point.
    /// * `index`            - Index of the point.
    pub(crate) fn offer(&mut self, distance_squared: Float, index: usize) {
        if !self.is_full() {
            self.heap.push((OrderedFloat(distance_squared), index));
        } else if distance_squared < self.bound() {
            self.heap.push((OrderedFloat(distance_squared), index));
            self.heap.pop();
        }
    }

    /// Consumes the heap and returns indices ordered nearest first along with
    /// the largest squared distance.
    pub(crate) fn into_sorted(self) -> (Vec<usize>, Float) {
        let sorted = self.heap.into_sorted_vec();
        let max_distance_squared = sorted.last().map_or(0.0, |c| c.0.into_inner());
        (sorted.into_iter().map(|(_, i)| i).collect(), max_distance_squared)
    }
}
