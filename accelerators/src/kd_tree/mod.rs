//! KD Tree.

use order_stat::kth_by;
use photon_core::geometry::*;

mod common;
use common::*;

/// Result of a nearest neighbor query.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Neighbors {
    /// Indices of the neighbors ordered nearest first.
    pub indices: Vec<usize>,

    /// Squared distance to the farthest neighbor. 0 if there are none.
    pub max_distance_squared: Float,
}

impl Neighbors {
    /// Returns the number of neighbors found.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns true if no neighbors were found.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Balanced KD Tree over a fixed set of points.
///
/// The tree is stored implicitly: within each range of `nodes` the middle
/// node is the median along the split axis with the lower half to its left
/// and the upper half to its right. Once built, the topology never changes.
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    /// The nodes in implicit tree order.
    nodes: Vec<KdNode>,
}

impl KdTree {
    /// Build a KD Tree over copies of the given points. Query results refer
    /// to positions in `points`.
    ///
    /// * `points` - The points.
    pub fn build(points: &[Point3f]) -> Self {
        let mut nodes: Vec<KdNode> = points
            .iter()
            .enumerate()
            .map(|(i, p)| KdNode::new(*p, i))
            .collect();

        build_range(&mut nodes);

        Self { nodes }
    }

    /// Returns the number of points in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the `k` points closest to `p`, or all points if there are
    /// fewer than `k`.
    ///
    /// * `p` - The query point.
    /// * `k` - Number of neighbors to find.
    pub fn knn(&self, p: &Point3f, k: usize) -> Neighbors {
        if k == 0 || self.nodes.is_empty() {
            return Neighbors::default();
        }

        let mut candidates = CandidateHeap::new(k);
        knn_range(&self.nodes, p, &mut candidates);

        let (indices, max_distance_squared) = candidates.into_sorted();
        Neighbors {
            indices,
            max_distance_squared,
        }
    }

    /// Returns all points within distance `r` of `p` (inclusive).
    ///
    /// * `p` - The query point.
    /// * `r` - Search radius.
    pub fn within_radius(&self, p: &Point3f, r: Float) -> Vec<usize> {
        let mut found = vec![];
        if r >= 0.0 {
            radius_range(&self.nodes, p, r * r, &mut found);
        }
        found
    }
}

/// Recursively arrange nodes so that each range's median along the axis of
/// maximum extent sits in the middle of the range.
///
/// * `nodes` - The range of nodes to arrange.
fn build_range(nodes: &mut [KdNode]) {
    if nodes.len() <= 1 {
        return;
    }

    let axis = match Bounds3f::enclosing(nodes.iter().map(|n| &n.p)) {
        Some(b) => b.maximum_extent(),
        None => return,
    };

    let mid = nodes.len() / 2;
    kth_by(nodes, mid, |n1, n2| compare_along(n1, n2, axis));
    nodes[mid].split_axis = axis;

    let (below, rest) = nodes.split_at_mut(mid);
    build_range(below);
    build_range(&mut rest[1..]);
}

/// Recursively search a range of nodes for the nearest candidates.
///
/// * `nodes`      - The range of nodes.
/// * `p`          - The query point.
/// * `candidates` - Closest candidates found so far.
fn knn_range(nodes: &[KdNode], p: &Point3f, candidates: &mut CandidateHeap) {
    if nodes.is_empty() {
        return;
    }

    let mid = nodes.len() / 2;
    let node = &nodes[mid];
    candidates.offer(p.distance_squared(node.p), node.index);

    let delta = p[node.split_axis] - node.p[node.split_axis];
    let (near, far) = if delta < 0.0 {
        (&nodes[..mid], &nodes[mid + 1..])
    } else {
        (&nodes[mid + 1..], &nodes[..mid])
    };

    knn_range(near, p, candidates);
    if delta * delta < candidates.bound() {
        knn_range(far, p, candidates);
    }
}

/// Recursively collect the nodes of a range within a squared distance.
///
/// * `nodes` - The range of nodes.
/// * `p`     - The query point.
/// * `r2`    - Squared search radius.
/// * `found` - Collects point indices.
fn radius_range(nodes: &[KdNode], p: &Point3f, r2: Float, found: &mut Vec<usize>) {
    if nodes.is_empty() {
        return;
    }

    let mid = nodes.len() / 2;
    let node = &nodes[mid];
    if p.distance_squared(node.p) <= r2 {
        found.push(node.index);
    }

    let delta = p[node.split_axis] - node.p[node.split_axis];
    if delta <= 0.0 || delta * delta <= r2 {
        radius_range(&nodes[..mid], p, r2, found);
    }
    if delta >= 0.0 || delta * delta <= r2 {
        radius_range(&nodes[mid + 1..], p, r2, found);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn point3() -> impl Strategy<Value = Point3f> {
        (-10.0f32..10.0f32, -10.0f32..10.0f32, -10.0f32..10.0f32)
            .prop_map(|(x, y, z)| Point3f::new(x, y, z))
    }

    fn brute_force_distances(points: &[Point3f], p: &Point3f) -> Vec<Float> {
        let mut d: Vec<Float> = points.iter().map(|q| p.distance_squared(*q)).collect();
        d.sort_by(|a, b| a.partial_cmp(b).unwrap());
        d
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        assert!(tree.knn(&Point3f::ZERO, 5).is_empty());
        assert!(tree.within_radius(&Point3f::ZERO, 1.0).is_empty());
    }

    #[test]
    fn zero_neighbors_requested() {
        let tree = KdTree::build(&[Point3f::ZERO]);
        let n = tree.knn(&Point3f::ZERO, 0);
        assert!(n.is_empty());
        assert_eq!(n.max_distance_squared, 0.0);
    }

    #[test]
    fn fewer_points_than_k() {
        let points = [
            Point3f::new(1.0, 0.0, 0.0),
            Point3f::new(0.0, 2.0, 0.0),
            Point3f::new(0.0, 0.0, 3.0),
        ];
        let tree = KdTree::build(&points);
        let n = tree.knn(&Point3f::ZERO, 10);
        assert_eq!(n.indices, vec![0, 1, 2]);
        assert!(approx_eq!(f32, n.max_distance_squared, 9.0));
    }

    #[test]
    fn duplicate_points() {
        let points = vec![Point3f::new(1.0, 1.0, 1.0); 8];
        let tree = KdTree::build(&points);
        let n = tree.knn(&Point3f::ZERO, 4);
        assert_eq!(n.len(), 4);
        assert!(approx_eq!(f32, n.max_distance_squared, 3.0));
        assert_eq!(tree.within_radius(&Point3f::new(1.0, 1.0, 1.0), 0.0).len(), 8);
    }

    proptest! {
        #[test]
        fn knn_matches_brute_force(
            points in vec(point3(), 1..200),
            p in point3(),
            k in 1usize..20,
        ) {
            let tree = KdTree::build(&points);
            let n = tree.knn(&p, k);
            let expected = brute_force_distances(&points, &p);
            let expected_len = k.min(points.len());

            prop_assert_eq!(n.len(), expected_len);

            let found: Vec<Float> = n.indices.iter().map(|&i| p.distance_squared(points[i])).collect();
            for (d, e) in found.iter().zip(expected.iter()) {
                prop_assert!(approx_eq!(f32, *d, *e, epsilon = 1e-4));
            }
            prop_assert!(approx_eq!(f32, n.max_distance_squared, expected[expected_len - 1], epsilon = 1e-4));
        }

        #[test]
        fn within_radius_matches_brute_force(
            points in vec(point3(), 0..200),
            p in point3(),
            r in 0.0f32..8.0f32,
        ) {
            let tree = KdTree::build(&points);
            let mut found = tree.within_radius(&p, r);
            found.sort_unstable();

            let expected: Vec<usize> = (0..points.len())
                .filter(|&i| p.distance_squared(points[i]) <= r * r)
                .collect();
            prop_assert_eq!(found, expected);
        }

    }
}
