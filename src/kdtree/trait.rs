use geo_traits::CoordTrait;
use tinyvec::TinyVec;

use crate::distance::{haversine, planar_squared, DistanceMetric, GreatCircle};
use crate::error::{GeocodeError, Result};
use crate::kdtree::candidates::{BoundedHeap, SwapList};
use crate::kdtree::{KDTree, Node, TreeNode};
use crate::record::CityRecord;

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex: Sized {
    /// The node arena of this tree, in kd-sorted order
    fn nodes(&self) -> &[TreeNode];

    /// Arena position of the root node, or `None` for an empty tree
    fn root_id(&self) -> Option<usize>;

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.nodes().len()
    }

    /// Find the record closest to the given latitude/longitude by great-circle distance.
    ///
    /// Returns `None` only if the tree is empty. When several records are equally close, the one
    /// visited first wins.
    fn nearest(&self, lat: f64, lon: f64) -> Option<&CityRecord> {
        self.nearest_with_metric(lat, lon, &GreatCircle::default())
    }

    /// Find the record closest to a coordinate, where `x` is longitude and `y` is latitude.
    fn nearest_coord(&self, coord: &impl CoordTrait<T = f64>) -> Option<&CityRecord> {
        self.nearest(coord.y(), coord.x())
    }

    /// Find the record closest to the given latitude/longitude under `metric`.
    fn nearest_with_metric(
        &self,
        lat: f64,
        lon: f64,
        metric: &impl DistanceMetric,
    ) -> Option<&CityRecord> {
        let nodes = self.nodes();
        let mut best = Best {
            id: None,
            distance: f64::INFINITY,
        };
        nearest_search(nodes, self.root_id(), lat, lon, metric, &mut best);
        best.id.map(|id| &nodes[id].record)
    }

    /// Find the `k` records closest to the given latitude/longitude by great-circle distance.
    ///
    /// `k` must be at least 2: use [`nearest`][Self::nearest] for a single neighbor. Returns at
    /// most `k` records, fewer if the tree holds fewer, in ascending distance order.
    ///
    /// ```
    /// use reverse_geocode::kdtree::{KDTree, KDTreeIndex};
    /// use reverse_geocode::CityRecord;
    ///
    /// let tree = KDTree::from_records(vec![
    ///     CityRecord::new(48.85, 2.35, "Paris", "FR"),
    ///     CityRecord::new(51.5072, -0.1275, "London", "GB"),
    ///     CityRecord::new(52.23, 21.01, "Warsaw", "PL"),
    /// ]);
    ///
    /// let names: Vec<_> = tree
    ///     .nearest_k(50.0, 0.0, 2)
    ///     .unwrap()
    ///     .into_iter()
    ///     .map(|city| city.name.as_str())
    ///     .collect();
    /// assert_eq!(names, vec!["London", "Paris"]);
    /// assert!(tree.nearest_k(50.0, 0.0, 1).is_err());
    /// ```
    fn nearest_k(&self, lat: f64, lon: f64, k: isize) -> Result<Vec<&CityRecord>> {
        self.nearest_k_with_metric(lat, lon, k, &GreatCircle::default())
    }

    /// Find the `k` records closest to the given latitude/longitude under `metric`.
    ///
    /// The same metric ranks candidates and decides whether the far side of a splitting plane is
    /// searched.
    fn nearest_k_with_metric(
        &self,
        lat: f64,
        lon: f64,
        k: isize,
        metric: &impl DistanceMetric,
    ) -> Result<Vec<&CityRecord>> {
        let k = validate_k(k)?;
        let nodes = self.nodes();
        // never more candidates than records
        let mut heap = BoundedHeap::new(k.min(nodes.len()));
        nearest_k_search(nodes, self.root_id(), lat, lon, metric, &mut heap);
        Ok(heap
            .into_sorted_ids()
            .into_iter()
            .map(|id| &nodes[id].record)
            .collect())
    }

    /// Find up to `k` nearby records with the legacy swap-based traversal.
    ///
    /// Candidates are ranked by great-circle distance, but the far side of a splitting plane is
    /// searched when the squared planar distance to the node is at most the great-circle distance
    /// to the first candidate. The two metrics are not comparable, so the result is not guaranteed
    /// to be the true `k` nearest, and its order carries no meaning. Prefer
    /// [`nearest_k`][Self::nearest_k].
    fn nearest_k_reference(&self, lat: f64, lon: f64, k: isize) -> Result<Vec<&CityRecord>> {
        let k = validate_k(k)?;
        let nodes = self.nodes();
        let mut list = SwapList::new(k.min(nodes.len()));
        reference_search(nodes, self.root_id(), lat, lon, &mut list);
        Ok(list
            .into_ids()
            .into_iter()
            .map(|id| &nodes[id].record)
            .collect())
    }

    /// The number of levels in the tree; 0 for an empty tree.
    fn height(&self) -> usize {
        let nodes = self.nodes();
        let mut stack: TinyVec<[(usize, usize); 33]> = TinyVec::new();
        if let Some(root) = self.root_id() {
            stack.push((root, 1));
        }

        let mut height = 0;
        while let Some((id, level)) = stack.pop() {
            height = height.max(level);
            let node = &nodes[id];
            if let Some(left) = node.left {
                stack.push((left, level + 1));
            }
            if let Some(right) = node.right {
                stack.push((right, level + 1));
            }
        }
        height
    }

    /// Access the root node of the KDTree for manual traversal.
    fn root(&self) -> Option<Node<'_, Self>> {
        Node::from_root(self)
    }
}

impl KDTreeIndex for KDTree {
    fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    fn root_id(&self) -> Option<usize> {
        self.root
    }
}

/// Check the requested neighbor count of a k-nearest-neighbors query.
fn validate_k(k: isize) -> Result<usize> {
    match k {
        k if k < 1 => Err(GeocodeError::NonPositiveK),
        1 => Err(GeocodeError::UseNearestForSingle),
        k => Ok(k.unsigned_abs()),
    }
}

struct Best {
    id: Option<usize>,
    distance: f64,
}

/// Near and far child of `node` for a query; ties on the axis go right.
#[inline]
fn branches(node: &TreeNode, lat: f64, lon: f64) -> (Option<usize>, Option<usize>) {
    let axis = node.axis();
    if axis.select(lat, lon) < node.record.coord(axis) {
        (node.left, node.right)
    } else {
        (node.right, node.left)
    }
}

/// Lower bound on the distance from the query to anything on the far side of `node`'s split.
#[inline]
fn far_side_distance(
    node: &TreeNode,
    lat: f64,
    lon: f64,
    metric: &impl DistanceMetric,
) -> f64 {
    let axis = node.axis();
    metric.axis_distance(axis, lat, lon, node.record.coord(axis))
}

fn nearest_search(
    nodes: &[TreeNode],
    id: Option<usize>,
    lat: f64,
    lon: f64,
    metric: &impl DistanceMetric,
    best: &mut Best,
) {
    let Some(id) = id else {
        return;
    };
    let node = &nodes[id];

    let distance = metric.distance(lat, lon, node.record.latitude, node.record.longitude);
    if distance < best.distance {
        best.id = Some(id);
        best.distance = distance;
    }

    let (near, far) = branches(node, lat, lon);
    nearest_search(nodes, near, lat, lon, metric, best);

    // the splitting plane can only hide a closer record if it is nearer than the current best
    if far_side_distance(node, lat, lon, metric) < best.distance {
        nearest_search(nodes, far, lat, lon, metric, best);
    }
}

fn nearest_k_search(
    nodes: &[TreeNode],
    id: Option<usize>,
    lat: f64,
    lon: f64,
    metric: &impl DistanceMetric,
    heap: &mut BoundedHeap,
) {
    let Some(id) = id else {
        return;
    };
    let node = &nodes[id];

    let distance = metric.distance(lat, lon, node.record.latitude, node.record.longitude);
    heap.offer(id, distance);

    let (near, far) = branches(node, lat, lon);
    nearest_k_search(nodes, near, lat, lon, metric, heap);

    if !heap.is_full() || far_side_distance(node, lat, lon, metric) <= heap.worst() {
        nearest_k_search(nodes, far, lat, lon, metric, heap);
    }
}

fn reference_search(nodes: &[TreeNode], id: Option<usize>, lat: f64, lon: f64, list: &mut SwapList) {
    let Some(id) = id else {
        return;
    };
    let node = &nodes[id];
    let (near, far) = branches(node, lat, lon);

    reference_search(nodes, near, lat, lon, list);

    list.offer(id, |other| {
        let record = &nodes[other].record;
        haversine(lat, lon, record.latitude, record.longitude)
    });

    let explore_far = match list.first() {
        Some(first) if list.is_full() => {
            let first = &nodes[first].record;
            planar_squared(lat, lon, node.record.latitude, node.record.longitude)
                <= haversine(lat, lon, first.latitude, first.longitude)
        }
        _ => true,
    };
    if explore_far {
        reference_search(nodes, far, lat, lon, list);
    }
}
