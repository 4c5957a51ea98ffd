use tracing::debug;

use crate::kdtree::{KDTree, TreeNode};
use crate::ordering::{median_position, sort_by_axis};
use crate::record::{Axis, CityRecord};

/// A builder to create a [`KDTree`].
///
/// Records are collected first; the tree is built in one call to [`finish`][Self::finish].
#[derive(Debug, Clone, Default)]
pub struct KDTreeBuilder {
    records: Vec<CityRecord>,
}

impl KDTreeBuilder {
    /// Create a new builder with room for the provided number of items.
    pub fn new(num_items: usize) -> Self {
        Self {
            records: Vec::with_capacity(num_items),
        }
    }

    /// Add a record to the index, returning its insertion index.
    pub fn add(&mut self, record: CityRecord) -> usize {
        let index = self.records.len();
        self.records.push(record);
        index
    }

    /// Add a city to the index from its parts, returning its insertion index.
    pub fn add_city(
        &mut self,
        latitude: f64,
        longitude: f64,
        name: impl Into<String>,
        country: impl Into<String>,
    ) -> usize {
        self.add(CityRecord::new(latitude, longitude, name, country))
    }

    /// The number of records added so far.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records have been added.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(mut self) -> KDTree {
        let num_items = self.records.len();
        let mut links = vec![Link::default(); num_items];

        // kd-sort the records in place; the arena keeps the sorted order
        let root = sort(&mut self.records, &mut links, 0, num_items, 0);

        let nodes: Vec<TreeNode> = self
            .records
            .into_iter()
            .zip(links)
            .map(|(record, link)| TreeNode {
                record,
                depth: link.depth,
                left: link.left,
                right: link.right,
            })
            .collect();

        let height = nodes.iter().map(|node| node.depth + 1).max().unwrap_or(0);
        debug!(num_items, height, "built k-d tree");

        KDTree { nodes, root }
    }
}

impl Extend<CityRecord> for KDTreeBuilder {
    fn extend<I: IntoIterator<Item = CityRecord>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

/// Tree structure for the record at the same arena position.
#[derive(Debug, Clone, Copy, Default)]
struct Link {
    depth: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Recursively kd-sort `records[start..end]`, returning the arena position of the subtree root.
///
/// The median (by stable sort along the depth's axis) becomes the node; the strict prefix and
/// suffix become its left and right subtrees on the next axis.
fn sort(
    records: &mut [CityRecord],
    links: &mut [Link],
    start: usize,
    end: usize,
    depth: usize,
) -> Option<usize> {
    if start >= end {
        return None;
    }

    let axis = Axis::from_depth(depth);
    sort_by_axis(&mut records[start..end], axis);

    // median index
    let m = start + median_position(end - start);

    let left = sort(records, links, start, m, depth + 1);
    let right = sort(records, links, m + 1, end, depth + 1);
    links[m] = Link { depth, left, right };

    Some(m)
}
