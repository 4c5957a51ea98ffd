use tinyvec::TinyVec;

use crate::kdtree::KDTreeBuilder;
use crate::record::{Axis, CityRecord};

/// A single node of the tree, owned by the tree's node arena.
///
/// Children are addressed by their position in the arena. A node's `left` subtree holds records
/// that sorted before it along its axis at construction time and `right` holds those after.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub(crate) record: CityRecord,
    pub(crate) depth: usize,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl TreeNode {
    /// The record held by this node.
    #[inline]
    pub fn record(&self) -> &CityRecord {
        &self.record
    }

    /// Depth of this node; the root is at depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The axis this node splits on.
    #[inline]
    pub fn axis(&self) -> Axis {
        Axis::from_depth(self.depth)
    }

    /// Arena position of the left child.
    #[inline]
    pub fn left(&self) -> Option<usize> {
        self.left
    }

    /// Arena position of the right child.
    #[inline]
    pub fn right(&self) -> Option<usize> {
        self.right
    }
}

/// An immutable k-d tree over city records.
///
/// Usually this will be created via [`KDTreeBuilder`] or [`KDTree::from_records`]. The node arena is
/// stored in kd-sorted order and is never mutated after construction, so a built tree can be shared
/// across threads for read-only queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KDTree {
    pub(crate) nodes: Vec<TreeNode>,
    pub(crate) root: Option<usize>,
}

impl KDTree {
    /// Build a tree from a list of records, consuming it.
    pub fn from_records(records: Vec<CityRecord>) -> Self {
        let mut builder = KDTreeBuilder::new(records.len());
        builder.extend(records);
        builder.finish()
    }

    /// The number of records in this tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over records in pre-order: node, then left subtree, then right subtree.
    pub fn iter(&self) -> Iter<'_> {
        let mut stack = TinyVec::new();
        if let Some(root) = self.root {
            stack.push(root);
        }
        Iter { tree: self, stack }
    }

    /// Consume the tree, returning its records in kd-sorted order.
    pub fn into_records(self) -> Vec<CityRecord> {
        self.nodes.into_iter().map(|node| node.record).collect()
    }
}

impl FromIterator<CityRecord> for KDTree {
    fn from_iter<I: IntoIterator<Item = CityRecord>>(iter: I) -> Self {
        let mut builder = KDTreeBuilder::default();
        builder.extend(iter);
        builder.finish()
    }
}

impl<'a> IntoIterator for &'a KDTree {
    type Item = &'a CityRecord;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over the records of a [`KDTree`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    tree: &'a KDTree,
    // Use TinyVec to avoid heap allocations for trees of reasonable height
    stack: TinyVec<[usize; 33]>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a CityRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id];
        // Note: pushed in backwards order to what gets popped
        if let Some(right) = node.right {
            self.stack.push(right);
        }
        if let Some(left) = node.left {
            self.stack.push(left);
        }
        Some(&node.record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.tree.len()))
    }
}
