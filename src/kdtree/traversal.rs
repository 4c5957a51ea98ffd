//! Utilities to traverse the KDTree structure.

use crate::kdtree::{KDTreeIndex, TreeNode};
use crate::record::{Axis, CityRecord};

/// A node in the KDTree, borrowed from its tree.
#[derive(Debug)]
pub struct Node<'a, T: KDTreeIndex> {
    /// The tree that this node is a reference onto
    tree: &'a T,

    /// Position of this node in the tree's arena
    id: usize,
}

impl<T: KDTreeIndex> Clone for Node<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: KDTreeIndex> Copy for Node<'_, T> {}

impl<'a, T: KDTreeIndex> Node<'a, T> {
    pub(crate) fn from_root(tree: &'a T) -> Option<Self> {
        tree.root_id().map(|id| Self { tree, id })
    }

    #[inline]
    fn inner(&self) -> &'a TreeNode {
        &self.tree.nodes()[self.id]
    }

    /// Position of this node in the tree's arena.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The record stored at this node.
    #[inline]
    pub fn record(&self) -> &'a CityRecord {
        &self.inner().record
    }

    /// Depth of this node; the root is at depth 0.
    #[inline]
    pub fn depth(&self) -> usize {
        self.inner().depth
    }

    /// The axis that the children of this node are split over.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.inner().axis()
    }

    /// The child node holding records that sorted before this one.
    pub fn left_child(&self) -> Option<Node<'a, T>> {
        self.inner().left.map(|id| Self {
            tree: self.tree,
            id,
        })
    }

    /// The child node holding records that sorted after this one.
    pub fn right_child(&self) -> Option<Node<'a, T>> {
        self.inner().right.map(|id| Self {
            tree: self.tree,
            id,
        })
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        let node = self.inner();
        node.left.is_none() && node.right.is_none()
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}
