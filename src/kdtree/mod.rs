//! An implementation of an immutable two-dimensional k-d tree over city records.

#![warn(missing_docs)]

mod builder;
mod candidates;
mod index;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{Iter, KDTree, TreeNode};
pub use r#trait::KDTreeIndex;
pub use traversal::Node;
