//! A binary search tree and an AVL tree over a single ordered key.
//!
//! [`BinarySearchTree`] inserts, searches and deletes without ever changing
//! the shape of the tree beyond the mutated slot. [`AvlTree`] wraps it and
//! rebalances the whole tree with single and double rotations after every
//! insert and delete, so that the heights of the two subtrees of any node
//! differ by at most one.
//!
//! Both trees keep duplicate keys and hand out read-only [`Node`] handles.
//! Lookups and removals of absent keys return [`TreeError::NotFound`].
//!
//! ```
//! use bstree::{AvlTree, TreeError};
//!
//! let mut tree: AvlTree<i32> = (1..=7).collect();
//! assert_eq!(tree.root().map(|root| *root.key()), Some(4));
//! assert_eq!(tree.search(&5).map(|node| *node.key()), Ok(5));
//!
//! tree.delete(&5).unwrap();
//! assert_eq!(tree.delete(&5), Err(TreeError::NotFound));
//! assert_eq!(tree.traverse_in_order(), vec![1, 2, 3, 4, 6, 7]);
//! ```

mod avl;
mod bst;
mod error;
mod iter;
mod node;

pub use avl::AvlTree;
pub use bst::BinarySearchTree;
pub use error::{InvariantViolation, TreeError};
pub use iter::Iter;
pub use node::Node;
