//! A height-balanced binary search tree.

use std::fmt;
use std::iter::FromIterator;

use log::trace;

use crate::bst::BinarySearchTree;
use crate::error::{InvariantViolation, TreeError};
use crate::iter::Iter;
use crate::node::{set_left, set_right, Link, Node, NodePtr};

/// An AVL tree: a [`BinarySearchTree`] that restores the height balance of
/// every node after each insert and delete.
///
/// After the plain tree mutation the whole tree is rebalanced in one
/// post-order pass. Subtree heights are recomputed from scratch for every node
/// the pass visits; nothing is cached between operations.
///
/// ```
/// use bstree::AvlTree;
/// let mut tree = AvlTree::new();
/// for key in [10, 20, 30, 40, 50, 25] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.traverse_in_order(), vec![10, 20, 25, 30, 40, 50]);
/// assert_eq!(
///     tree.traverse_breadth_first(),
///     vec![vec![30], vec![20, 40], vec![10, 25, 50]]
/// );
/// ```
pub struct AvlTree<K> {
    tree: BinarySearchTree<K>,
}

impl<K> AvlTree<K> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            tree: BinarySearchTree::new(),
        }
    }

    pub fn root(&self) -> Option<&Node<K>> {
        self.tree.root()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        self.tree.iter()
    }

    /// Unwraps the underlying binary search tree.
    pub fn into_inner(self) -> BinarySearchTree<K> {
        self.tree
    }
}

impl<K: Ord + fmt::Debug> AvlTree<K> {
    /// Creates a tree holding a single node with the given key.
    pub fn with_root(key: K) -> Self {
        Self::from_node(Node::new(key))
    }

    /// Creates a tree rooted at the given node.
    pub fn from_node(node: Node<K>) -> Self {
        let mut tree = Self {
            tree: BinarySearchTree::from_node(node),
        };
        tree.rebalance();
        tree
    }

    pub fn insert(&mut self, key: K) {
        self.tree.insert(key);
        self.rebalance();
    }

    pub fn insert_node(&mut self, node: Node<K>) {
        self.tree.insert_node(node);
        self.rebalance();
    }

    /// Removes one node holding `key`, then rebalances.
    /// An absent key leaves the tree unchanged.
    pub fn delete(&mut self, key: &K) -> Result<(), TreeError> {
        self.tree.delete(key)?;
        self.rebalance();
        Ok(())
    }

    pub fn search(&self, key: &K) -> Result<&Node<K>, TreeError> {
        self.tree.search(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains(key)
    }

    /// Checks everything [`BinarySearchTree::validate`] checks, plus the AVL
    /// condition and the recorded balance factor of every node.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.tree.validate()?;
        for node in self.iter().into_nodes() {
            let actual = node.actual_balance();
            if !(-1..=1).contains(&actual) {
                return Err(InvariantViolation::Unbalanced(actual));
            }
            if node.balance_factor() != actual {
                return Err(InvariantViolation::StaleBalanceFactor {
                    cached: node.balance_factor(),
                    actual,
                });
            }
        }
        Ok(())
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        if let Err(violation) = self.validate() {
            panic!("inconsistent AVL tree: {}", violation);
        }
    }

    fn rebalance(&mut self) {
        self.tree.replace_root(rebalance_subtree);
    }
}

impl<K: Clone> AvlTree<K> {
    /// Returns all keys in ascending order.
    pub fn traverse_in_order(&self) -> Vec<K> {
        self.tree.traverse_in_order()
    }

    /// Returns the keys level by level, root first, left to right within a
    /// level.
    pub fn traverse_breadth_first(&self) -> Vec<Vec<K>> {
        self.tree.traverse_breadth_first()
    }
}

// Both subtrees are rebalanced before the node itself.
fn rebalance_subtree<K: fmt::Debug>(link: Link<K>) -> Link<K> {
    let node_ptr = link?;
    let left = rebalance_subtree(unsafe { node_ptr.as_ref().left });
    set_left(node_ptr, left);
    let right = rebalance_subtree(unsafe { node_ptr.as_ref().right });
    set_right(node_ptr, right);
    Some(rebalance_node(node_ptr))
}

/// Restores the AVL condition at a single node with at most one single or
/// double rotation. Returns the root of the resulting subtree.
fn rebalance_node<K: fmt::Debug>(mut node_ptr: NodePtr<K>) -> NodePtr<K> {
    unsafe {
        node_ptr.as_mut().refresh_balance();
        let balance = node_ptr.as_ref().balance;
        if balance > 1 {
            // Left heavy
            if let Some(left_ptr) = node_ptr.as_ref().left {
                if left_ptr.as_ref().actual_balance() < 0 {
                    set_left(node_ptr, Some(rotate_left(left_ptr)));
                }
            }
            rotate_right(node_ptr)
        } else if balance < -1 {
            // Right heavy
            if let Some(right_ptr) = node_ptr.as_ref().right {
                if right_ptr.as_ref().actual_balance() > 0 {
                    set_right(node_ptr, Some(rotate_right(right_ptr)));
                }
            }
            rotate_left(node_ptr)
        } else {
            node_ptr
        }
    }
}

/// The left child becomes the subtree root and the old root its right child.
/// The left child's former right subtree moves under the old root.
///
/// The returned node still points at the old root as its parent until the
/// caller links it back in.
pub(crate) fn rotate_right<K: fmt::Debug>(mut node_ptr: NodePtr<K>) -> NodePtr<K> {
    unsafe {
        let mut left_ptr = match node_ptr.as_ref().left {
            Some(left_ptr) => left_ptr,
            None => return node_ptr,
        };
        trace!("rotate right at key {:?}", node_ptr.as_ref().key);
        set_left(node_ptr, left_ptr.as_ref().right);
        node_ptr.as_mut().refresh_balance();
        set_right(left_ptr, Some(node_ptr));
        left_ptr.as_mut().refresh_balance();
        left_ptr
    }
}

/// Mirror image of [`rotate_right`].
pub(crate) fn rotate_left<K: fmt::Debug>(mut node_ptr: NodePtr<K>) -> NodePtr<K> {
    unsafe {
        let mut right_ptr = match node_ptr.as_ref().right {
            Some(right_ptr) => right_ptr,
            None => return node_ptr,
        };
        trace!("rotate left at key {:?}", node_ptr.as_ref().key);
        set_right(node_ptr, right_ptr.as_ref().left);
        node_ptr.as_mut().refresh_balance();
        set_left(right_ptr, Some(node_ptr));
        right_ptr.as_mut().refresh_balance();
        right_ptr
    }
}

impl<K> Default for AvlTree<K> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> Clone for AvlTree<K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, fmt)
    }
}

impl<K: Ord + fmt::Debug> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord + fmt::Debug> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
