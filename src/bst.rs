//! An unbalanced binary search tree.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ptr;

use log::{debug, trace, warn};

use crate::error::{InvariantViolation, TreeError};
use crate::iter::Iter;
use crate::node::{set_left, set_right, Link, Node, NodePtr};

/// A binary search tree without any balancing.
///
/// Equal keys are kept: an inserted key that equals a node's key goes to that
/// node's right subtree.
///
/// ```
/// use bstree::BinarySearchTree;
/// let mut tree = BinarySearchTree::new();
/// for key in [5, 3, 7, 1, 4, 6, 8] {
///     tree.insert(key);
/// }
/// assert_eq!(tree.traverse_in_order(), vec![1, 3, 4, 5, 6, 7, 8]);
/// tree.delete(&3).unwrap();
/// assert_eq!(
///     tree.traverse_breadth_first(),
///     vec![vec![5], vec![4, 7], vec![1, 6, 8]]
/// );
/// ```
pub struct BinarySearchTree<K> {
    root: Link<K>,
    num_nodes: usize,
    marker: PhantomData<Box<Node<K>>>,
}

// The tree owns every node reachable from its root.
unsafe impl<K: Send> Send for BinarySearchTree<K> {}
unsafe impl<K: Sync> Sync for BinarySearchTree<K> {}

impl<K> BinarySearchTree<K> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
            marker: PhantomData,
        }
    }

    /// Creates a tree holding a single node with the given key.
    pub fn with_root(key: K) -> Self {
        Self::from_node(Node::new(key))
    }

    /// Creates a tree rooted at the given node.
    pub fn from_node(node: Node<K>) -> Self {
        let mut tree = Self::new();
        tree.set_root(node);
        tree
    }

    /// Returns the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.map(|root_ptr| unsafe { &*root_ptr.as_ptr() })
    }

    /// Discards every node and makes `node` the only node of the tree.
    pub fn set_root(&mut self, node: Node<K>) {
        self.clear();
        self.root = Some(Node::create(None, node));
        self.num_nodes = 1;
    }

    /// Returns true if the tree contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes (equal keys counted separately).
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// Computed recursively by [`Node::height`], so it shares that method's
    /// depth limit on list-shaped trees.
    pub fn height(&self) -> usize {
        self.root().map_or(0, Node::height)
    }

    /// Removes all nodes.
    pub fn clear(&mut self) {
        // Iterative so that a degenerate tree cannot exhaust the stack.
        let mut pending: Vec<NodePtr<K>> = self.root.take().into_iter().collect();
        while let Some(node_ptr) = pending.pop() {
            unsafe {
                pending.extend(node_ptr.as_ref().left);
                pending.extend(node_ptr.as_ref().right);
                Node::destroy(node_ptr);
            }
        }
        self.num_nodes = 0;
    }

    /// Gets an iterator over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root(), self.num_nodes)
    }

    /// Runs `f` on the detached root and installs whatever it returns as the
    /// new root. The node count is left alone.
    pub(crate) fn replace_root<F>(&mut self, f: F)
    where
        F: FnOnce(Link<K>) -> Link<K>,
    {
        self.root = f(self.root.take());
        if let Some(mut root_ptr) = self.root {
            unsafe { root_ptr.as_mut().parent = None };
        }
    }

    fn find(&self, key: &K) -> Option<&Node<K>>
    where
        K: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(node.key()) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }
}

impl<K: Ord + fmt::Debug> BinarySearchTree<K> {
    /// Inserts a key. Never rejects duplicates.
    pub fn insert(&mut self, key: K) {
        self.insert_node(Node::new(key));
    }

    /// Links a detached node into the tree at the first free slot on its
    /// search path.
    pub fn insert_node(&mut self, node: Node<K>) {
        let mut parent: Link<K> = None;
        let mut go_left = false;
        let mut depth = 0;
        let mut current = self.root;
        while let Some(node_ptr) = current {
            parent = current;
            depth += 1;
            go_left = node.key() < unsafe { node_ptr.as_ref().key() };
            current = unsafe {
                if go_left {
                    node_ptr.as_ref().left
                } else {
                    node_ptr.as_ref().right
                }
            };
        }
        trace!("insert: key {:?} placed at depth {}", node.key(), depth);
        let new_ptr = Some(Node::create(parent, node));
        match parent {
            None => self.root = new_ptr,
            Some(parent_ptr) if go_left => set_left(parent_ptr, new_ptr),
            Some(parent_ptr) => set_right(parent_ptr, new_ptr),
        }
        self.num_nodes += 1;
    }

    /// Removes one node holding `key`.
    ///
    /// A node with two children takes over its in-order successor's key, and
    /// the successor node is unlinked instead. An absent key is reported as
    /// [`TreeError::NotFound`] and leaves the tree unchanged.
    ///
    /// The descent recurses once per level, so a list-shaped tree tens of
    /// thousands of nodes deep can exhaust the thread's stack.
    pub fn delete(&mut self, key: &K) -> Result<(), TreeError> {
        let mut removed = false;
        self.replace_root(|root| delete_from(root, key, &mut removed));
        if !removed {
            warn!("delete: key {:?} not found in tree", key);
            return Err(TreeError::NotFound);
        }
        self.num_nodes -= 1;
        Ok(())
    }

    /// Returns the first node holding `key` met on the way down.
    pub fn search(&self, key: &K) -> Result<&Node<K>, TreeError> {
        self.find(key).ok_or_else(|| {
            debug!("search: key {:?} not found in tree", key);
            TreeError::NotFound
        })
    }

    /// Returns true if some node holds `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Checks ordering, parent links and the node count.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        if self.root().map_or(false, |root| root.parent().is_some()) {
            return Err(InvariantViolation::BrokenParentLink);
        }

        let mut found = 0;
        let mut previous: Option<&K> = None;
        for node in self.iter().into_nodes() {
            for child in [node.left(), node.right()].into_iter().flatten() {
                if !child.parent().map_or(false, |parent| ptr::eq(parent, node)) {
                    return Err(InvariantViolation::BrokenParentLink);
                }
            }
            if previous.map_or(false, |previous| previous > node.key()) {
                return Err(InvariantViolation::Unordered);
            }
            previous = Some(node.key());
            found += 1;
        }

        if found != self.num_nodes {
            return Err(InvariantViolation::LengthMismatch {
                found,
                recorded: self.num_nodes,
            });
        }
        Ok(())
    }

    /// Asserts that the internal tree structure is consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        if let Err(violation) = self.validate() {
            panic!("inconsistent binary search tree: {}", violation);
        }
    }
}

impl<K: Clone> BinarySearchTree<K> {
    /// Returns all keys in ascending order.
    pub fn traverse_in_order(&self) -> Vec<K> {
        self.iter().cloned().collect()
    }

    /// Returns the keys level by level, root first, left to right within a
    /// level.
    pub fn traverse_breadth_first(&self) -> Vec<Vec<K>> {
        let mut levels = Vec::new();
        let mut queue: VecDeque<&Node<K>> = self.root().into_iter().collect();
        while !queue.is_empty() {
            let level_size = queue.len();
            let mut level = Vec::with_capacity(level_size);
            for _ in 0..level_size {
                if let Some(node) = queue.pop_front() {
                    level.push(node.key().clone());
                    queue.extend(node.left());
                    queue.extend(node.right());
                }
            }
            levels.push(level);
        }
        levels
    }
}

// Returns the new root of the subtree, which the caller links back in.
fn delete_from<K: Ord>(link: Link<K>, key: &K, removed: &mut bool) -> Link<K> {
    let mut node_ptr = link?;
    unsafe {
        match key.cmp(&node_ptr.as_ref().key) {
            Ordering::Less => {
                let left = delete_from(node_ptr.as_ref().left, key, removed);
                set_left(node_ptr, left);
            }
            Ordering::Greater => {
                let right = delete_from(node_ptr.as_ref().right, key, removed);
                set_right(node_ptr, right);
            }
            Ordering::Equal => {
                *removed = true;
                return match (node_ptr.as_ref().left, node_ptr.as_ref().right) {
                    (None, None) => {
                        Node::destroy(node_ptr);
                        None
                    }
                    (Some(child), None) | (None, Some(child)) => {
                        Node::destroy(node_ptr);
                        Some(child)
                    }
                    (Some(_), Some(right)) => {
                        let (rest, successor_ptr) = detach_min(right);
                        node_ptr.as_mut().key = Node::destroy(successor_ptr);
                        set_right(node_ptr, rest);
                        Some(node_ptr)
                    }
                };
            }
        }
    }
    Some(node_ptr)
}

// Unlinks the leftmost node of a subtree. Returns what is left of the subtree
// and the detached node.
fn detach_min<K>(node_ptr: NodePtr<K>) -> (Link<K>, NodePtr<K>) {
    match unsafe { node_ptr.as_ref().left } {
        None => (unsafe { node_ptr.as_ref().right }, node_ptr),
        Some(left_ptr) => {
            let (rest, min_ptr) = detach_min(left_ptr);
            set_left(node_ptr, rest);
            (Some(node_ptr), min_ptr)
        }
    }
}

fn copy_node<K: Clone>(source_ptr: NodePtr<K>) -> NodePtr<K> {
    let source = unsafe { source_ptr.as_ref() };
    let mut copy = Node::new(source.key.clone());
    copy.balance = source.balance;
    Node::create(None, copy)
}

impl<K> Drop for BinarySearchTree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> Default for BinarySearchTree<K> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> Clone for BinarySearchTree<K> {
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        let source_root = match self.root {
            None => return tree,
            Some(root_ptr) => root_ptr,
        };
        let copy_root = copy_node(source_root);
        tree.root = Some(copy_root);
        tree.num_nodes = self.num_nodes;

        // Explicit stack of (source, copy) pairs whose children still need
        // copying, so a degenerate tree cannot exhaust the call stack.
        let mut pending = vec![(source_root, copy_root)];
        while let Some((source_ptr, copy_ptr)) = pending.pop() {
            let source = unsafe { source_ptr.as_ref() };
            if let Some(left_ptr) = source.left {
                let left_copy = copy_node(left_ptr);
                set_left(copy_ptr, Some(left_copy));
                pending.push((left_ptr, left_copy));
            }
            if let Some(right_ptr) = source.right {
                let right_copy = copy_node(right_ptr);
                set_right(copy_ptr, Some(right_copy));
                pending.push((right_ptr, right_copy));
            }
        }
        tree
    }
}

impl<K: fmt::Debug> fmt::Debug for BinarySearchTree<K> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_list().entries(self.iter()).finish()
    }
}

impl<K: Ord + fmt::Debug> FromIterator<K> for BinarySearchTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord + fmt::Debug> Extend<K> for BinarySearchTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a BinarySearchTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
