use std::cmp;
use std::fmt;
use std::ptr::NonNull;

pub(crate) type NodePtr<K> = NonNull<Node<K>>;
pub(crate) type Link<K> = Option<NodePtr<K>>;

/// A single tree node holding one key.
///
/// Nodes linked into a tree are heap allocations owned by that tree and
/// released only when the tree removes them or is cleared. All three links
/// are plain pointers into such allocations; the parent link is never
/// followed to free anything.
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    pub(crate) parent: Link<K>,
    pub(crate) balance: i32,
}

// An owned `Node` is always detached; borrowed nodes only reach keys of the
// same tree.
unsafe impl<K: Send> Send for Node<K> {}
unsafe impl<K: Sync> Sync for Node<K> {}

impl<K> Node<K> {
    /// Creates a detached leaf node.
    pub fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
            parent: None,
            balance: 0,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn left(&self) -> Option<&Node<K>> {
        self.left.map(|left_ptr| unsafe { &*left_ptr.as_ptr() })
    }

    pub fn right(&self) -> Option<&Node<K>> {
        self.right.map(|right_ptr| unsafe { &*right_ptr.as_ptr() })
    }

    /// Returns the node this node hangs from, or `None` for a root.
    pub fn parent(&self) -> Option<&Node<K>> {
        self.parent.map(|parent_ptr| unsafe { &*parent_ptr.as_ptr() })
    }

    /// Returns the balance factor recorded the last time a rebalance pass
    /// visited this node. Always `0` for nodes of an unbalanced tree.
    pub fn balance_factor(&self) -> i32 {
        self.balance
    }

    /// Number of nodes on the longest path from this node down to a leaf,
    /// this node included. Walks the whole subtree.
    ///
    /// Recurses once per level, so a list-shaped subtree tens of thousands of
    /// nodes deep can exhaust the thread's stack.
    pub fn height(&self) -> usize {
        cmp::max(height(self.left), height(self.right)) + 1
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Height of the left subtree minus height of the right subtree.
    pub(crate) fn actual_balance(&self) -> i32 {
        height(self.left) as i32 - height(self.right) as i32
    }

    pub(crate) fn refresh_balance(&mut self) {
        self.balance = self.actual_balance();
    }

    /// Moves the node into its own heap allocation, hanging from `parent`.
    pub(crate) fn create(parent: Link<K>, mut node: Node<K>) -> NodePtr<K> {
        node.parent = parent;
        let boxed = Box::new(node);
        unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) }
    }

    /// Releases an allocation made by [`Node::create`] and hands back its key.
    ///
    /// The node must already be unlinked, and no other pointer to it may be
    /// used afterwards.
    pub(crate) unsafe fn destroy(node_ptr: NodePtr<K>) -> K {
        Box::from_raw(node_ptr.as_ptr()).key
    }
}

/// Height of a possibly empty subtree, `0` when empty.
pub(crate) fn height<K>(link: Link<K>) -> usize {
    match link {
        None => 0,
        Some(node_ptr) => unsafe { node_ptr.as_ref().height() },
    }
}

/// Makes `child` the left subtree of `node_ptr` and points its parent link back.
pub(crate) fn set_left<K>(mut node_ptr: NodePtr<K>, child: Link<K>) {
    unsafe {
        node_ptr.as_mut().left = child;
        if let Some(mut child_ptr) = child {
            child_ptr.as_mut().parent = Some(node_ptr);
        }
    }
}

/// Mirror image of [`set_left`].
pub(crate) fn set_right<K>(mut node_ptr: NodePtr<K>, child: Link<K>) {
    unsafe {
        node_ptr.as_mut().right = child;
        if let Some(mut child_ptr) = child {
            child_ptr.as_mut().parent = Some(node_ptr);
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("balance", &self.balance)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<K: fmt::Display> fmt::Display for Node<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}
