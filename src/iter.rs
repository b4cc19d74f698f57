use std::fmt;
use std::iter::FusedIterator;

use crate::node::Node;

/// An iterator over the keys of a tree in ascending order.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    /// Turns the key iterator into one over the nodes themselves.
    pub(crate) fn into_nodes(mut self) -> impl Iterator<Item = &'a Node<K>> {
        std::iter::from_fn(move || self.next_node())
    }

    fn next_node(&mut self) -> Option<&'a Node<K>> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.remaining = self.remaining.saturating_sub(1);
        Some(node)
    }

    fn push_left_spine(&mut self, mut current: Option<&'a Node<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left();
        }
    }
}

// Auto derived clone would require K: Clone
impl<'a, K> Clone for Iter<'a, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Iter<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(Node::key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
