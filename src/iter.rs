use std::{iter::FusedIterator, marker::PhantomData, ptr::NonNull};

use crate::{Node, NodePtr, SplayTree};

/// An in-order iterator over shared references to a tree's nodes, driven
/// by successor pointers; no splaying, no allocation.
pub struct Iter<'a> {
    current: NodePtr,
    phantom: PhantomData<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: current is a live node while the tree is borrowed.
        let current = unsafe { self.current?.as_ref() };
        self.current = current.next();
        Some(current)
    }
}

impl FusedIterator for Iter<'_> {}

impl SplayTree {
    /// Iterate the nodes in ascending key order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            current: self.first().map(NonNull::from),
            phantom: PhantomData,
        }
    }
}

impl<'a> IntoIterator for &'a SplayTree {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Key;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_tree_yields_nothing() {
        let tree = SplayTree::new();
        let mut iter = tree.iter();
        assert!(iter.next().is_none());
        assert!(iter.next().is_none()); // fused
    }

    #[test]
    fn yields_keys_in_ascending_order() {
        let mut tree = SplayTree::new();
        for key in [42, 7, 100, 0, 23] {
            tree.insert(key);
        }
        let keys: Vec<Key> = tree.iter().map(Node::key).collect();
        assert_eq!(vec![0, 7, 23, 42, 100], keys);
    }

    #[test]
    fn single_node() {
        let mut tree = SplayTree::new();
        tree.insert(1);
        let mut iter = tree.iter();
        assert_eq!(Some(1), iter.next().map(Node::key));
        assert!(iter.next().is_none());
    }

    #[test]
    fn for_loop_over_a_reference() {
        let mut tree = SplayTree::new();
        for key in [2, 1, 3] {
            tree.insert(key);
        }
        let mut seen = Vec::new();
        for node in &tree {
            seen.push(node.key());
        }
        assert_eq!(vec![1, 2, 3], seen);
    }
}
