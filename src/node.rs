use std::{fmt::Debug, ptr::NonNull};

use crate::{HashParams, Key, Node, NodePtr, NodePtrExt};

// Public API: read accessors. Test tooling asserts the tree's invariants
// through these, so they hand out plain shared references.
impl Node {
    pub fn key(&self) -> Key {
        self.key
    }

    /// Number of nodes in the subtree rooted here.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Rolling hash of this subtree's in-order key sequence.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn left(&self) -> Option<&Node> {
        // SAFETY: child links always point at live, tree-owned nodes.
        self.left.map(|n| unsafe { &*n.as_ptr() })
    }

    pub fn right(&self) -> Option<&Node> {
        // SAFETY: as in left().
        self.right.map(|n| unsafe { &*n.as_ptr() })
    }

    pub fn parent(&self) -> Option<&Node> {
        // SAFETY: the parent back-reference is fixed up on every relink.
        self.parent.map(|n| unsafe { &*n.as_ptr() })
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn has_grandparent(&self) -> bool {
        self.parent.parent().is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn is_left_child(&self) -> bool {
        self.parent
            .left()
            .is_some_and(|l| std::ptr::eq(l.as_ptr(), self))
    }

    pub fn is_right_child(&self) -> bool {
        self.parent
            .right()
            .is_some_and(|r| std::ptr::eq(r.as_ptr(), self))
    }
}

// Crate API: construction, linking, and augmentation maintenance.
impl Node {
    pub(crate) fn new(key: Key, params: &HashParams) -> Self {
        Node {
            parent: None,
            right: None,
            left: None,
            key,
            size: 1,
            hash: params.key_hash(key),
        }
    }

    /// This node and its parent are same-side children of their parents.
    pub(crate) fn zig_zig(&self) -> bool {
        (self.is_left_child() && self.parent.is_left_child())
            || (self.is_right_child() && self.parent.is_right_child())
    }

    /// This node and its parent are opposite-side children.
    pub(crate) fn zig_zag(&self) -> bool {
        (self.is_left_child() && self.parent.is_right_child())
            || (self.is_right_child() && self.parent.is_left_child())
    }

    /// Set the left child and fix the child's back-reference.
    pub(crate) fn set_left_child(&mut self, child: NodePtr) {
        self.left = child;
        if let Some(mut child) = child {
            unsafe { child.as_mut() }.parent = self.into();
        }
    }

    /// Set the right child and fix the child's back-reference.
    pub(crate) fn set_right_child(&mut self, child: NodePtr) {
        self.right = child;
        if let Some(mut child) = child {
            unsafe { child.as_mut() }.parent = self.into();
        }
    }

    pub(crate) fn update_size_from_children(&mut self) {
        self.size = 1 + self.left.size() + self.right.size();
    }

    pub(crate) fn update_hash_from_children(&mut self, params: &HashParams) {
        self.hash = params.combine(self.left.hash(), self.key, self.left.size(), self.right.hash());
    }

    /// Recompute both augmented fields from the children. Only valid once
    /// both children already carry correct values; rotations therefore
    /// recompute the demoted parent before the promoted node.
    pub(crate) fn update_augmentations(&mut self, params: &HashParams) {
        self.update_size_from_children();
        self.update_hash_from_children(params);
    }

    /// In-order successor, by pointer chasing rather than recursion.
    pub(crate) fn next(&self) -> NodePtr {
        // With a right-hand child, go down and then left as far as we can.
        if let Some(mut current) = self.right {
            // SAFETY: by the loop guard, current is a live child.
            while let Some(left) = unsafe { current.as_ref() }.left {
                current = left;
            }
            return Some(current);
        }
        // No right-hand children: climb while we are a right-hand child;
        // the first ancestor we are left of is the successor.
        let mut node_ref = self;
        let mut parent;
        loop {
            parent = node_ref.parent;
            let Some(p) = parent else {
                break;
            };
            // SAFETY: parent links point at live nodes.
            let p_ref = unsafe { p.as_ref() };
            let came_from_right = p_ref
                .right
                .is_some_and(|r| std::ptr::eq(node_ref, r.as_ptr()));
            if !came_from_right {
                break;
            }
            node_ref = p_ref;
        }
        parent
    }
}

/// Rightmost node of the subtree rooted at `node`; with two children to
/// delete, this is the in-order predecessor of the subtree's parent.
pub(crate) fn rightmost(mut node: NonNull<Node>) -> NonNull<Node> {
    // SAFETY: right links point at live nodes.
    while let Some(right) = unsafe { node.as_ref() }.right {
        node = right;
    }
    node
}

/// Leftmost node of the subtree rooted at `node`.
pub(crate) fn leftmost(mut node: NonNull<Node>) -> NonNull<Node> {
    // SAFETY: left links point at live nodes.
    while let Some(left) = unsafe { node.as_ref() }.left {
        node = left;
    }
    node
}

impl Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "({:?} size:{} hash:{:#x})",
            self.key, self.size, self.hash
        ))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fresh_node_is_a_detached_leaf() {
        let params = HashParams::default();
        let node = Node::new(55, &params);
        assert!(node.is_leaf());
        assert!(!node.has_parent());
        assert!(!node.has_grandparent());
        assert!(!node.is_left_child());
        assert!(!node.is_right_child());
        assert_eq!(1, node.size());
        assert_eq!(params.key_hash(55), node.hash());
    }

    #[test]
    fn linking_fixes_the_back_reference() {
        let params = HashParams::default();
        let mut parent = Node::new(10, &params);
        let mut left = Node::new(5, &params);
        let mut right = Node::new(15, &params);
        parent.set_left_child((&mut left).into());
        parent.set_right_child((&mut right).into());

        assert!(left.is_left_child());
        assert!(right.is_right_child());
        assert!(!left.is_right_child());
        assert!(std::ptr::eq(left.parent().unwrap(), &parent));
        assert!(std::ptr::eq(right.parent().unwrap(), &parent));
        assert!(!parent.is_leaf());
    }

    #[test]
    fn augmentations_recompute_from_children() {
        let params = HashParams::default();
        let mut parent = Node::new(10, &params);
        let mut left = Node::new(5, &params);
        let mut right = Node::new(15, &params);
        parent.set_left_child((&mut left).into());
        parent.set_right_child((&mut right).into());
        parent.update_augmentations(&params);

        assert_eq!(3, parent.size());
        assert_eq!(
            params.combine(left.hash(), 10, 1, right.hash()),
            parent.hash()
        );
    }

    #[test]
    fn zig_shapes() {
        let params = HashParams::default();
        // 20 -> 10 -> 5 is a left/left chain: zig-zig from 5.
        let mut gp = Node::new(20, &params);
        let mut p = Node::new(10, &params);
        let mut n = Node::new(5, &params);
        gp.set_left_child((&mut p).into());
        p.set_left_child((&mut n).into());
        assert!(n.zig_zig());
        assert!(!n.zig_zag());

        // Move n to p's right: left/right is zig-zag.
        p.set_left_child(None);
        p.set_right_child((&mut n).into());
        assert!(!n.zig_zig());
        assert!(n.zig_zag());

        // p itself only has the root above it: neither shape.
        assert!(!p.zig_zig());
        assert!(!p.zig_zag());
        assert!(n.has_grandparent());
        assert!(!p.has_grandparent());
    }

    #[test]
    fn next_walks_inorder() {
        let params = HashParams::default();
        //     10
        //    /  \
        //   5    15
        //    \
        //     7
        let mut root = Node::new(10, &params);
        let mut five = Node::new(5, &params);
        let mut fifteen = Node::new(15, &params);
        let mut seven = Node::new(7, &params);
        root.set_left_child((&mut five).into());
        root.set_right_child((&mut fifteen).into());
        five.set_right_child((&mut seven).into());

        assert_eq!(Some(7), five.next().map(|n| unsafe { n.as_ref() }.key()));
        assert_eq!(Some(10), seven.next().map(|n| unsafe { n.as_ref() }.key()));
        assert_eq!(Some(15), root.next().map(|n| unsafe { n.as_ref() }.key()));
        assert_eq!(None, fifteen.next());
    }
}
