use std::ptr::NonNull;

use crate::{Node, NodePtr, NodePtrExt, SplayTree, node::rightmost};

// The restructuring engine. Everything here preserves the in-order key
// sequence; only the shape and the augmented fields change.
impl SplayTree {
    /// Rotate `x` with its parent. No-op when `x` is the root.
    ///
    /// ```text
    ///      gp            gp
    ///      p             x
    ///     / \           / \
    ///    x   c  ---->  a   p
    ///   / \               / \
    ///  a   b             b   c
    ///
    ///  ---> rotate right (x is a left child)
    ///  <--- rotate left  (mirror image)
    /// ```
    ///
    /// The subtrees a, b, c and everything above gp keep their augmented
    /// values. p and x must be recomputed, p first: after the rewiring p is
    /// x's child, so x's values depend on p's.
    pub(crate) fn rotate(&mut self, x: NonNull<Node>) {
        let params = self.params;
        let mut node: NodePtr = Some(x);
        let mut p = node.parent();
        if p.is_none() {
            return;
        }
        let mut gp = p.parent();

        if node.is_left_child() {
            // Right rotation: x's right subtree becomes p's left.
            let b = node.right();
            p.set_left_child(b);
            node.set_right_child(p);
        } else {
            // Left rotation: x's left subtree becomes p's right.
            let b = node.left();
            p.set_right_child(b);
            node.set_left_child(p);
        }

        // Whatever slot used to hold p now holds x.
        if gp.is_some() {
            if gp.left() == p {
                gp.set_left_child(node);
            } else {
                gp.set_right_child(node);
            }
        } else {
            // x is the new root; clear the stale back-reference.
            node.set_parent(None);
            self.root = node;
        }

        // Order matters: p's children are final, x's child p is not
        // correct until p has been recomputed.
        p.update_augmentations(&params);
        node.update_augmentations(&params);
    }

    /// Rotate `node` up until it is the root, one zig / zig-zig / zig-zag
    /// step at a time, then point the tree at it.
    pub(crate) fn splay(&mut self, node: NonNull<Node>) {
        let cur: NodePtr = Some(node);
        while cur.parent().is_some() {
            if cur.parent().parent().is_none() {
                // Zig: the parent is the root.
                self.rotate(node);
            } else if cur.zig_zig() {
                // Zig-zig: rotate at the parent first, then at the node.
                // SAFETY: the loop guard saw a parent, rotations below the
                // grandparent cannot have removed it.
                let parent = cur.parent().unwrap();
                self.rotate(parent);
                self.rotate(node);
            } else if cur.zig_zag() {
                // Zig-zag: two rotations at the node.
                self.rotate(node);
                self.rotate(node);
            }
        }
        self.root = Some(node);
    }

    /// Put `m` in `n`'s slot: `n`'s parent (or the root pointer) now leads
    /// to `m`, and `m`'s back-reference follows. `n` itself and the
    /// children of both nodes are untouched.
    pub(crate) fn replace_node(&mut self, n: NonNull<Node>, mut m: NodePtr) {
        let node: NodePtr = Some(n);
        if self.root == node {
            self.root = m;
        }
        let mut parent = node.parent();
        if node.is_left_child() {
            parent.set_left_child(m);
        } else if node.is_right_child() {
            parent.set_right_child(m);
        }
        // Covers the root case, where neither branch above ran.
        m.set_parent(parent);
    }

    /// Recompute sizes and hashes on the path from `node` to the root.
    pub(crate) fn propagate_to_root(&mut self, node: NodePtr) {
        let params = self.params;
        let mut cur = node;
        while cur.is_some() {
            cur.update_augmentations(&params);
            cur = cur.parent();
        }
    }

    /// Unlink `node` from the tree and splay the position just above where
    /// the structural change happened. The node itself is left for the
    /// caller to free; its stale links are never followed again.
    pub(crate) fn remove_node(&mut self, target: NonNull<Node>) {
        let params = self.params;
        let node: NodePtr = Some(target);
        let mut to_splay = node.parent();

        if node.left().is_none() {
            // Splice the node out: parent--node--right becomes
            // parent--right. The right child may be absent.
            self.replace_node(target, node.right());
            to_splay.update_augmentations(&params);
        } else if node.right().is_none() {
            self.replace_node(target, node.left());
            to_splay.update_augmentations(&params);
        } else {
            // Two children: the in-order predecessor (rightmost of the
            // left subtree, never has a right child) takes the node's
            // place.
            // SAFETY: the branch guard saw a left child.
            let pred = rightmost(node.left().unwrap());
            let mut pred_ptr: NodePtr = Some(pred);

            if pred_ptr.parent() == node {
                // The predecessor is the node's left child: its own left
                // subtree is already in place, it only adopts the right
                // one. Splay the predecessor itself.
                to_splay = pred_ptr;
                self.replace_node(target, pred_ptr);
                pred_ptr.set_right_child(node.right());
                self.propagate_to_root(pred_ptr);
            } else {
                // The predecessor sits deeper in the left subtree. Move it
                // into the node's slot with both of the node's subtrees,
                // then close the gap it left behind with its former left
                // child. Splay the predecessor's original parent, the
                // lowest position whose subtree actually changed.
                let mut original_parent = pred_ptr.parent();
                let original_child = pred_ptr.left();
                to_splay = original_parent;

                self.replace_node(target, pred_ptr);
                pred_ptr.set_left_child(node.left());
                pred_ptr.set_right_child(node.right());
                original_parent.set_right_child(original_child);
                self.propagate_to_root(original_parent);
            }
        }

        if let Some(next_root) = to_splay {
            self.splay(next_root);
        }
    }
}
