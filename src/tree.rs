use std::{cmp::Ordering::*, ptr::NonNull};

use crate::{HashParams, Key, Node, NodePtr, NodePtrExt, SplayTree, alloc, node};

impl SplayTree {
    /// An empty tree with the default hash parameters.
    pub fn new() -> Self {
        Self::with_params(HashParams::default())
    }

    /// An empty tree hashing with `params`; the parameters are fixed for
    /// the tree's lifetime.
    pub fn with_params(params: HashParams) -> Self {
        SplayTree { root: None, params }
    }

    pub fn params(&self) -> HashParams {
        self.params
    }

    /// Number of keys in the tree, read off the root's augmentation.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Rolling hash of the sorted key sequence; 0 for an empty tree.
    pub fn hash(&self) -> u64 {
        self.root.hash()
    }

    pub fn root(&self) -> Option<&Node> {
        // SAFETY: the root, when present, is a live tree-owned node.
        self.root.map(|n| unsafe { &*n.as_ptr() })
    }

    /// Node with the smallest key.
    pub fn first(&self) -> Option<&Node> {
        // SAFETY: as in root().
        self.root.map(|n| unsafe { &*node::leftmost(n).as_ptr() })
    }

    /// Node with the largest key.
    pub fn last(&self) -> Option<&Node> {
        // SAFETY: as in root().
        self.root.map(|n| unsafe { &*node::rightmost(n).as_ptr() })
    }

    /// Insert `key`. The new node is splayed to the root, so afterwards
    /// `self.root()` carries `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is already present; the tree does not hold
    /// multisets, and a duplicate insertion is a caller error rather than
    /// a runtime condition.
    pub fn insert(&mut self, key: Key) {
        let mut parent: NodePtr = None;
        let mut cursor = self.root;
        let mut went_left = false;
        while let Some(current) = cursor {
            parent = cursor;
            // SAFETY: the descent only follows live child links.
            let current = unsafe { current.as_ref() };
            match key.cmp(&current.key()) {
                Equal => panic!("key {key} is already in the tree"),
                Less => {
                    cursor = current.left;
                    went_left = true;
                }
                Greater => {
                    cursor = current.right;
                    went_left = false;
                }
            }
        }

        // SAFETY: the node is linked below or becomes the root; either way
        // the tree owns it from here on.
        let node = unsafe { alloc::alloc_node(key, &self.params) };
        if parent.is_none() {
            self.root = Some(node);
            return;
        }
        if went_left {
            parent.set_left_child(Some(node));
        } else {
            parent.set_right_child(Some(node));
        }
        // Every ancestor gained a node; fix the augmentations before the
        // splay restructures the path.
        self.propagate_to_root(parent);
        self.splay(node);
    }

    /// Look `key` up and splay its node to the root on a hit. A miss
    /// changes nothing, structurally or otherwise.
    pub fn find(&mut self, key: Key) -> Option<&Node> {
        let node = self.find_node(key)?;
        self.splay(node);
        // SAFETY: splaying moved the node, not its allocation.
        Some(unsafe { &*node.as_ptr() })
    }

    /// Non-mutating membership test.
    pub fn contains(&self, key: Key) -> bool {
        self.find_node(key).is_some()
    }

    /// Remove `key` if present; removing an absent key is a no-op.
    pub fn remove(&mut self, key: Key) {
        let Some(target) = self.find_node(key) else {
            return;
        };
        self.remove_node(target);
        // remove_node unlinked the target; only this one node is freed,
        // never the subtrees its stale links still mention.
        let _ = unsafe { alloc::own_back(target) };
    }

    /// Keys in ascending order.
    pub fn inorder(&self) -> Vec<Key> {
        self.iter().map(Node::key).collect()
    }

    /// Drop every node, walking child links only.
    pub fn clear(&mut self) {
        let mut parent = self.root.take();
        while let Some(current) = parent {
            // SAFETY: nodes are freed strictly bottom-up, so everything
            // reachable here is still live.
            let current_ref = unsafe { current.as_ref() };
            if current_ref.left.is_some() {
                parent = current_ref.left;
                continue;
            }
            if current_ref.right.is_some() {
                parent = current_ref.right;
                continue;
            }
            parent = current_ref.parent;
            if let Some(mut p) = parent {
                let p = unsafe { p.as_mut() };
                if p.left == Some(current) {
                    p.left = None;
                } else {
                    p.right = None;
                }
            }
            let _ = unsafe { alloc::own_back(current) };
        }
    }

    fn find_node(&self, key: Key) -> Option<NonNull<Node>> {
        let mut node = self.root;
        while let Some(candidate) = node {
            // SAFETY: the descent only follows live child links.
            let candidate = unsafe { candidate.as_ref() };
            match key.cmp(&candidate.key()) {
                Equal => break,
                Less => node = candidate.left,
                Greater => node = candidate.right,
            }
        }
        node
    }
}

impl Default for SplayTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SplayTree {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Equality is same-key-set equality, independent of shape: identical
/// trees short-circuit, differing root hashes reject in O(1), and matching
/// hashes fall back to the full in-order comparison to rule out a
/// collision. Hashes are only comparable when both trees use the same
/// parameters.
impl PartialEq for SplayTree {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        if self.params == other.params && self.hash() != other.hash() {
            return false;
        }
        self.iter().map(Node::key).eq(other.iter().map(Node::key))
    }
}
