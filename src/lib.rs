//! A splay tree over integer keys in the style of the linux kernel's
//! intrusive trees: nullable `NonNull` links, parent back-references used
//! for navigation only, and balancing done by splaying accessed nodes to
//! the root.
//!
//! Every subtree is augmented with its node count and a positional rolling
//! hash of its in-order key sequence, kept correct across every rotation.
//! Since the in-order sequence of a binary search tree is the sorted key
//! sequence, the root hash is a function of the key *set*, and two trees
//! holding the same keys compare equal in O(1) in the common case.
mod alloc;
mod hash;
mod iter;
mod node;
mod splay;
mod tree;

pub use hash::{DEFAULT_BASE, DEFAULT_MODULUS, HashParams};
pub use iter::Iter;

use std::ptr::NonNull;

/// Key type. Keys are unique within a tree; multiset semantics are
/// deliberately unsupported.
pub type Key = i64;

pub type NodePtr = Option<NonNull<Node>>;

/// One key and the subtree rooted at it.
///
/// `left` and `right` are owning links: the tree frees nodes by walking
/// child pointers only. `parent` is a non-owning back-reference and is null
/// exactly for the root.
pub struct Node {
    pub(crate) parent: NodePtr,
    pub(crate) right: NodePtr,
    pub(crate) left: NodePtr,
    key: Key,
    /// Count of nodes in this subtree: `1 + size(left) + size(right)`.
    size: usize,
    /// Polynomial hash of this subtree's in-order key sequence:
    /// `hash(left) + key * P^size(left) + hash(right) * P^(size(left) + 1)`,
    /// all mod `M`.
    hash: u64,
}

/// Convenience operations lifted onto nullable node pointers, so the
/// restructuring code can treat absent children uniformly.
pub(crate) trait NodePtrExt {
    fn left(&self) -> NodePtr;
    fn right(&self) -> NodePtr;
    fn parent(&self) -> NodePtr;
    fn size(&self) -> usize;
    fn hash(&self) -> u64;
    fn is_left_child(&self) -> bool;
    fn is_right_child(&self) -> bool;
    fn zig_zig(&self) -> bool;
    fn zig_zag(&self) -> bool;
    fn set_left_child(&mut self, child: NodePtr);
    fn set_right_child(&mut self, child: NodePtr);
    fn set_parent(&mut self, parent: NodePtr);
    fn update_augmentations(&mut self, params: &HashParams);
}

impl NodePtrExt for NodePtr {
    #[inline(always)]
    fn left(&self) -> NodePtr {
        self.and_then(|v| unsafe { v.as_ref() }.left)
    }

    #[inline(always)]
    fn right(&self) -> NodePtr {
        self.and_then(|v| unsafe { v.as_ref() }.right)
    }

    #[inline(always)]
    fn parent(&self) -> NodePtr {
        self.and_then(|v| unsafe { v.as_ref() }.parent)
    }

    /// Subtree size; an absent subtree counts 0.
    #[inline(always)]
    fn size(&self) -> usize {
        self.map_or(0, |v| unsafe { v.as_ref() }.size)
    }

    /// Subtree hash; an absent subtree hashes to 0.
    #[inline(always)]
    fn hash(&self) -> u64 {
        self.map_or(0, |v| unsafe { v.as_ref() }.hash)
    }

    #[inline(always)]
    fn is_left_child(&self) -> bool {
        self.is_some_and(|v| unsafe { v.as_ref() }.is_left_child())
    }

    #[inline(always)]
    fn is_right_child(&self) -> bool {
        self.is_some_and(|v| unsafe { v.as_ref() }.is_right_child())
    }

    #[inline(always)]
    fn zig_zig(&self) -> bool {
        self.is_some_and(|v| unsafe { v.as_ref() }.zig_zig())
    }

    #[inline(always)]
    fn zig_zag(&self) -> bool {
        self.is_some_and(|v| unsafe { v.as_ref() }.zig_zag())
    }

    #[inline(always)]
    fn set_left_child(&mut self, child: NodePtr) {
        if let Some(mut node) = *self {
            unsafe { node.as_mut() }.set_left_child(child);
        }
    }

    #[inline(always)]
    fn set_right_child(&mut self, child: NodePtr) {
        if let Some(mut node) = *self {
            unsafe { node.as_mut() }.set_right_child(child);
        }
    }

    #[inline(always)]
    fn set_parent(&mut self, parent: NodePtr) {
        if let Some(mut node) = *self {
            unsafe { node.as_mut() }.parent = parent;
        }
    }

    #[inline(always)]
    fn update_augmentations(&mut self, params: &HashParams) {
        if let Some(mut node) = *self {
            unsafe { node.as_mut() }.update_augmentations(params);
        }
    }
}

impl From<&Node> for NodePtr {
    fn from(node: &Node) -> Self {
        NonNull::new(node as *const _ as *mut _)
    }
}

impl From<&mut Node> for NodePtr {
    fn from(node: &mut Node) -> Self {
        NonNull::new(node as *mut _)
    }
}

/// A splay tree holding a set of integer keys.
///
/// Mutating operations splay the touched position to the root, which is
/// both the balancing mechanism and the point where subtree sizes and
/// hashes are recomputed bottom-up.
#[derive(Debug)]
pub struct SplayTree {
    root: NodePtr,
    params: HashParams,
}
