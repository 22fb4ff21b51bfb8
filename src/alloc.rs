use std::ptr::NonNull;

use crate::{HashParams, Key, Node};

/// Allocate a detached node for `key`.
///
/// # Safety
///
/// It leaks; reclaim with [`own_back`] or by linking the node into a tree
/// that frees it on drop.
pub(crate) unsafe fn alloc_node(key: Key, params: &HashParams) -> NonNull<Node> {
    let node = Box::into_raw(Box::new(Node::new(key, params)));
    // SAFETY: Box::into_raw never returns null.
    unsafe { NonNull::new_unchecked(node) }
}

/// Reclaim ownership of a node produced by [`alloc_node`].
///
/// # Safety
///
/// The node must be unlinked from any tree: dropping the box does not
/// cascade, but stale links to it would dangle.
pub(crate) unsafe fn own_back(node: NonNull<Node>) -> Box<Node> {
    unsafe { Box::from_raw(node.as_ptr()) }
}
