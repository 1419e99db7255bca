use core::cell::Cell;

use super::handle::Handle;
use super::size::Size;

/// A single AVL tree node.
///
/// Holds one element and three optional links: two children and a non-owning
/// `parent` back-reference. The parent link exists for exactly two jobs:
/// propagating cache invalidation upward, and the stepping iterator's ascent.
/// As an arena handle it carries no ownership, so no reference cycle exists.
///
/// `size` and `height` are lazily computed caches over the subtree rooted
/// here. `None` means "not computed"; a present value is always the true
/// count, and any structural change below this node clears both (see
/// [`RawAvlTree`](super::raw_avl_tree::RawAvlTree) for the upward
/// invalidation walk). The cells let read-only queries fill caches through
/// `&self`.
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    pub(crate) parent: Option<Handle>,
    size: Cell<Option<Size>>,
    height: Cell<Option<Size>>,
}

impl<T> Node<T> {
    /// Creates a detached leaf node holding `value`.
    pub(crate) fn new_leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            parent: None,
            size: Cell::new(None),
            height: Cell::new(None),
        }
    }

    /// Returns the cached subtree size, if computed.
    pub(crate) fn cached_size(&self) -> Option<usize> {
        self.size.get().map(Size::to_usize)
    }

    /// Caches the subtree size. A real subtree always has `size >= 1`.
    pub(crate) fn set_cached_size(&self, size: usize) {
        debug_assert!(size >= 1, "`Node::set_cached_size()` - a subtree size is never 0!");
        self.size.set(Some(Size::from_usize(size)));
    }

    /// Returns the cached subtree height, if computed.
    pub(crate) fn cached_height(&self) -> Option<usize> {
        self.height.get().map(Size::to_usize)
    }

    /// Caches the subtree height. A real subtree always has `height >= 1`.
    pub(crate) fn set_cached_height(&self, height: usize) {
        debug_assert!(height >= 1, "`Node::set_cached_height()` - a subtree height is never 0!");
        self.height.set(Some(Size::from_usize(height)));
    }

    /// Clears both caches, returning `true` if either held a value.
    ///
    /// A `false` return means this node was already invalidated, which is the
    /// termination condition for the upward invalidation walk: everything
    /// above an invalid node is already invalid.
    pub(crate) fn clear_caches(&self) -> bool {
        let was_cached = self.size.get().is_some() || self.height.get().is_some();
        self.size.set(None);
        self.height.set(None);
        was_cached
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_leaf_is_detached_and_uncached() {
        let node = Node::new_leaf(42u32);
        assert_eq!(node.left, None);
        assert_eq!(node.right, None);
        assert_eq!(node.parent, None);
        assert_eq!(node.cached_size(), None);
        assert_eq!(node.cached_height(), None);
    }

    #[test]
    fn caches_fill_through_shared_reference() {
        let node = Node::new_leaf(1u32);
        node.set_cached_size(1);
        node.set_cached_height(1);
        assert_eq!(node.cached_size(), Some(1));
        assert_eq!(node.cached_height(), Some(1));
    }

    #[test]
    fn clear_caches_reports_prior_state() {
        let node = Node::new_leaf(1u32);
        // Already clear: the invalidation walk stops here.
        assert!(!node.clear_caches());

        node.set_cached_size(3);
        assert!(node.clear_caches());
        assert_eq!(node.cached_size(), None);
        assert_eq!(node.cached_height(), None);

        // One cache set still counts as cached.
        node.set_cached_height(2);
        assert!(node.clear_caches());
    }
}
