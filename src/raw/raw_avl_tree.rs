use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;

use crate::ordering::Comparator;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// The AVL tree core backing `RavlSet`.
///
/// All structure lives in an arena of [`Node`]s; `root` is the single owning
/// entry point. The comparator is fixed at construction and is the only thing
/// that ever inspects an element.
///
/// Mutating operations are recursive over subtree handles and return the new
/// subtree root, which the caller relinks; recursion depth is bounded by the
/// AVL height. Every child reassignment goes through [`set_left`]/
/// [`set_right`], which fix the child's parent link and invalidate the size
/// and height caches upward until hitting an already-invalid node.
///
/// [`set_left`]: RawAvlTree::set_left
/// [`set_right`]: RawAvlTree::set_right
pub(crate) struct RawAvlTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
    cmp: Comparator<T>,
}

impl<T> RawAvlTree<T> {
    /// Creates an empty tree ordered by `cmp`.
    pub(crate) fn new(cmp: Comparator<T>) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            cmp,
        }
    }

    /// Returns the number of elements in the tree.
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    /// Returns true if the tree contains no elements.
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes all elements.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Returns the root handle, if the tree is non-empty.
    pub(crate) fn root_handle(&self) -> Option<Handle> {
        self.root
    }

    /// Returns a reference to a node by handle.
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    /// Compares two elements under the tree's ordering.
    pub(crate) fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.cmp)(a, b)
    }

    // ─── Lazy subtree caches ─────────────────────────────────────────────

    /// Returns the size of the subtree at `node`, filling the cache if
    /// needed. An absent subtree has size 0.
    pub(crate) fn size_of(&self, node: Option<Handle>) -> usize {
        let Some(h) = node else { return 0 };
        let n = self.nodes.get(h);
        if let Some(size) = n.cached_size() {
            return size;
        }
        let (left, right) = (n.left, n.right);
        let size = 1 + self.size_of(left) + self.size_of(right);
        self.nodes.get(h).set_cached_size(size);
        size
    }

    /// Returns the height of the subtree at `node`, filling the cache if
    /// needed. An absent subtree has height 0.
    fn height_of(&self, node: Option<Handle>) -> usize {
        let Some(h) = node else { return 0 };
        let n = self.nodes.get(h);
        if let Some(height) = n.cached_height() {
            return height;
        }
        let (left, right) = (n.left, n.right);
        let height = 1 + self.height_of(left).max(self.height_of(right));
        self.nodes.get(h).set_cached_height(height);
        height
    }

    /// Clears the caches of `from` and its ancestors, stopping at the first
    /// node that is already invalid (everything above it already is too).
    fn invalidate_upward(&self, from: Handle) {
        let mut current = Some(from);
        while let Some(h) = current {
            let node = self.nodes.get(h);
            if !node.clear_caches() {
                break;
            }
            current = node.parent;
        }
    }

    // ─── Structural link primitives ──────────────────────────────────────

    /// Reassigns `parent`'s left child, fixing the child's parent link and
    /// invalidating caches upward from `parent`.
    fn set_left(&mut self, parent: Handle, child: Option<Handle>) {
        self.nodes.get_mut(parent).left = child;
        if let Some(c) = child {
            self.nodes.get_mut(c).parent = Some(parent);
        }
        self.invalidate_upward(parent);
    }

    /// Reassigns `parent`'s right child. See [`set_left`](Self::set_left).
    fn set_right(&mut self, parent: Handle, child: Option<Handle>) {
        self.nodes.get_mut(parent).right = child;
        if let Some(c) = child {
            self.nodes.get_mut(c).parent = Some(parent);
        }
        self.invalidate_upward(parent);
    }

    /// Re-roots the tree. The new root's parent link is cleared explicitly;
    /// rotations and removals leave it pointing at a node that no longer owns
    /// it.
    fn set_root(&mut self, root: Option<Handle>) {
        self.root = root;
        if let Some(h) = root {
            self.nodes.get_mut(h).parent = None;
        }
    }

    // ─── Search ──────────────────────────────────────────────────────────

    /// Standard BST descent. Returns the node holding the element equal to
    /// `value` under the tree's ordering, if any.
    pub(crate) fn search(&self, value: &T) -> Option<Handle> {
        let mut current = self.root;
        while let Some(h) = current {
            current = match self.compare(value, &self.nodes.get(h).value) {
                Ordering::Equal => return Some(h),
                Ordering::Less => self.nodes.get(h).left,
                Ordering::Greater => self.nodes.get(h).right,
            };
        }
        None
    }

    /// Returns the stored element equal to `value`, if any.
    pub(crate) fn get(&self, value: &T) -> Option<&T> {
        self.search(value).map(|h| &self.nodes.get(h).value)
    }

    // ─── Insertion ───────────────────────────────────────────────────────

    /// Inserts `value`, returning the displaced element if one compared
    /// equal. On replacement the tree shape is untouched and no rebalancing
    /// runs; the newer element wins.
    pub(crate) fn insert(&mut self, value: T) -> Option<T> {
        let (new_root, replaced) = self.insert_at(self.root, value);
        self.set_root(Some(new_root));
        replaced
    }

    fn insert_at(&mut self, node: Option<Handle>, value: T) -> (Handle, Option<T>) {
        let Some(h) = node else {
            return (self.nodes.alloc(Node::new_leaf(value)), None);
        };

        match self.compare(&value, &self.nodes.get(h).value) {
            Ordering::Less => {
                let left = self.nodes.get(h).left;
                let (new_left, replaced) = self.insert_at(left, value);
                self.set_left(h, Some(new_left));
                if replaced.is_some() {
                    (h, replaced)
                } else {
                    (self.rebalance(h), None)
                }
            }
            Ordering::Greater => {
                let right = self.nodes.get(h).right;
                let (new_right, replaced) = self.insert_at(right, value);
                self.set_right(h, Some(new_right));
                if replaced.is_some() {
                    (h, replaced)
                } else {
                    (self.rebalance(h), None)
                }
            }
            Ordering::Equal => {
                let old = mem::replace(&mut self.nodes.get_mut(h).value, value);
                (h, Some(old))
            }
        }
    }

    // ─── Rotation and rebalancing ────────────────────────────────────────

    /// Single AVL rotation, the only structural primitive besides child
    /// reassignment. `toward_greater` promotes the left child to subroot
    /// (the classic right rotation); `!toward_greater` mirrors it.
    ///
    /// The returned subroot's parent link is stale until the caller relinks
    /// it (or clears it via [`set_root`](Self::set_root)).
    fn rotate(&mut self, h: Handle, toward_greater: bool) -> Handle {
        if toward_greater {
            let pivot = self.nodes.get(h).left.expect("`rotate()` - rotating toward greater without a left child!");
            let transfer = self.nodes.get(pivot).right;
            self.set_left(h, transfer);
            self.set_right(pivot, Some(h));
            pivot
        } else {
            let pivot = self.nodes.get(h).right.expect("`rotate()` - rotating toward lesser without a right child!");
            let transfer = self.nodes.get(pivot).left;
            self.set_right(h, transfer);
            self.set_left(pivot, Some(h));
            pivot
        }
    }

    /// Restores the AVL balance at `h` with one or two rotations, returning
    /// the new subroot.
    ///
    /// Equal grandchild heights resolve to the single-rotation case; the
    /// double rotation runs only when the inner grandchild is strictly
    /// taller. This tie-break is what keeps the height bound at O(log n).
    fn rebalance(&mut self, h: Handle) -> Handle {
        let (left, right) = {
            let n = self.nodes.get(h);
            (n.left, n.right)
        };
        let (lh, rh) = (self.height_of(left), self.height_of(right));

        if lh > rh + 1 {
            // Left-heavy.
            let l = left.expect("`rebalance()` - left-heavy without a left child!");
            let (ll, lr) = {
                let n = self.nodes.get(l);
                (n.left, n.right)
            };
            if self.height_of(ll) >= self.height_of(lr) {
                self.rotate(h, true)
            } else {
                let new_left = self.rotate(l, false);
                self.set_left(h, Some(new_left));
                self.rotate(h, true)
            }
        } else if rh > lh + 1 {
            // Right-heavy, mirror image.
            let r = right.expect("`rebalance()` - right-heavy without a right child!");
            let (rl, rr) = {
                let n = self.nodes.get(r);
                (n.left, n.right)
            };
            if self.height_of(rr) >= self.height_of(rl) {
                self.rotate(h, false)
            } else {
                let new_right = self.rotate(r, true);
                self.set_right(h, Some(new_right));
                self.rotate(h, false)
            }
        } else {
            h
        }
    }

    // ─── Removal ─────────────────────────────────────────────────────────

    /// Removes the element equal to `value`, returning it. An absent value
    /// leaves the tree untouched.
    pub(crate) fn remove(&mut self, value: &T) -> Option<T> {
        let (new_root, removed) = self.remove_at(self.root, value);
        if removed.is_some() {
            self.set_root(new_root);
        }
        removed
    }

    fn remove_at(&mut self, node: Option<Handle>, value: &T) -> (Option<Handle>, Option<T>) {
        let Some(h) = node else { return (None, None) };

        match self.compare(value, &self.nodes.get(h).value) {
            Ordering::Less => {
                let left = self.nodes.get(h).left;
                let (new_left, removed) = self.remove_at(left, value);
                if removed.is_none() {
                    return (Some(h), None);
                }
                self.set_left(h, new_left);
                (Some(self.rebalance(h)), removed)
            }
            Ordering::Greater => {
                let right = self.nodes.get(h).right;
                let (new_right, removed) = self.remove_at(right, value);
                if removed.is_none() {
                    return (Some(h), None);
                }
                self.set_right(h, new_right);
                (Some(self.rebalance(h)), removed)
            }
            Ordering::Equal => {
                let (replacement, removed) = self.splice_out(h);
                (replacement, Some(removed))
            }
        }
    }

    /// Unlinks `h` from the tree and frees it, returning the subtree that
    /// takes its place and the removed element.
    ///
    /// With two children the in-order successor (minimum of the right
    /// subtree) is detached and spliced into `h`'s position, taking over both
    /// children.
    fn splice_out(&mut self, h: Handle) -> (Option<Handle>, T) {
        let (left, right) = {
            let n = self.nodes.get(h);
            (n.left, n.right)
        };
        let replacement = match (left, right) {
            (_, None) => left,
            (None, Some(_)) => right,
            (Some(_), Some(r)) => {
                let (rest, successor) = self.detach_min(r);
                self.set_left(successor, left);
                self.set_right(successor, rest);
                Some(self.rebalance(successor))
            }
        };
        (replacement, self.nodes.take(h).value)
    }

    /// Detaches the minimum node of the subtree at `h`, returning the
    /// remaining subtree and the detached node. The detached node keeps its
    /// stale links; callers overwrite them when splicing it in.
    fn detach_min(&mut self, h: Handle) -> (Option<Handle>, Handle) {
        match self.nodes.get(h).left {
            Some(left) => {
                let (new_left, min) = self.detach_min(left);
                self.set_left(h, new_left);
                (Some(self.rebalance(h)), min)
            }
            None => (self.nodes.get(h).right, h),
        }
    }

    // ─── Order-statistic queries ─────────────────────────────────────────

    /// Returns the zero-based rank of the element equal to `value`, or
    /// `None` if absent.
    pub(crate) fn rank_of(&self, value: &T) -> Option<usize> {
        self.rank_in(self.root, value)
    }

    fn rank_in(&self, node: Option<Handle>, value: &T) -> Option<usize> {
        let h = node?;
        let (left, right) = {
            let n = self.nodes.get(h);
            (n.left, n.right)
        };
        match self.compare(value, &self.nodes.get(h).value) {
            Ordering::Equal => Some(self.size_of(left)),
            Ordering::Less => self.rank_in(left, value),
            Ordering::Greater => {
                let offset = 1 + self.size_of(left);
                self.rank_in(right, value).map(|rank| offset + rank)
            }
        }
    }

    /// Returns the node at position `rank` in sorted order, or `None` if
    /// `rank >= len()`. Descends by subtree sizes, O(log n).
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;

        loop {
            let left = self.nodes.get(current).left;
            let left_size = self.size_of(left);

            match remaining.cmp(&left_size) {
                Ordering::Less => {
                    // remaining < left_size implies the left subtree exists.
                    current = left.expect("`select()` - subtree size invariant violated!");
                }
                Ordering::Equal => return Some(current),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    debug_assert!(
                        self.nodes.get(current).right.is_some(),
                        "`select()` - rank {rank} not found below a node of size {}",
                        self.size_of(Some(current)),
                    );
                    current = self.nodes.get(current).right?;
                }
            }
        }
    }

    /// Returns the element at position `rank` in sorted order.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.select(rank).map(|h| &self.nodes.get(h).value)
    }

    /// Removes and returns the element at position `rank`, or `None` if
    /// `rank >= len()`. Descends by subtree sizes instead of comparisons,
    /// so the element never needs to be cloned to name it.
    pub(crate) fn remove_by_rank(&mut self, rank: usize) -> Option<T> {
        if rank >= self.len() {
            return None;
        }
        let root = self.root?;
        let (new_root, removed) = self.remove_at_rank(root, rank);
        self.set_root(new_root);
        Some(removed)
    }

    fn remove_at_rank(&mut self, h: Handle, rank: usize) -> (Option<Handle>, T) {
        let left = self.nodes.get(h).left;
        let left_size = self.size_of(left);

        match rank.cmp(&left_size) {
            Ordering::Less => {
                let l = left.expect("`remove_at_rank()` - subtree size invariant violated!");
                let (new_left, removed) = self.remove_at_rank(l, rank);
                self.set_left(h, new_left);
                (Some(self.rebalance(h)), removed)
            }
            Ordering::Greater => {
                let r = self.nodes.get(h).right.expect("`remove_at_rank()` - subtree size invariant violated!");
                let (new_right, removed) = self.remove_at_rank(r, rank - left_size - 1);
                self.set_right(h, new_right);
                (Some(self.rebalance(h)), removed)
            }
            Ordering::Equal => self.splice_out(h),
        }
    }

    // ─── Extremes and traversal ──────────────────────────────────────────

    /// Descends to the minimum of the subtree at `from`.
    pub(crate) fn leftmost(&self, mut from: Handle) -> Handle {
        while let Some(left) = self.nodes.get(from).left {
            from = left;
        }
        from
    }

    /// Descends to the maximum of the subtree at `from`.
    fn rightmost(&self, mut from: Handle) -> Handle {
        while let Some(right) = self.nodes.get(from).right {
            from = right;
        }
        from
    }

    /// Returns the smallest element, if any.
    pub(crate) fn first(&self) -> Option<&T> {
        self.root.map(|r| &self.nodes.get(self.leftmost(r)).value)
    }

    /// Returns the largest element, if any.
    pub(crate) fn last(&self) -> Option<&T> {
        self.root.map(|r| &self.nodes.get(self.rightmost(r)).value)
    }

    /// Recursive in-order traversal collecting node handles, ascending.
    fn collect_handles(&self, node: Option<Handle>, into: &mut Vec<Handle>) {
        let Some(h) = node else { return };
        let (left, right) = {
            let n = self.nodes.get(h);
            (n.left, n.right)
        };
        self.collect_handles(left, into);
        into.push(h);
        self.collect_handles(right, into);
    }

    /// Drains all elements in ascending order, leaving the tree empty.
    ///
    /// One recursive traversal plus one pass over the arena; O(n), cheaper
    /// in constants than stepping the iterator to exhaustion.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut handles = Vec::with_capacity(self.nodes.len());
        self.collect_handles(self.root, &mut handles);

        let mut values = Vec::with_capacity(handles.len());
        for h in handles {
            values.push(self.nodes.take(h).value);
        }

        self.root = None;
        self.nodes.clear();
        values
    }
}
