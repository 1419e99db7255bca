use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;

use alloc::boxed::Box;
use alloc::vec;

use crate::ordering::{Comparator, SortKey, by_sort_keys, natural};
use crate::raw::Handle;
use crate::raw::raw_avl_tree::RawAvlTree;

mod order_statistic;

/// An ordered, rank-indexable set backed by an AVL tree.
///
/// Elements are kept in ascending order under a total ordering fixed at
/// construction: the element type's own [`Ord`] ([`new`](RavlSet::new)), an
/// ad-hoc comparison closure ([`with_comparator`](RavlSet::with_comparator)),
/// or a list of sort criteria ([`with_sort_keys`](RavlSet::with_sort_keys)).
/// Insertion, removal, and membership are O(log n), and so are the
/// order-statistic operations the per-node subtree size cache enables:
/// [`get_by_rank`](RavlSet::get_by_rank), [`rank_of`](RavlSet::rank_of), and
/// [`remove_by_rank`](RavlSet::remove_by_rank).
///
/// Two elements comparing equal under the set's ordering are the same element
/// for storage purposes, whatever their other fields say: the set never holds
/// both, and inserting one while the other is stored replaces it with the
/// newer element.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering relative to any other element changes while it is in the set.
/// This is normally only possible through [`Cell`], [`RefCell`], global
/// state, I/O, or unsafe code. The behavior resulting from such a logic error
/// is not specified but will not result in undefined behavior; it could
/// include panics, incorrect results, or non-termination.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use ravl_tree::{RavlSet, Rank};
///
/// let mut scores = RavlSet::new();
///
/// scores.insert(85);
/// scores.insert(100);
/// scores.insert(92);
///
/// // Standard ordered-set operations.
/// assert!(scores.contains(&92));
/// assert_eq!(scores.len(), 3);
///
/// // Order-statistic operations (O(log n)).
/// assert_eq!(scores.get_by_rank(1), Some(&92)); // The median.
/// assert_eq!(scores.rank_of(&100), Some(2));    // 100 is the largest.
/// assert_eq!(scores[Rank(0)], 85);
///
/// // Iteration is always ascending.
/// let sorted: Vec<_> = scores.iter().copied().collect();
/// assert_eq!(sorted, [85, 92, 100]);
/// ```
pub struct RavlSet<T> {
    tree: RawAvlTree<T>,
}

impl<T: Ord + 'static> RavlSet<T> {
    /// Creates an empty set ordered by `T`'s [`Ord`] implementation.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let set: RavlSet<i32> = RavlSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: RawAvlTree::new(natural::<T>()),
        }
    }
}

impl<T: 'static> RavlSet<T> {
    /// Creates an empty set ordered by `cmp`, which must implement a total
    /// order. The ordering is fixed for the set's lifetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// // Largest first.
    /// let mut set = RavlSet::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// set.extend([1, 3, 2]);
    ///
    /// let descending: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(descending, [3, 2, 1]);
    /// ```
    pub fn with_comparator<F>(cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            tree: RawAvlTree::new(Box::new(cmp) as Comparator<T>),
        }
    }

    /// Creates an empty set ordered by a list of sort criteria, applied in
    /// sequence until one yields a non-equal result. See
    /// [`ordering::by_sort_keys`](crate::ordering::by_sort_keys).
    ///
    /// # Panics
    ///
    /// Panics if `keys` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::{RavlSet, SortKey};
    ///
    /// let mut set = RavlSet::with_sort_keys([SortKey::desc(|v: &u32| *v)]);
    /// set.extend([1, 3, 2]);
    /// assert_eq!(set.first(), Some(&3));
    /// ```
    pub fn with_sort_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = SortKey<T>>,
    {
        Self {
            tree: RawAvlTree::new(by_sort_keys(keys)),
        }
    }
}

impl<T> RavlSet<T> {
    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let set = RavlSet::from([1, 2, 3]);
    /// assert_eq!(set.len(), 3);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes all elements from the set.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Adds a value to the set.
    ///
    /// Returns `true` if the value was newly added. If the set already held
    /// an element comparing equal, that element is replaced by `value` (and
    /// dropped) and `false` is returned; the tree shape is untouched. Use
    /// [`replace`](RavlSet::replace) to recover the displaced element.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let mut set = RavlSet::new();
    /// assert!(set.insert(7));
    /// assert!(!set.insert(7));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        self.tree.insert(value).is_none()
    }

    /// Adds a value to the set, returning the element it replaced, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::{RavlSet, SortKey};
    ///
    /// // Ordered by the numeric field only.
    /// let mut set = RavlSet::with_sort_keys([SortKey::asc(|p: &(u32, &str)| p.0)]);
    /// set.insert((1, "old"));
    ///
    /// assert_eq!(set.replace((1, "new")), Some((1, "old")));
    /// assert_eq!(set.get(&(1, "")), Some(&(1, "new")));
    /// ```
    pub fn replace(&mut self, value: T) -> Option<T> {
        self.tree.insert(value)
    }

    /// Removes the element equal to `value` from the set. Returns whether an
    /// element was removed; removing an absent value is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let mut set = RavlSet::from([2]);
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.tree.remove(value).is_some()
    }

    /// Removes and returns the element equal to `value`, if any.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.tree.remove(value)
    }

    /// Returns `true` if the set contains an element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let set = RavlSet::from([1, 2, 3]);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.tree.search(value).is_some()
    }

    /// Returns a reference to the stored element equal to `value`, if any.
    ///
    /// With an ordering that inspects only part of an element this is the
    /// way to observe the rest of the stored element.
    #[must_use]
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.get(value)
    }

    /// Returns a reference to the smallest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let set = RavlSet::from([3, 1, 2]);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns a reference to the largest element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Removes and returns the smallest element, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let mut set = RavlSet::from([3, 1, 2]);
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn pop_first(&mut self) -> Option<T> {
        self.tree.remove_by_rank(0)
    }

    /// Removes and returns the largest element, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.tree.remove_by_rank(len - 1)
    }

    /// Gets an iterator over the elements, in ascending order.
    ///
    /// The iterator steps through the tree via parent links with no
    /// recursion and no auxiliary storage. It borrows the set, so mutating
    /// the set during traversal is rejected at compile time.
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let set = RavlSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: &self.tree,
            last: None,
            remaining: self.len(),
        }
    }
}

/// An iterator over the elements of a `RavlSet`, ascending.
///
/// This `struct` is created by the [`iter`] method on [`RavlSet`]. See its
/// documentation for more.
///
/// Each step resumes from the last yielded node: into the right subtree's
/// minimum when one exists, otherwise up the parent chain until escaping the
/// subtree already yielded. Worst-case logarithmic and amortized constant
/// time per element.
///
/// [`iter`]: RavlSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T> {
    tree: &'a RawAvlTree<T>,
    last: Option<Handle>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }

        let tree = self.tree;
        let next = match self.last {
            // First step: the minimum of the whole tree.
            None => tree.root_handle().map(|root| tree.leftmost(root)),
            Some(last) => {
                let node = tree.node(last);
                if let Some(right) = node.right {
                    // Everything in the right subtree is still unvisited;
                    // its minimum comes next.
                    Some(tree.leftmost(right))
                } else {
                    // Climb until escaping the fully-yielded subtree: the
                    // first ancestor ordering greater than the last element.
                    let last_value = &node.value;
                    let mut current = node.parent;
                    loop {
                        match current {
                            Some(h) if tree.compare(&tree.node(h).value, last_value) == Ordering::Greater => {
                                break Some(h);
                            }
                            Some(h) => current = tree.node(h).parent,
                            None => break None,
                        }
                    }
                }
            }
        };

        self.last = next;
        match next {
            Some(h) => {
                self.remaining -= 1;
                Some(&tree.node(h).value)
            }
            None => {
                self.remaining = 0;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            last: self.last,
            remaining: self.remaining,
        }
    }
}

/// An owning iterator over the elements of a `RavlSet`, ascending.
///
/// This `struct` is created by the [`into_iter`] method on [`RavlSet`]
/// (provided by the [`IntoIterator`] trait). The set is drained into a
/// sorted buffer up front; a single O(n) traversal is cheaper than stepping
/// node by node.
///
/// [`into_iter`]: RavlSet#method.into_iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    inner: vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for RavlSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.tree.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RavlSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T: Ord + 'static> Default for RavlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + 'static> FromIterator<T> for RavlSet<T> {
    /// Builds a set, ordered by `T`'s [`Ord`], from an arbitrary input
    /// collection. A loop over single insertions; equal elements collapse,
    /// last one wins.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = RavlSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord + 'static, const N: usize> From<[T; N]> for RavlSet<T> {
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let set = RavlSet::from([3, 1, 2, 1]);
    /// assert_eq!(set.len(), 3);
    /// ```
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> Extend<T> for RavlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RavlSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
