use core::ops::Index;

use super::RavlSet;
use crate::Rank;

impl<T> RavlSet<T> {
    /// Returns the element at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let set = RavlSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Some(&20));
    /// assert!(set.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.tree.get_by_rank(rank)
    }

    /// Returns the zero-based rank of the element equal to `value` in sorted
    /// order, or `None` if the value is not present.
    ///
    /// `get_by_rank` and `rank_of` are inverses over present values: for any
    /// `rank < len()`, `rank_of(get_by_rank(rank)) == Some(rank)`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let set = RavlSet::from([10, 20]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        self.tree.rank_of(value)
    }

    /// Removes and returns the element at position `rank` in sorted order.
    ///
    /// Equivalent to removing the element `get_by_rank(rank)` names, but in
    /// one size-guided descent.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= len()`. This is a programmer error, not a
    /// recoverable condition.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ravl_tree::RavlSet;
    ///
    /// let mut set = RavlSet::from([10, 20, 30]);
    /// assert_eq!(set.remove_by_rank(1), 20);
    /// assert_eq!(set.len(), 2);
    /// ```
    pub fn remove_by_rank(&mut self, rank: usize) -> T {
        self.tree.remove_by_rank(rank).expect("rank out of bounds")
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use ravl_tree::RavlSet;
/// use ravl_tree::Rank;
///
/// let set = RavlSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for RavlSet<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("rank out of bounds")
    }
}
