/// A zero-based rank into the sorted order of a set.
///
/// This is the order-statistic index type: `Rank(0)` is the smallest element
/// under the set's ordering, `Rank(set.len() - 1)` the largest.
///
/// # Examples
///
/// ```
/// use ravl_tree::{RavlSet, Rank};
///
/// let mut set = RavlSet::new();
/// set.insert(20);
/// set.insert(10);
///
/// assert_eq!(set[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
