//! Adapters for constructing the total ordering a [`RavlSet`] sorts by.
//!
//! The tree core only requires *some* total-order function over elements;
//! this module builds one from the shapes callers actually have:
//!
//! - [`natural`] - the element type's own [`Ord`] implementation.
//! - [`SortKey`] + [`by_sort_keys`] - an ordered list of sort criteria,
//!   applied in sequence until one yields a non-equal result.
//! - An ad-hoc two-argument comparison closure, passed directly to
//!   [`RavlSet::with_comparator`](crate::RavlSet::with_comparator) or wrapped
//!   as a single criterion via [`SortKey::by`].
//!
//! [`RavlSet`]: crate::RavlSet

use core::cmp::Ordering;

use alloc::boxed::Box;
use alloc::vec::Vec;

/// A total order over elements of type `T`.
///
/// Two elements comparing [`Ordering::Equal`] are the same element for
/// storage purposes: a set never holds both, and inserting one replaces the
/// other.
pub type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering>;

/// Returns the natural ordering of `T`, i.e. its [`Ord`] implementation.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use ravl_tree::ordering::natural;
///
/// let cmp = natural::<i32>();
/// assert_eq!(cmp(&1, &2), Ordering::Less);
/// ```
#[must_use]
pub fn natural<T: Ord + 'static>() -> Comparator<T> {
    Box::new(T::cmp)
}

/// A single sort criterion: one step of a compound ordering.
///
/// A criterion either extracts a key and compares keys ([`asc`](SortKey::asc),
/// [`desc`](SortKey::desc)) or applies a two-argument comparison directly
/// ([`by`](SortKey::by)). Criteria carry no other state; composing them via
/// [`by_sort_keys`] produces a plain [`Comparator`].
///
/// # Examples
///
/// ```
/// use ravl_tree::{RavlSet, SortKey};
///
/// // Sort people by age, breaking ties by name reversed.
/// let mut set = RavlSet::with_sort_keys([
///     SortKey::asc(|p: &(&str, u32)| p.1),
///     SortKey::desc(|p: &(&str, u32)| p.0),
/// ]);
///
/// set.insert(("alice", 30));
/// set.insert(("bob", 25));
/// set.insert(("carol", 30));
///
/// let people: Vec<_> = set.iter().map(|p| p.0).collect();
/// assert_eq!(people, ["bob", "carol", "alice"]);
/// ```
pub struct SortKey<T> {
    cmp: Comparator<T>,
}

impl<T: 'static> SortKey<T> {
    /// A criterion ordering elements ascending by the extracted key.
    pub fn asc<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self {
            cmp: Box::new(move |a, b| key(a).cmp(&key(b))),
        }
    }

    /// A criterion ordering elements descending by the extracted key.
    pub fn desc<K, F>(key: F) -> Self
    where
        K: Ord,
        F: Fn(&T) -> K + 'static,
    {
        Self {
            cmp: Box::new(move |a, b| key(b).cmp(&key(a))),
        }
    }

    /// A criterion applying a two-argument comparison directly.
    ///
    /// The closure must implement a total order (or at least break no ties it
    /// is expected to break; later criteria see its `Equal` results).
    pub fn by<F>(cmp: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            cmp: Box::new(cmp),
        }
    }
}

impl<T> SortKey<T> {
    /// Compares two elements under this criterion.
    #[must_use]
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.cmp)(a, b)
    }
}

/// Composes an ordered list of sort criteria into one total order.
///
/// Criteria are applied in sequence until one yields a non-equal result;
/// elements equal under every criterion compare equal (and therefore collapse
/// to one element in a set).
///
/// # Panics
///
/// Panics if `keys` is empty.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use ravl_tree::ordering::{by_sort_keys, SortKey};
///
/// let cmp = by_sort_keys([
///     SortKey::asc(|p: &(u32, u32)| p.0),
///     SortKey::asc(|p: &(u32, u32)| p.1),
/// ]);
///
/// assert_eq!(cmp(&(1, 9), &(2, 0)), Ordering::Less);
/// assert_eq!(cmp(&(1, 9), &(1, 2)), Ordering::Greater);
/// ```
pub fn by_sort_keys<T, I>(keys: I) -> Comparator<T>
where
    T: 'static,
    I: IntoIterator<Item = SortKey<T>>,
{
    let keys: Vec<SortKey<T>> = keys.into_iter().collect();
    assert!(!keys.is_empty(), "`by_sort_keys()` - at least one sort key is required!");

    Box::new(move |a, b| {
        for key in &keys {
            let ordering = key.compare(a, b);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn natural_matches_ord() {
        let cmp = natural::<i64>();
        assert_eq!(cmp(&-3, &7), Ordering::Less);
        assert_eq!(cmp(&7, &7), Ordering::Equal);
        assert_eq!(cmp(&9, &7), Ordering::Greater);
    }

    #[test]
    fn sort_keys_apply_in_sequence() {
        let cmp = by_sort_keys([
            SortKey::asc(|p: &(u32, &str)| p.0),
            SortKey::asc(|p: &(u32, &str)| p.1),
        ]);

        // First key decides when it can.
        assert_eq!(cmp(&(1, "z"), &(2, "a")), Ordering::Less);
        // Ties fall through to the second key.
        assert_eq!(cmp(&(1, "a"), &(1, "b")), Ordering::Less);
        // Equal under every key is equal.
        assert_eq!(cmp(&(1, "a"), &(1, "a")), Ordering::Equal);
    }

    #[test]
    fn desc_reverses() {
        let cmp = by_sort_keys([SortKey::desc(|v: &u32| *v)]);
        assert_eq!(cmp(&1, &2), Ordering::Greater);
    }

    #[test]
    fn by_wraps_a_closure() {
        let key = SortKey::by(|a: &u32, b: &u32| (a % 10).cmp(&(b % 10)));
        assert_eq!(key.compare(&21, &13), Ordering::Less);
        assert_eq!(key.compare(&21, &11), Ordering::Equal);
    }

    #[test]
    #[should_panic(expected = "`by_sort_keys()` - at least one sort key is required!")]
    fn empty_key_list_panics() {
        let _ = by_sort_keys::<u32, _>([]);
    }
}
