//! Rank-indexed AVL ordered set for Rust.
//!
//! This crate provides [`RavlSet`], an ordered set maintained under a
//! caller-supplied total ordering with O(log n) order-statistic operations
//! on top of the usual set interface:
//!
//! - [`get_by_rank`](RavlSet::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](RavlSet::rank_of) - Get the sorted position of an element
//! - [`remove_by_rank`](RavlSet::remove_by_rank) - Remove by sorted position
//! - Indexing by [`Rank`] - e.g., `set[Rank(0)]` for the first element
//!
//! # Example
//!
//! ```
//! use ravl_tree::{RavlSet, Rank, SortKey};
//!
//! // Order products by price, breaking ties by name.
//! let mut products = RavlSet::with_sort_keys([
//!     SortKey::asc(|p: &(&str, u32)| p.1),
//!     SortKey::asc(|p: &(&str, u32)| p.0),
//! ]);
//!
//! products.insert(("tea", 300));
//! products.insert(("coffee", 450));
//! products.insert(("water", 100));
//!
//! // Standard ordered-set operations work as expected.
//! assert_eq!(products.len(), 3);
//! assert!(products.contains(&("tea", 300)));
//!
//! // Order-statistic operations (O(log n)).
//! assert_eq!(products.get_by_rank(0), Some(&("water", 100))); // Cheapest.
//! assert_eq!(products.rank_of(&("coffee", 450)), Some(1));
//! assert_eq!(products[Rank(2)], ("coffee", 450));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Caller-supplied orderings** - Natural [`Ord`], ad-hoc comparison closures,
//!   or declarative sort-key lists (see the [`ordering`] module)
//! - **O(log n) rank operations** - Efficient order-statistic queries via lazily
//!   cached subtree sizes
//! - **Compact nodes** - Arena storage with `NonZero`-niched handles; parent
//!   links are plain indices, so no reference cycles and no `Rc` overhead
//!
//! # Implementation
//!
//! The set is an AVL tree whose nodes carry lazily computed subtree size and
//! height caches. Heights drive rebalancing; sizes drive rank queries. A
//! structural change invalidates caches along the parent chain only as far as
//! the first already-invalid ancestor, so a burst of mutations settles in
//! amortized constant invalidation work per link change. The in-order
//! iterator resumes through the same parent links without recursion or
//! auxiliary storage.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order_statistic;
mod raw;

pub mod ordering;
pub mod ravl_set;

pub use order_statistic::Rank;
pub use ordering::{Comparator, SortKey};
pub use ravl_set::RavlSet;
