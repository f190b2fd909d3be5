//! This crate provides a self-balancing tree for managing non-overlapping ranges in a fixed
//! domain, the bookkeeping at the heart of any region based resource manager.
//! ## Features
//! - Admission checks: can [start, start + length) be placed without colliding with anything
//! - Lookups: which stored range covers a position or overlaps a query
//! - Release: remove the range covering a position
//! - Every operation is O(log n); the tree stays AVL balanced under any insert / remove order
//! - Failed operations never change the store
//!
//! ## Details:
//!
//! ```text
//!       0  1  2  3  4  5  6  7  8  9  10 11
//! [0,3)  X  X  X
//! [4,6)              X  X
//! [8,11)                         X  X  X
//!
//! check(2, 2) -> false, collides with [0,3)
//! check(6, 2) -> true, fits the gap [6, 8)
//! find(5, 0)  -> [4,6)
//! ```
//! Ranges are half-open: [start, start + length) includes start and excludes the stop.
//!
//! Most interaction is through [`RangeTree`](struct.RangeTree.html) and the
//! [`RangeStore`](trait.RangeStore.html) trait it implements. [`RangeVec`](struct.RangeVec.html)
//! implements the same trait on a sorted vector.
//!
//! ```rust
//!    use rangetree::{Error, Range, RangeStore, RangeTree};
//!
//!    let mut tree = RangeTree::new(0, 12).unwrap();
//!    assert!(tree.insert(0, 3));
//!    assert!(tree.insert(4, 2));
//!    assert!(tree.insert(8, 3));
//!
//!    assert!(!tree.check(2, 2));
//!    assert!(tree.check(6, 2));
//!    assert_eq!(tree.find(5, 0), Some(Range::new(4, 2)));
//!    assert_eq!(tree.remove(7), Err(Error::NotFound(7)));
//!    assert_eq!(tree.remove(5), Ok(Range::new(4, 2)));
//! ```
mod error;
mod range;
mod range_tree;
mod range_vec;
mod rangestore;

// Rexport to flatten structure
pub use self::error::Error;
pub use self::range::Range;
pub use self::range_tree::{IterRangeTree, RangeTree};
pub use self::range_vec::{IterRangeVec, RangeVec};
pub use self::rangestore::RangeStore;
