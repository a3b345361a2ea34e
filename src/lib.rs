//! # An ordered set whose tree mirrors binary search
//!
//! `median-split-tree` keeps a set of keys in a binary search tree that is
//! rebuilt from the sorted keys after every insert or remove.  The rebuild
//! always splits at the upper median, so the tree has exactly one possible
//! shape for a given number of keys, and searching it walks the same elements
//! an upper-middle binary search over the sorted keys would probe.  That makes
//! the tree handy wherever a search path has to be shown or checked against
//! the array it came from.
//!
//! Every mutation costs O(n).  Use `std::collections::BTreeSet` if you just
//! need a fast ordered set.
//!
//! ```
//! use median_split_tree::{bisect, MedianTree};
//!
//! let keys = [15, 23, 29, 33, 37, 41, 44, 49, 52, 54];
//! let tree = MedianTree::from(keys);
//!
//! let path = tree.search_path(&33);
//! let probe = bisect::upper_mid_search(&keys, &33);
//! assert_eq!(path.positions(), probe.visited);
//! ```

pub mod bisect;

mod error;
pub use error::{Error, Result};

mod sorted_seq;
pub use sorted_seq::SortedSeq;

mod median_tree;
pub use median_tree::{
    Iter, MedianTree, NodeRef, PathIter, RebuildPolicy, SearchPath,
};

#[cfg(feature = "serde")]
mod serde;
