//! Binary search over a sorted slice that probes the upper middle.
//!
//! A [`MedianTree`](crate::MedianTree) is shaped so that descending it visits
//! exactly the elements this search visits.  Both sides take their split
//! point from [`upper_mid`], which keeps the rounding convention in one place.

use std::borrow::Borrow;
use std::cmp::Ordering::*;

/// Returns the upper middle of the inclusive index range `[start, end]`,
/// that is `(start + end + 1) / 2` computed without overflow.
///
/// On an even-length range this picks the right one of the two middle
/// elements.
///
/// # Examples
/// ```
/// use median_split_tree::bisect::upper_mid;
///
/// assert_eq!(upper_mid(0, 0), 0);
/// assert_eq!(upper_mid(0, 1), 1);
/// assert_eq!(upper_mid(0, 19), 10);
/// assert_eq!(upper_mid(4, 6), 5);
/// ```
///
/// # Panics
/// Panics in debug builds if `start > end`.
pub fn upper_mid(start: usize, end: usize) -> usize {
    debug_assert!(start <= end);
    start + (end - start + 1) / 2
}

/// The indices a search probed, and where (if anywhere) it found its target.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Probe {
    /// Indices probed, in order.
    pub visited: Vec<usize>,
    /// Index of the matching element.  When set, it is the last visited index.
    pub found: Option<usize>,
}

/// Searches `sorted` for `key`, always probing the upper middle of the
/// remaining range, and records every index probed.
///
/// `sorted` must be in increasing order.
///
/// # Examples
/// ```
/// use median_split_tree::bisect::upper_mid_search;
///
/// let a = [15, 23, 29, 33, 37, 41, 44, 49, 52, 54];
/// let probe = upper_mid_search(&a, &49);
/// assert_eq!(probe.visited, vec![5, 8, 7]);
/// assert_eq!(probe.found, Some(7));
///
/// let probe = upper_mid_search(&a, &16);
/// assert_eq!(probe.visited, vec![5, 2, 1, 0]);
/// assert_eq!(probe.found, None);
/// ```
pub fn upper_mid_search<T, Q>(sorted: &[T], key: &Q) -> Probe
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut probe = Probe::default();

    // half-open [lo, hi)
    let (mut lo, mut hi) = (0, sorted.len());
    while lo < hi {
        let mid = upper_mid(lo, hi - 1);
        probe.visited.push(mid);
        match key.cmp(sorted[mid].borrow()) {
            Less => hi = mid,
            Equal => {
                probe.found = Some(mid);
                break;
            }
            Greater => lo = mid + 1,
        }
    }

    probe
}
