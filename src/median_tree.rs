#![warn(missing_docs)]
use crate::error::{Error, Result};
use crate::sorted_seq::SortedSeq;
use std::borrow::Borrow;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;

mod builder;
mod path;

use builder::{Arena, NodeId};
pub use path::{NodeRef, PathIter, SearchPath};

/// When a [`MedianTree`] rebuilds its node set.
///
/// The choice only affects how much work a mutation does; the resulting tree
/// is the same either way.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RebuildPolicy {
    /// Rebuild after every mutation, including inserts of keys already
    /// present and removes of keys that are absent.
    Always,
    /// Rebuild only when a mutation changed the key sequence.
    #[default]
    OnChange,
}

/// An ordered set kept in a binary search tree that is rebuilt from scratch
/// after every change.
///
/// The keys live in a sorted, duplicate-free [`SortedSeq`].  After each
/// mutation the tree is rebuilt from that sequence by splitting at the upper
/// median: the root of the tree over positions `[start, end]` is the key at
/// `(start + end + 1) / 2`, and its subtrees are built the same way from the
/// positions on either side.  As a result, the nodes visited while searching
/// the tree for any key are exactly the elements an upper-middle binary
/// search over the sorted keys probes (see
/// [`upper_mid_search`](crate::bisect::upper_mid_search)).
///
/// Rebuilding costs O(n) per mutation.  In exchange the shape of the tree is
/// a function of the number of keys alone, its height is always
/// `ceil(log2(n + 1))`, and the shape never depends on the order of the
/// operations that produced it.
///
/// # Examples
/// ```
/// use median_split_tree::MedianTree;
///
/// let mut tree = MedianTree::new();
/// for k in [41, 15, 54, 23] {
///     tree.insert(k);
/// }
///
/// assert_eq!(tree.root().map(|n| *n.key()), Some(41));
/// assert!(tree.contains(&23));
///
/// let path = tree.search_path(&23);
/// assert!(path.found());
/// assert_eq!(path.keys().copied().collect::<Vec<_>>(), vec![41, 23]);
/// ```
#[derive(Clone)]
pub struct MedianTree<T> {
    keys: SortedSeq<T>,
    tree: Arena,
    policy: RebuildPolicy,
    rebuilds: u64,
}

impl<T> MedianTree<T> {
    /// Returns a new, empty tree that rebuilds only when its keys change.
    pub fn new() -> Self {
        Self::with_policy(RebuildPolicy::default())
    }

    /// Returns a new, empty tree with the given rebuild policy.
    pub fn with_policy(policy: RebuildPolicy) -> Self {
        MedianTree {
            keys: SortedSeq::new(),
            tree: Arena::default(),
            policy,
            rebuilds: 0,
        }
    }

    /// Returns the rebuild policy.
    pub fn policy(&self) -> RebuildPolicy {
        self.policy
    }

    /// Returns how many times the node set has been rebuilt.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the height of the tree; 0 for an empty tree.
    pub fn height(&self) -> u32 {
        self.tree.height()
    }

    /// Returns the keys as a sorted slice.
    pub fn as_slice(&self) -> &[T] {
        self.keys.as_slice()
    }

    /// Returns the underlying sorted key sequence.
    pub fn sorted_keys(&self) -> &SortedSeq<T> {
        &self.keys
    }

    /// Returns the least key.
    pub fn first(&self) -> Option<&T> {
        self.keys.first()
    }

    /// Returns the greatest key.
    pub fn last(&self) -> Option<&T> {
        self.keys.last()
    }

    /// Returns a handle to the root node, or `None` if the tree is empty.
    ///
    /// # Examples
    /// ```
    /// use median_split_tree::MedianTree;
    ///
    /// let tree = MedianTree::from([1, 2, 3, 4]);
    /// let root = tree.root().unwrap();
    /// assert_eq!(*root.key(), 3);
    /// assert_eq!(root.height(), 3);
    /// assert_eq!(root.left().map(|n| *n.key()), Some(2));
    /// assert_eq!(root.right().map(|n| *n.key()), Some(4));
    /// ```
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.tree.root().map(|id| self.node_ref(id))
    }

    fn node_ref(&self, id: NodeId) -> NodeRef<'_, T> {
        NodeRef::new(&self.tree, self.keys.as_slice(), id)
    }

    /// Removes all keys.
    pub fn clear(&mut self) {
        let changed = !self.keys.is_empty();
        self.keys.clear();
        self.after_mutation(changed);
    }

    /// Returns an iterator over the keys in ascending order, produced by an
    /// in-order walk of the tree.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            tree: self,
            work: Vec::with_capacity(self.tree.height() as usize),
            len: self.len(),
        };
        iter.push_left_spine(self.tree.root());
        iter
    }

    fn after_mutation(&mut self, changed: bool) {
        if changed || self.policy == RebuildPolicy::Always {
            self.publish(Arena::build(self.keys.len()));
        }
    }

    // Replaces the node set.  The candidate is complete before anything the
    // caller can see is touched.
    fn publish(&mut self, candidate: Arena) {
        debug_assert_eq!(candidate.len(), self.keys.len());
        tracing::trace!(
            len = self.keys.len(),
            height = candidate.height(),
            "rebuilt median-split tree"
        );
        self.tree = candidate;
        self.rebuilds += 1;
    }

    // Reserves the candidate arena for a tree of `len` nodes.
    fn reserve_tree(len: usize) -> Result<Arena> {
        let amount = reserve_amount("tree nodes", len);
        Arena::try_with_capacity(amount).map_err(|source| {
            tracing::debug!(len, "could not reserve tree nodes");
            Error::Reserve {
                what: "tree nodes",
                requested: len,
                source,
            }
        })
    }

    #[cfg(test)]
    fn chk(&self)
    where
        T: Ord,
    {
        self.keys.chk();
        assert_eq!(self.tree.chk(), self.keys.len());

        // ceil(log2(n + 1))
        let n = self.keys.len();
        assert_eq!(self.height(), usize::BITS - n.leading_zeros());

        assert!(self.iter().eq(self.keys.iter()));
    }
}

#[cfg(test)]
thread_local! {
    static FAIL_RESERVE: std::cell::Cell<Option<&'static str>> =
        const { std::cell::Cell::new(None) };
}

// Unit tests cannot exhaust memory on demand, so they name a reservation
// that is then inflated to an amount no allocator can satisfy.
fn reserve_amount(what: &'static str, n: usize) -> usize {
    #[cfg(test)]
    {
        if FAIL_RESERVE.with(|f| f.get() == Some(what)) {
            return usize::MAX;
        }
    }
    let _ = what;
    n
}

impl<T: Ord> MedianTree<T> {
    /// Inserts `key` and rebuilds the tree.
    ///
    /// Returns false if the key was already present, in which case the keys
    /// are unchanged.
    ///
    /// # Examples
    /// ```
    /// use median_split_tree::MedianTree;
    ///
    /// let mut tree = MedianTree::new();
    /// assert!(tree.insert(7));
    /// assert!(!tree.insert(7));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        let changed = self.keys.insert(key);
        self.after_mutation(changed);
        changed
    }

    /// Removes `key` and rebuilds the tree.
    ///
    /// Returns false if the key was absent, in which case the keys are
    /// unchanged.
    ///
    /// # Examples
    /// ```
    /// use median_split_tree::MedianTree;
    ///
    /// let mut tree = MedianTree::from([1, 2, 3]);
    /// assert!(tree.remove(&2));
    /// assert!(!tree.remove(&2));
    /// assert_eq!(tree.as_slice(), &[1, 3]);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes `key` and returns it, if present.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let taken = self.keys.take(key);
        self.after_mutation(taken.is_some());
        taken
    }

    /// Like [`insert`](Self::insert), but reports allocation failure instead
    /// of aborting.
    ///
    /// All memory needed for the updated keys and the new tree is reserved
    /// before anything is modified.  On error the keys and the current tree
    /// are exactly as they were.
    pub fn try_insert(&mut self, key: T) -> Result<bool> {
        let present = self.keys.contains(&key);
        if present && self.policy == RebuildPolicy::OnChange {
            return Ok(false);
        }

        let new_len = self.keys.len() + usize::from(!present);
        if !present {
            let amount = reserve_amount("keys", 1);
            self.keys.try_reserve(amount).map_err(|source| {
                tracing::debug!(len = new_len, "could not reserve key slot");
                Error::Reserve {
                    what: "keys",
                    requested: 1,
                    source,
                }
            })?;
        }
        let mut candidate = Self::reserve_tree(new_len)?;

        // nothing below allocates
        let changed = self.keys.insert(key);
        debug_assert_eq!(changed, !present);
        candidate.fill(new_len);
        self.publish(candidate);
        Ok(changed)
    }

    /// Like [`remove`](Self::remove), but reports allocation failure instead
    /// of aborting.  On error the keys and the current tree are unchanged.
    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<bool>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let present = self.keys.contains(key);
        if !present && self.policy == RebuildPolicy::OnChange {
            return Ok(false);
        }

        let new_len = self.keys.len() - usize::from(present);
        let mut candidate = Self::reserve_tree(new_len)?;

        let changed = self.keys.remove(key);
        debug_assert_eq!(changed, present);
        candidate.fill(new_len);
        self.publish(candidate);
        Ok(changed)
    }

    /// Tests if the tree contains `key`, descending from the root.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the stored key equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        path::walk(&self.tree, self.keys.as_slice(), key, |_| ())
            .map(|id| self.node_ref(id).key())
    }

    /// Returns the nodes visited while searching for `key`, root first.
    ///
    /// The descent is the one [`contains`](Self::contains) performs, so
    /// `search_path(k).found() == contains(k)` always holds.
    ///
    /// # Examples
    /// ```
    /// use median_split_tree::MedianTree;
    ///
    /// let tree: MedianTree<_> = (1..=7).collect();
    /// let path = tree.search_path(&5);
    /// assert!(path.found());
    /// assert_eq!(path.entries().map(|(k, h)| (*k, h)).collect::<Vec<_>>(),
    ///            vec![(4, 3), (6, 2), (5, 1)]);
    ///
    /// let miss = tree.search_path(&0);
    /// assert!(!miss.found());
    /// assert_eq!(miss.keys().copied().collect::<Vec<_>>(), vec![4, 2, 1]);
    /// ```
    pub fn search_path<Q>(&self, key: &Q) -> SearchPath<'_, T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        SearchPath::trace(&self.tree, self.keys.as_slice(), key)
    }
}

impl<T> Default for MedianTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for MedianTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.root() {
            None => f.write_str("MedianTree(EMPTY)"),
            Some(root) => {
                // use NodeRef's Debug formatter
                f.write_fmt(format_args!(
                    "MedianTree(#{}, {:?})",
                    self.len(),
                    root
                ))
            }
        }
    }
}

// Equality, ordering and hashing look only at the keys; the shape follows
// from them.
impl<T: PartialEq> PartialEq for MedianTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.keys.as_slice() == other.keys.as_slice()
    }
}

impl<T: Eq> Eq for MedianTree<T> {}

impl<T: PartialOrd> PartialOrd for MedianTree<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.keys.as_slice().partial_cmp(other.keys.as_slice())
    }
}

impl<T: Ord> Ord for MedianTree<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.keys.as_slice().cmp(other.keys.as_slice())
    }
}

impl<T: std::hash::Hash> std::hash::Hash for MedianTree<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.keys.as_slice().hash(state);
    }
}

impl<T: Ord> From<SortedSeq<T>> for MedianTree<T> {
    fn from(keys: SortedSeq<T>) -> Self {
        let mut tree = MedianTree::new();
        tree.keys = keys;
        tree.after_mutation(true);
        tree
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for MedianTree<T> {
    fn from(value: [T; N]) -> Self {
        MedianTree::from_iter(value)
    }
}

impl<T: Ord> FromIterator<T> for MedianTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MedianTree::from(SortedSeq::from_iter(iter))
    }
}

/// Inserts every key, then rebuilds once.
impl<T: Ord> Extend<T> for MedianTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut changed = false;
        for x in iter {
            changed |= self.keys.insert(x);
        }
        self.after_mutation(changed);
    }
}

impl<T> From<MedianTree<T>> for Vec<T> {
    fn from(value: MedianTree<T>) -> Self {
        value.keys.into()
    }
}

impl<'a, T> IntoIterator for &'a MedianTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over the keys of a [`MedianTree`].
pub struct Iter<'a, T> {
    tree: &'a MedianTree<T>,
    work: Vec<NodeId>,
    len: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut curr: Option<NodeId>) {
        while let Some(id) = curr {
            self.work.push(id);
            curr = self.tree.tree.node(id).left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.work.pop()?;
        self.len -= 1;
        let tree = self.tree;
        let n = tree.tree.node(id);
        self.push_left_spine(n.right);
        Some(&tree.keys.as_slice()[n.pos])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}
