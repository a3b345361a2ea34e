use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::collections::TryReserveError;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;

/// A sorted, duplicate-free sequence of keys.
///
/// This is the authoritative copy of a [`MedianTree`](crate::MedianTree)'s
/// contents: the tree is derived from it and never the other way around.  It
/// is usable on its own as a flat sorted set backed by a `Vec`.
///
/// Lookups are binary searches, O(log n).  Inserts and removes shift the tail
/// of the vector, O(n).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SortedSeq<T> {
    keys: Vec<T>,
}

impl<T> SortedSeq<T> {
    /// Returns a new, empty sequence.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the keys as a sorted slice.
    pub fn as_slice(&self) -> &[T] {
        &self.keys
    }

    /// Returns the key at position `i`, if any.
    pub fn get(&self, i: usize) -> Option<&T> {
        self.keys.get(i)
    }

    /// Returns the least key.
    pub fn first(&self) -> Option<&T> {
        self.keys.first()
    }

    /// Returns the greatest key.
    pub fn last(&self) -> Option<&T> {
        self.keys.last()
    }

    /// Removes all keys.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Reserves room for `additional` more keys without aborting on failure.
    pub fn try_reserve(
        &mut self,
        additional: usize,
    ) -> Result<(), TryReserveError> {
        self.keys.try_reserve(additional)
    }

    /// Returns the index of the first key that is not less than `key`,
    /// together with whether that key is equal to `key`.
    ///
    /// This is the classic lower bound: when the flag is false, the index is
    /// where `key` would be inserted.
    pub fn lower_bound<Q>(&self, key: &Q) -> (usize, bool)
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let i = self.keys.partition_point(|k| k.borrow() < key);
        let hit = self
            .keys
            .get(i)
            .map_or(false, |k| k.borrow().cmp(key) == Equal);
        (i, hit)
    }

    /// Returns the position of `key`, if present.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.lower_bound(key) {
            (i, true) => Some(i),
            (_, false) => None,
        }
    }

    /// Tests if the sequence contains `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.lower_bound(key).1
    }

    /// Inserts `key` at its sorted position.
    ///
    /// Returns false, leaving the sequence unchanged, if an equal key is
    /// already present.
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        match self.lower_bound(&key) {
            (_, true) => false,
            (i, false) => {
                self.keys.insert(i, key);
                true
            }
        }
    }

    /// Removes `key` and returns it, if present.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.position(key).map(|i| self.keys.remove(i))
    }

    /// Removes `key`.  Returns false if it was not present, in which case
    /// the sequence is unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Builds a sequence from keys in any order, dropping duplicates.
    pub fn from_unsorted(mut keys: Vec<T>) -> Self
    where
        T: Ord,
    {
        keys.sort();
        keys.dedup();
        Self { keys }
    }

    #[cfg(test)]
    pub(crate) fn chk(&self)
    where
        T: Ord,
    {
        assert!(self.keys.windows(2).all(|w| w[0] < w[1]));
    }
}

impl<T> Default for SortedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for SortedSeq<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.keys
    }
}

impl<T: Debug> Debug for SortedSeq<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.keys.iter()).finish()
    }
}

impl<T: Ord> FromIterator<T> for SortedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_unsorted(iter.into_iter().collect())
    }
}

impl<T: Ord> Extend<T> for SortedSeq<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut keys = std::mem::take(&mut self.keys);
        keys.extend(iter);
        *self = Self::from_unsorted(keys);
    }
}

impl<T> From<SortedSeq<T>> for Vec<T> {
    fn from(value: SortedSeq<T>) -> Self {
        value.keys
    }
}

impl<'a, T> IntoIterator for &'a SortedSeq<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

impl<T> IntoIterator for SortedSeq<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.into_iter()
    }
}
