use super::builder::{Arena, NodeId};
use std::borrow::Borrow;
use std::cmp::Ordering::*;
use std::fmt::{Debug, Formatter};
use std::iter::FusedIterator;

// Descends from the root toward `key`, calling `visit` on each node reached.
// Returns the matching node, if any.  Equal stops, less goes left, greater
// goes right.  Every query on the tree goes through here.
pub(super) fn walk<T, Q, F>(
    arena: &Arena,
    keys: &[T],
    key: &Q,
    mut visit: F,
) -> Option<NodeId>
where
    T: Borrow<Q>,
    Q: Ord + ?Sized,
    F: FnMut(NodeId),
{
    let mut curr = arena.root();
    while let Some(id) = curr {
        visit(id);
        let n = arena.node(id);
        match key.cmp(keys[n.pos].borrow()) {
            Less => curr = n.left,
            Equal => return Some(id),
            Greater => curr = n.right,
        }
    }

    None
}

/// A read-only handle to one node of a [`MedianTree`](crate::MedianTree).
///
/// Handles borrow the tree, so they cannot outlive the rebuild that replaces
/// the node set they belong to.
pub struct NodeRef<'a, T> {
    arena: &'a Arena,
    keys: &'a [T],
    id: NodeId,
}

impl<'a, T> NodeRef<'a, T> {
    pub(super) fn new(arena: &'a Arena, keys: &'a [T], id: NodeId) -> Self {
        NodeRef { arena, keys, id }
    }

    fn child(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| NodeRef::new(self.arena, self.keys, id))
    }

    /// The node's key.
    pub fn key(&self) -> &'a T {
        &self.keys[self.position()]
    }

    /// The height of the subtree rooted here; a leaf has height 1.
    pub fn height(&self) -> u32 {
        self.arena.node(self.id).height
    }

    /// The in-order index of the node's key, i.e. its position in the
    /// sorted key sequence.
    pub fn position(&self) -> usize {
        self.arena.node(self.id).pos
    }

    /// The left child, holding lesser keys.
    pub fn left(&self) -> Option<Self> {
        self.child(self.arena.node(self.id).left)
    }

    /// The right child, holding greater keys.
    pub fn right(&self) -> Option<Self> {
        self.child(self.arena.node(self.id).right)
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.height() == 1
    }
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

// Handles are equal when they name the same node of the same tree.
impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.arena, other.arena) && self.id == other.id
    }
}

impl<'a, T> Eq for NodeRef<'a, T> {}

impl<'a, T: Debug> Debug for NodeRef<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("(ht: {} {:?} ", self.height(), self.key()))?;

        match self.left() {
            None => f.write_str(".")?,
            Some(lf) => lf.fmt(f)?,
        }

        f.write_str(" ")?;

        match self.right() {
            None => f.write_str(".")?,
            Some(rt) => rt.fmt(f)?,
        }

        f.write_str(")")
    }
}

/// The nodes visited by one search, from the root down.
///
/// The path ends at the node holding the target when the search succeeds,
/// and at the last node examined before falling off the tree when it fails.
/// For an empty tree the path is empty.
pub struct SearchPath<'a, T> {
    arena: &'a Arena,
    keys: &'a [T],
    ids: Vec<NodeId>,
    found: bool,
}

impl<'a, T> SearchPath<'a, T> {
    pub(super) fn trace<Q>(arena: &'a Arena, keys: &'a [T], key: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut ids = Vec::with_capacity(arena.height() as usize);
        let found = walk(arena, keys, key, |id| ids.push(id)).is_some();
        SearchPath {
            arena,
            keys,
            ids,
            found,
        }
    }

    /// Returns true if the search reached a node holding its target.
    pub fn found(&self) -> bool {
        self.found
    }

    /// Returns the number of nodes visited.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no node was visited (the tree is empty).
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the last node visited.
    pub fn last(&self) -> Option<NodeRef<'a, T>> {
        self.ids
            .last()
            .map(|&id| NodeRef::new(self.arena, self.keys, id))
    }

    /// Tests if `node` lies on the path.
    pub fn contains(&self, node: &NodeRef<'_, T>) -> bool {
        std::ptr::eq(self.arena, node.arena) && self.ids.contains(&node.id)
    }

    /// Returns an iterator over the visited nodes, root first.
    pub fn iter(&self) -> PathIter<'a, '_, T> {
        PathIter {
            arena: self.arena,
            keys: self.keys,
            ids: self.ids.iter(),
        }
    }

    /// Returns an iterator over the visited keys, root first.
    pub fn keys(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.iter().map(|n| n.key())
    }

    /// Returns an iterator over `(key, height)` for each visited node.
    pub fn entries(&self) -> impl Iterator<Item = (&'a T, u32)> + '_ {
        self.iter().map(|n| (n.key(), n.height()))
    }

    /// Returns the sorted-sequence positions of the visited nodes.
    ///
    /// These are the indices an upper-middle binary search over the same
    /// keys probes; see [`upper_mid_search`](crate::bisect::upper_mid_search).
    pub fn positions(&self) -> Vec<usize> {
        self.iter().map(|n| n.position()).collect()
    }
}

impl<'a, T: Debug> Debug for SearchPath<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.found { "Found" } else { "Missed" })?;
        f.debug_list().entries(self.keys()).finish()
    }
}

impl<'a, 'p, T> IntoIterator for &'p SearchPath<'a, T> {
    type Item = NodeRef<'a, T>;
    type IntoIter = PathIter<'a, 'p, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the nodes of a [`SearchPath`].
pub struct PathIter<'a, 'p, T> {
    arena: &'a Arena,
    keys: &'a [T],
    ids: std::slice::Iter<'p, NodeId>,
}

impl<'a, 'p, T> Iterator for PathIter<'a, 'p, T> {
    type Item = NodeRef<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids
            .next()
            .map(|&id| NodeRef::new(self.arena, self.keys, id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<'a, 'p, T> DoubleEndedIterator for PathIter<'a, 'p, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ids
            .next_back()
            .map(|&id| NodeRef::new(self.arena, self.keys, id))
    }
}

impl<'a, 'p, T> ExactSizeIterator for PathIter<'a, 'p, T> {}

impl<'a, 'p, T> FusedIterator for PathIter<'a, 'p, T> {}
