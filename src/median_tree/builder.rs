use crate::bisect::upper_mid;
use std::collections::TryReserveError;

/// Index of a node within an [`Arena`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Node {
    // position of the node's key in the sorted sequence
    pub(crate) pos: usize,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) height: u32,
}

/// The node set of one tree.  Every node is created by a single build and
/// the whole set is dropped when the next build replaces it.
///
/// Nodes refer to keys by position rather than holding them, so the arena is
/// independent of the key type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Arena {
    /// Builds the tree for a sorted sequence of `len` keys.
    pub(crate) fn build(len: usize) -> Self {
        let mut arena = Arena {
            nodes: Vec::with_capacity(len),
            root: None,
        };
        arena.fill(len);
        arena
    }

    /// Returns an empty arena with room for exactly `len` nodes, or an error
    /// if that room cannot be allocated.
    pub(crate) fn try_with_capacity(
        len: usize,
    ) -> Result<Self, TryReserveError> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(len)?;
        Ok(Arena { nodes, root: None })
    }

    /// Builds the tree for `len` keys into this (empty) arena.  Does not
    /// allocate if the arena already has room for `len` nodes.
    pub(crate) fn fill(&mut self, len: usize) {
        debug_assert!(self.nodes.is_empty());
        self.root = self.split(0, len);
        debug_assert_eq!(self.nodes.len(), len);
    }

    // Builds the subtree for the half-open position range [lo, hi).
    fn split(&mut self, lo: usize, hi: usize) -> Option<NodeId> {
        if lo >= hi {
            return None;
        }

        let mid = upper_mid(lo, hi - 1);
        let left = self.split(lo, mid);
        let right = self.split(mid + 1, hi);
        let height = 1 + self.height_of(left).max(self.height_of(right));

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            pos: mid,
            left,
            right,
            height,
        });
        Some(id)
    }

    pub(crate) fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn height_of(&self, id: Option<NodeId>) -> u32 {
        id.map_or(0, |id| self.node(id).height)
    }

    /// Height of the whole tree; 0 when empty.
    pub(crate) fn height(&self) -> u32 {
        self.height_of(self.root)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    // Checks the median rule and the recorded heights, returning the number
    // of nodes reached from the root.
    #[cfg(test)]
    pub(crate) fn chk(&self) -> usize {
        fn chk_span(
            arena: &Arena,
            id: Option<NodeId>,
            lo: usize,
            hi: usize,
        ) -> (usize, u32) {
            match id {
                None => {
                    assert!(lo >= hi, "missing node for [{lo}, {hi})");
                    (0, 0)
                }
                Some(id) => {
                    assert!(lo < hi, "extra node for empty span at {lo}");
                    let n = arena.node(id);
                    assert_eq!(n.pos, upper_mid(lo, hi - 1));
                    let (lf_cnt, lf_ht) = chk_span(arena, n.left, lo, n.pos);
                    let (rt_cnt, rt_ht) =
                        chk_span(arena, n.right, n.pos + 1, hi);
                    assert_eq!(n.height, 1 + lf_ht.max(rt_ht));
                    (lf_cnt + rt_cnt + 1, n.height)
                }
            }
        }

        let (cnt, _) = chk_span(self, self.root, 0, self.nodes.len());
        assert_eq!(cnt, self.nodes.len());
        cnt
    }
}
