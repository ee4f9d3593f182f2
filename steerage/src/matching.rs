// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A directed matching over the vertices of a network.
//!
//! A matched pair `(u, v)` means the edge `u -> v` is selected into the matching. The `in`
//! direction is dense (every vertex is matched by at most one other), the `out` direction is
//! sparse and one-to-many.

use petgraph::graph::NodeIndex;
use smallvec::SmallVec;

/// A one-to-many directed matching with O(1) lookups in both directions.
///
/// Every vertex has at most one *in*-match (the vertex whose selected edge ends here), and a
/// list of *out*-matches (the vertices its selected edges end in). In the untargeted
/// controllability problem every out-match list has at most one element.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DirectedMatching {
    in_match: Vec<Option<NodeIndex>>,
    out_match: Vec<SmallVec<[NodeIndex; 1]>>,
}

impl DirectedMatching {
    /// Creates a matching over `n` vertices, all unmatched.
    pub fn new(n: usize) -> Self {
        Self {
            in_match: vec![None; n],
            out_match: vec![SmallVec::new(); n],
        }
    }

    /// Returns the number of vertices this matching covers.
    pub fn len(&self) -> usize {
        self.in_match.len()
    }

    /// Returns true if the matching covers no vertices.
    pub fn is_empty(&self) -> bool {
        self.in_match.is_empty()
    }

    /// Returns true if `v` is matched, i.e. some selected edge ends in `v`.
    pub fn is_matched(&self, v: NodeIndex) -> bool {
        self.in_match[v.index()].is_some()
    }

    /// Returns true if `u` matches at least one other vertex.
    pub fn is_matching(&self, u: NodeIndex) -> bool {
        !self.out_match[u.index()].is_empty()
    }

    /// Returns the vertex that matches `v`, or `None` if `v` is unmatched.
    pub fn match_in(&self, v: NodeIndex) -> Option<NodeIndex> {
        self.in_match[v.index()]
    }

    /// Returns the vertices matched by `u`, in insertion order (possibly empty).
    pub fn match_out(&self, u: NodeIndex) -> &[NodeIndex] {
        &self.out_match[u.index()]
    }

    /// Inserts the matched pair `(u, v)`, removing any existing pair ending in `v` first.
    ///
    /// A no-op if the pair is already present.
    pub fn set_match(&mut self, u: NodeIndex, v: NodeIndex) {
        match self.in_match[v.index()] {
            Some(old) if old == u => return,
            Some(_) => self.unmatch(v),
            None => {}
        }
        self.in_match[v.index()] = Some(u);
        self.out_match[u.index()].push(v);
    }

    /// Removes the matched pair ending in `v`, if any.
    pub fn unmatch(&mut self, v: NodeIndex) {
        if let Some(u) = self.in_match[v.index()].take() {
            let out = &mut self.out_match[u.index()];
            if let Some(pos) = out.iter().position(|&w| w == v) {
                out.remove(pos);
            }
        }
    }

    /// Iterates over all matched pairs `(u, v)`, in order of the `in` side.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.in_match
            .iter()
            .enumerate()
            .filter_map(|(v, u)| u.map(|u| (u, NodeIndex::new(v))))
    }
}
