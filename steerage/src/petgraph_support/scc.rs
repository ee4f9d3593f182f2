// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use petgraph::visit::{IntoNeighborsDirected, IntoNodeIdentifiers, VisitMap, Visitable};
use std::collections::HashMap;

/// Strongly connected component membership, answering same-component queries in O(1).
///
/// Only components with more than one member are stored: a node absent from the map is its own
/// trivial component.
#[derive(Clone, Debug)]
pub(crate) struct Sccs {
    multi_map: HashMap<NodeIndex, usize>,
}

impl Sccs {
    /// Creates a new instance from the provided graph.
    pub fn new<G>(graph: G) -> Self
    where
        G: IntoNeighborsDirected<NodeId = NodeIndex> + Visitable + IntoNodeIdentifiers,
        <G as Visitable>::Map: VisitMap<NodeIndex>,
    {
        // Use kosaraju_scc since it is iterative (tarjan_scc is recursive) and bipartite
        // orientations of large networks have unbounded depth.
        let sccs = kosaraju_scc(graph);
        let mut multi_map = HashMap::new();
        for (idx, scc) in sccs.iter().enumerate() {
            if scc.len() > 1 {
                multi_map.extend(scc.iter().map(|ix| (*ix, idx)));
            }
        }
        Self { multi_map }
    }

    /// Returns true if `a` and `b` are in the same scc.
    pub fn is_same_scc(&self, a: NodeIndex, b: NodeIndex) -> bool {
        if a == b {
            return true;
        }
        match (self.multi_map.get(&a), self.multi_map.get(&b)) {
            (Some(a_scc), Some(b_scc)) => a_scc == b_scc,
            _ => false,
        }
    }
}
