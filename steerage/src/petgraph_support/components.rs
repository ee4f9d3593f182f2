// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use petgraph::graph::Graph;
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;
use petgraph::Directed;

/// Weakly connected component membership for a directed graph.
#[derive(Clone, Debug)]
pub(crate) struct WeakComponents {
    membership: Vec<usize>,
    count: usize,
}

impl WeakComponents {
    /// Computes the weakly connected components of `graph` with a union-find over its edges.
    pub fn new<N, E>(graph: &Graph<N, E, Directed>) -> Self {
        let mut union_find = UnionFind::new(graph.node_count());
        for edge in graph.edge_references() {
            union_find.union(edge.source().index(), edge.target().index());
        }

        // Renumber the union-find representatives into 0..count, in order of first appearance.
        let mut membership = Vec::with_capacity(graph.node_count());
        let mut repr_to_component = vec![usize::MAX; graph.node_count()];
        let mut count = 0;
        for ix in 0..graph.node_count() {
            let repr = union_find.find(ix);
            if repr_to_component[repr] == usize::MAX {
                repr_to_component[repr] = count;
                count += 1;
            }
            membership.push(repr_to_component[repr]);
        }

        Self { membership, count }
    }

    /// Returns the number of weakly connected components.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the component index of vertex `v`.
    pub fn component_of(&self, v: usize) -> usize {
        self.membership[v]
    }

    /// Returns the members of every component, grouped by component index.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut groups = vec![Vec::new(); self.count];
        for (v, &component) in self.membership.iter().enumerate() {
            groups[component].push(v);
        }
        groups
    }
}
