// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The directed network under analysis.
//!
//! [`Network`] wraps a petgraph [`DiGraph`] and exposes exactly the queries the solvers need:
//! vertex and edge counts, degree and neighbor lookups, the edge list in edge-index order, and
//! weakly connected components (computed on demand and cached). Vertices optionally carry a name,
//! assigned by the readers in [`crate::io`] and used when printing results.

use crate::petgraph_support::components::WeakComponents;
use once_cell::sync::OnceCell;
use petgraph::prelude::*;
use petgraph::visit::EdgeRef;
use std::borrow::Cow;

/// Per-vertex data stored in the underlying graph.
#[derive(Clone, Debug, Default)]
pub(crate) struct Vertex {
    name: Option<Box<str>>,
}

/// A directed network.
///
/// Parallel edges and self-loops are permitted. Vertices are identified by contiguous indices
/// `0..vertex_count()`, edges by contiguous indices `0..edge_count()` in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Network {
    graph: DiGraph<Vertex, ()>,
    // The weakly connected components of the graph, computed on demand.
    weak_components: OnceCell<WeakComponents>,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a network with `n` unnamed vertices and the given directed edges.
    ///
    /// Endpoints at `n` or beyond grow the vertex set so that every edge is representable.
    pub fn from_edges(n: usize, edges: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut network = Self::new();
        network.add_vertices(n);
        network.add_edges(edges);
        network
    }

    /// Appends a single unnamed vertex, returning its index.
    pub fn add_vertex(&mut self) -> NodeIndex {
        self.invalidate_caches();
        self.graph.add_node(Vertex::default())
    }

    /// Appends a named vertex, returning its index.
    pub fn add_named_vertex(&mut self, name: impl Into<String>) -> NodeIndex {
        self.invalidate_caches();
        self.graph.add_node(Vertex {
            name: Some(name.into().into_boxed_str()),
        })
    }

    /// Grows the vertex set to at least `n` vertices.
    pub fn add_vertices(&mut self, n: usize) {
        if n > self.graph.node_count() {
            self.invalidate_caches();
        }
        while self.graph.node_count() < n {
            self.graph.add_node(Vertex::default());
        }
    }

    /// Appends the given directed edges, growing the vertex set as needed.
    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = (usize, usize)>) {
        for (u, v) in edges {
            self.invalidate_caches();
            self.add_vertices(u.max(v) + 1);
            self.graph
                .add_edge(NodeIndex::new(u), NodeIndex::new(v), ());
        }
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true: `steerage` networks are directed by contract.
    pub fn is_directed(&self) -> bool {
        true
    }

    /// Returns the name of vertex `v`, if one was assigned.
    pub fn vertex_name(&self, v: NodeIndex) -> Option<&str> {
        self.graph[v].name.as_deref()
    }

    /// Returns the display label of vertex `v`: its name if assigned, its index otherwise.
    pub fn vertex_label(&self, v: NodeIndex) -> Cow<'_, str> {
        match self.vertex_name(v) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(v.index().to_string()),
        }
    }

    /// Returns the endpoints `(source, target)` of edge `e`.
    ///
    /// # Panics
    ///
    /// Panics if `e` is not a valid edge index.
    pub fn edge_endpoints(&self, e: EdgeIndex) -> (NodeIndex, NodeIndex) {
        self.graph
            .edge_endpoints(e)
            .expect("edge index out of bounds")
    }

    /// Iterates over all edges as `(edge index, source, target)`, in edge-index order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, NodeIndex, NodeIndex)> + '_ {
        self.graph
            .edge_references()
            .map(|edge| (edge.id(), edge.source(), edge.target()))
    }

    /// Returns the index of an edge `u -> v`, or `None` if no such edge exists.
    ///
    /// With parallel edges, which of the copies is returned is unspecified but deterministic.
    pub fn eid(&self, u: NodeIndex, v: NodeIndex) -> Option<EdgeIndex> {
        self.graph.find_edge(u, v)
    }

    /// Returns the in- or out-degree of vertex `v`.
    pub fn degree(&self, v: NodeIndex, direction: Direction) -> usize {
        self.graph.edges_directed(v, direction).count()
    }

    /// Returns the total degree of vertex `v`, counting self-loops twice.
    pub fn total_degree(&self, v: NodeIndex) -> usize {
        self.degree(v, Outgoing) + self.degree(v, Incoming)
    }

    /// Iterates over the in- or out-neighbors of vertex `v`.
    pub fn neighbors(&self, v: NodeIndex, direction: Direction) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(v, direction)
    }

    /// Iterates over the edges incident on `v` in the given direction, as edge indices.
    pub fn incident(&self, v: NodeIndex, direction: Direction) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges_directed(v, direction).map(|edge| edge.id())
    }

    /// Returns the out-degree sequence, indexed by vertex.
    pub fn out_degree_sequence(&self) -> Vec<usize> {
        (0..self.vertex_count())
            .map(|v| self.degree(NodeIndex::new(v), Outgoing))
            .collect()
    }

    /// Returns the in-degree sequence, indexed by vertex.
    pub fn in_degree_sequence(&self) -> Vec<usize> {
        (0..self.vertex_count())
            .map(|v| self.degree(NodeIndex::new(v), Incoming))
            .collect()
    }

    /// Returns the weakly connected components, computing them on first use.
    pub(crate) fn weak_components(&self) -> &WeakComponents {
        self.weak_components
            .get_or_init(|| WeakComponents::new(&self.graph))
    }

    fn invalidate_caches(&mut self) {
        self.weak_components.take();
    }
}
