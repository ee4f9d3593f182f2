// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Controllability under nodal dynamics, after Liu, Slotine and Barabási (2011).
//!
//! The driver set is derived from a maximum matching on the bipartite graph `B(G)`: `B(G)` has
//! one *tail* copy and one *head* copy of every vertex, and one edge per edge of `G` connecting
//! the tail copy of its source to the head copy of its target. Vertices whose head copy is left
//! unmatched must receive an input signal; the matched edges form the stems and buds along which
//! signals propagate.
//!
//! Edge classification adapts the filtering algorithm of Régin (1994) for all-different
//! constraints: an unmatched edge belongs to some maximum matching iff it lies on an alternating
//! path from a free vertex or in an alternating cycle, and a matched edge outside every such
//! structure is forced into every maximum matching.

use crate::errors::Error;
use crate::matching::DirectedMatching;
use crate::network::Network;
use crate::paths::{Bud, ControlPath, Stem};
use crate::petgraph_support::scc::Sccs;
use crate::solver::{ControllabilityModel, EdgeClass};
use fixedbitset::FixedBitSet;
use log::{debug, info};
use petgraph::prelude::*;
use petgraph::visit::EdgeRef;
use std::collections::VecDeque;

/// Solver for the maximum-matching controllability model.
///
/// Created directly or through [`Model::Liu`](crate::Model::Liu). The solver borrows its network;
/// results live until the next [`calculate`](ControllabilityModel::calculate).
#[derive(Debug)]
pub struct LiuSolver<'g> {
    network: &'g Network,
    state: Option<LiuState>,
}

#[derive(Clone, Debug)]
struct LiuState {
    matching: DirectedMatching,
    drivers: Vec<NodeIndex>,
    paths: Vec<ControlPath>,
}

impl<'g> LiuSolver<'g> {
    /// Creates a solver attached to `network`, with no results yet.
    pub fn new(network: &'g Network) -> Self {
        Self {
            network,
            state: None,
        }
    }

    /// Returns the directed matching behind the last calculation.
    pub fn matching(&self) -> Result<&DirectedMatching, Error> {
        Ok(&self.state()?.matching)
    }

    fn state(&self) -> Result<&LiuState, Error> {
        self.state.as_ref().ok_or(Error::NotCalculated)
    }

    /// Computes a maximum matching on `B(G)` and encodes it as a directed matching: head copies
    /// live at offset `n`, so a matching edge `{u, v + n}` becomes the directed pair `u -> v`.
    fn compute_matching(&self) -> DirectedMatching {
        let n = self.network.vertex_count();
        let mut bipartite =
            UnGraph::<(), ()>::with_capacity(2 * n, self.network.edge_count());
        for _ in 0..2 * n {
            bipartite.add_node(());
        }
        for (_, u, v) in self.network.edges() {
            bipartite.add_edge(
                NodeIndex::new(u.index()),
                NodeIndex::new(v.index() + n),
                (),
            );
        }

        let maximum = petgraph::algo::maximum_matching(&bipartite);
        let mut matching = DirectedMatching::new(n);
        for v in 0..n {
            if let Some(mate) = maximum.mate(NodeIndex::new(v + n)) {
                matching.set_match(mate, NodeIndex::new(v));
            }
        }
        matching
    }

    fn matched_eid(&self, u: NodeIndex, v: NodeIndex) -> EdgeIndex {
        self.network
            .eid(u, v)
            .expect("matched pair corresponds to an edge of the network")
    }
}

impl Clone for LiuSolver<'_> {
    /// Returns a stateless duplicate attached to the same network. Results are not copied.
    fn clone(&self) -> Self {
        Self::new(self.network)
    }
}

impl ControllabilityModel for LiuSolver<'_> {
    fn calculate(&mut self) -> Result<(), Error> {
        let n = self.network.vertex_count();
        debug!(
            "calculating Liu controllability over {} vertices, {} edges",
            n,
            self.network.edge_count()
        );
        let matching = self.compute_matching();

        // Vertices no matched edge points at: these need an input signal.
        let natural_drivers: Vec<NodeIndex> = (0..n)
            .map(NodeIndex::new)
            .filter(|&v| !matching.is_matched(v))
            .collect();

        let mut paths = Vec::new();
        let mut vertex_path: Vec<Option<usize>> = vec![None; n];

        // Stems: follow the out-matches from each driver until the chain ends. Chains cannot
        // revisit a vertex because every vertex has at most one in-match.
        for &d in &natural_drivers {
            let idx = paths.len();
            let mut vertices = vec![d];
            let mut edges = Vec::new();
            vertex_path[d.index()] = Some(idx);
            let mut cur = d;
            while let Some(&next) = matching.match_out(cur).first() {
                edges.push(self.matched_eid(cur, next));
                vertices.push(next);
                vertex_path[next.index()] = Some(idx);
                cur = next;
            }
            paths.push(ControlPath::Stem(Stem::new(vertices, edges)));
        }
        let stem_count = paths.len();

        // Buds: every matched vertex not reached by a stem lies on a cycle of matched edges.
        for u in (0..n).map(NodeIndex::new) {
            if vertex_path[u.index()].is_some() || !matching.is_matched(u) {
                continue;
            }
            let idx = paths.len();
            let mut vertices = Vec::new();
            let mut edges = Vec::new();
            let mut cur = u;
            loop {
                vertices.push(cur);
                vertex_path[cur.index()] = Some(idx);
                let next = *matching
                    .match_out(cur)
                    .first()
                    .expect("vertices on a matched cycle have an out-match");
                edges.push(self.matched_eid(cur, next));
                if vertex_path[next.index()].is_some() {
                    break;
                }
                cur = next;
            }
            paths.push(ControlPath::Bud(Bud::new(vertices, edges)));
        }

        // Attach buds to stems where an in-neighbor of a bud vertex lies on a stem. The bud holds
        // a non-owning index into the path list; the stem does not point back.
        for idx in stem_count..paths.len() {
            let mut attach = None;
            'scan: for &w in paths[idx].vertices() {
                for z in self.network.neighbors(w, Incoming) {
                    match vertex_path[z.index()] {
                        Some(p) if p < stem_count => {
                            attach = Some(p);
                            break 'scan;
                        }
                        _ => {}
                    }
                }
            }
            if let (Some(p), ControlPath::Bud(bud)) = (attach, &mut paths[idx]) {
                bud.stem = Some(p);
            }
        }

        // A bud with no stem to ride on needs an input signal of its own, delivered through its
        // first (lowest-indexed) vertex.
        let mut drivers = natural_drivers;
        for path in &paths[stem_count..] {
            if let ControlPath::Bud(bud) = path {
                if bud.attached_stem().is_none() {
                    drivers.push(bud.vertices[0]);
                }
            }
        }
        if drivers.is_empty() && n > 0 {
            // Cannot happen with the bud rule above, but every real network needs at least one
            // input.
            info!("every vertex is matched; forcing vertex 0 into the driver set");
            drivers.push(NodeIndex::new(0));
        }
        drivers.sort_unstable();

        self.state = Some(LiuState {
            matching,
            drivers,
            paths,
        });
        Ok(())
    }

    fn driver_nodes(&self) -> Result<&[NodeIndex], Error> {
        Ok(&self.state()?.drivers)
    }

    fn control_paths(&self) -> Result<&[ControlPath], Error> {
        Ok(&self.state()?.paths)
    }

    fn controllability(&self) -> Result<f64, Error> {
        let state = self.state()?;
        let n = self.network.vertex_count();
        if n == 0 {
            return Ok(0.0);
        }
        Ok(state.drivers.len() as f64 / n as f64)
    }

    fn edge_classes(&self) -> Result<Vec<EdgeClass>, Error> {
        let state = self.state()?;
        let n = self.network.vertex_count();
        let m = self.network.edge_count();
        let mut classes = vec![EdgeClass::Redundant; m];

        // Orientation of B(G): matched pairs run head copy -> tail copy, everything else tail
        // copy -> head copy, so alternating paths and cycles become directed ones. Only the
        // lowest-index copy of a matched (u, v) pair is oriented as matched; further parallel
        // copies form alternating 2-cycles with it.
        let mut oriented = DiGraph::<(), EdgeIndex>::with_capacity(2 * n, m);
        for _ in 0..2 * n {
            oriented.add_node(());
        }
        let mut matched_seen = vec![false; n];
        let mut matched_arcs = FixedBitSet::with_capacity(m);
        for (eid, u, v) in self.network.edges() {
            let tail = NodeIndex::new(u.index());
            let head = NodeIndex::new(v.index() + n);
            if state.matching.match_in(v) == Some(u) && !matched_seen[v.index()] {
                matched_seen[v.index()] = true;
                matched_arcs.insert(eid.index());
                oriented.add_edge(head, tail, eid);
            } else {
                oriented.add_edge(tail, head, eid);
            }
        }

        // Free vertices: unmatched head copies and non-matching tail copies.
        let mut seeds = Vec::new();
        for v in (0..n).map(NodeIndex::new) {
            if !state.matching.is_matched(v) {
                seeds.push(NodeIndex::new(v.index() + n));
            }
            if !state.matching.is_matching(v) {
                seeds.push(v);
            }
        }

        // An arc lies on an alternating path from a free vertex iff its source is forward
        // reachable from a seed or its target is backward reachable from one.
        let forward = reachable(&oriented, &seeds, Outgoing);
        let backward = reachable(&oriented, &seeds, Incoming);
        for edge in oriented.edge_references() {
            if forward.contains(edge.source().index()) || backward.contains(edge.target().index())
            {
                classes[edge.weight().index()] = EdgeClass::Ordinary;
            }
        }

        // Alternating cycles: an unmatched arc whose endpoints share a strongly connected
        // component can be swapped into a maximum matching. Matched arcs are deliberately left
        // alone here; a matched edge whose only alternating structure is a cycle is still forced
        // whenever its head must stay matched.
        let sccs = Sccs::new(&oriented);
        for edge in oriented.edge_references() {
            if !matched_arcs.contains(edge.weight().index())
                && sccs.is_same_scc(edge.source(), edge.target())
            {
                classes[edge.weight().index()] = EdgeClass::Ordinary;
            }
        }

        // Whatever is left of the matching is forced into every maximum matching.
        for eid in matched_arcs.ones() {
            if classes[eid] == EdgeClass::Redundant {
                classes[eid] = EdgeClass::Critical;
            }
        }
        Ok(classes)
    }

    fn network(&self) -> &Network {
        self.network
    }
}

/// Multi-source BFS over `graph` in the given direction, returning the visited set.
fn reachable(
    graph: &DiGraph<(), EdgeIndex>,
    seeds: &[NodeIndex],
    direction: Direction,
) -> FixedBitSet {
    let mut visited = FixedBitSet::with_capacity(graph.node_count());
    let mut queue = VecDeque::new();
    for &seed in seeds {
        if !visited.put(seed.index()) {
            queue.push_back(seed);
        }
    }
    while let Some(node) = queue.pop_front() {
        for next in graph.neighbors_directed(node, direction) {
            if !visited.put(next.index()) {
                queue.push_back(next);
            }
        }
    }
    visited
}
