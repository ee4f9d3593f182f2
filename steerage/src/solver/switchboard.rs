// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Controllability under switchboard dynamics, after Ruths and Ruths (2014).
//!
//! Under switchboard dynamics the state lives on the edges, and a vertex acts as a switchboard
//! mapping its incoming signals onto its outgoing ones. Drivers are the *divergent* vertices
//! (more outgoing than incoming edges), plus one representative per *balanced* weakly connected
//! component. The control paths are directed trails: the solver packs every edge into open and
//! closed walks with a greedy two-phase traversal, then splices closed walks into walks they
//! share a vertex with.

use crate::errors::Error;
use crate::network::Network;
use crate::paths::{ControlPath, Walk};
use crate::solver::{ControllabilityMeasure, ControllabilityModel, EdgeClass};
use fixedbitset::FixedBitSet;
use log::debug;
use petgraph::prelude::*;
use std::collections::VecDeque;

/// Solver for the switchboard controllability model.
///
/// Created directly or through [`Model::Switchboard`](crate::Model::Switchboard). Reports the
/// edge-based controllability measure unless [`set_measure`](Self::set_measure) says otherwise.
#[derive(Debug)]
pub struct SwitchboardSolver<'g> {
    network: &'g Network,
    measure: ControllabilityMeasure,
    state: Option<SbdState>,
}

#[derive(Clone, Debug)]
struct SbdState {
    drivers: Vec<NodeIndex>,
    paths: Vec<ControlPath>,
    open_walks: usize,
    balanced_components: usize,
}

impl<'g> SwitchboardSolver<'g> {
    /// Creates a solver attached to `network`, with no results yet.
    pub fn new(network: &'g Network) -> Self {
        Self {
            network,
            measure: ControllabilityMeasure::Edges,
            state: None,
        }
    }

    /// Selects the measure reported by [`controllability`](ControllabilityModel::controllability).
    pub fn set_measure(&mut self, measure: ControllabilityMeasure) {
        self.measure = measure;
    }

    /// Returns the measure this solver reports.
    pub fn measure(&self) -> ControllabilityMeasure {
        self.measure
    }

    /// Returns the number of open walks found by the last calculation.
    pub fn open_walk_count(&self) -> Result<usize, Error> {
        Ok(self.state()?.open_walks)
    }

    /// Returns the number of balanced weakly connected components.
    pub fn balanced_component_count(&self) -> Result<usize, Error> {
        Ok(self.state()?.balanced_components)
    }

    fn state(&self) -> Result<&SbdState, Error> {
        self.state.as_ref().ok_or(Error::NotCalculated)
    }

    /// BFS through zero-difference vertices only. Returns true if `start` lies in a balanced
    /// connected subnetwork that holds a driver: the search never meets an imbalanced vertex and
    /// covers more than `start` alone (or `start` carries a self-loop). `excluded` is treated as
    /// absent from the network.
    fn in_nontrivial_balanced_component(
        &self,
        start: NodeIndex,
        excluded: Option<NodeIndex>,
        diffs: &[i64],
    ) -> bool {
        if diffs[start.index()] != 0 {
            return false;
        }
        let mut visited = FixedBitSet::with_capacity(self.network.vertex_count());
        visited.put(start.index());
        let mut queue = VecDeque::new();
        queue.push_back(start);
        let mut size = 1usize;
        while let Some(cur) = queue.pop_front() {
            for direction in [Outgoing, Incoming] {
                for next in self.network.neighbors(cur, direction) {
                    if Some(next) == excluded || next == cur {
                        continue;
                    }
                    if diffs[next.index()] != 0 {
                        return false;
                    }
                    if !visited.put(next.index()) {
                        size += 1;
                        queue.push_back(next);
                    }
                }
            }
        }
        size > 1 || self.network.eid(start, start).is_some()
    }
}

impl Clone for SwitchboardSolver<'_> {
    /// Returns a stateless duplicate attached to the same network. Results are not copied.
    fn clone(&self) -> Self {
        let mut solver = Self::new(self.network);
        solver.measure = self.measure;
        solver
    }
}

impl ControllabilityModel for SwitchboardSolver<'_> {
    fn calculate(&mut self) -> Result<(), Error> {
        let n = self.network.vertex_count();
        let m = self.network.edge_count();
        debug!(
            "calculating switchboard controllability over {} vertices, {} edges",
            n, m
        );
        let out_deg = self.network.out_degree_sequence();
        let in_deg = self.network.in_degree_sequence();

        // Divergent vertices need an input signal of their own.
        let mut drivers: Vec<NodeIndex> = (0..n)
            .filter(|&v| out_deg[v] > in_deg[v])
            .map(NodeIndex::new)
            .collect();

        // A fully balanced component carries signals round and round without ever creating or
        // destroying one; it is driven through an arbitrary member, the lowest-indexed.
        let components = self.network.weak_components();
        let mut component_balanced = vec![true; components.count()];
        for v in 0..n {
            let balanced = out_deg[v] == in_deg[v] && out_deg[v] > 0;
            if !balanced {
                component_balanced[components.component_of(v)] = false;
            }
        }
        let mut balanced_components = 0;
        for (component, members) in components.groups().iter().enumerate() {
            if component_balanced[component] {
                balanced_components += 1;
                drivers.push(NodeIndex::new(members[0]));
            }
        }
        drivers.sort_unstable();

        let (opens, closeds) = pack_walks(self.network, &out_deg, &in_deg);
        let open_walks = opens.len();
        let mut opens = opens;
        let closeds = merge_closed_walks(&mut opens, closeds);

        let mut paths: Vec<ControlPath> = opens.into_iter().map(ControlPath::OpenWalk).collect();
        paths.extend(closeds.into_iter().map(ControlPath::ClosedWalk));

        self.state = Some(SbdState {
            drivers,
            paths,
            open_walks,
            balanced_components,
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
        match self.measure {
            ControllabilityMeasure::Nodes => {
                let n = self.network.vertex_count();
                if n == 0 {
                    return Ok(0.0);
                }
                Ok(state.drivers.len() as f64 / n as f64)
            }
            ControllabilityMeasure::Edges => {
                let m = self.network.edge_count();
                if m == 0 {
                    return Ok(0.0);
                }
                Ok((state.open_walks + state.balanced_components) as f64 / m as f64)
            }
        }
    }

    /// Classifies every edge from the degree-difference vector alone; unlike the matching-based
    /// classifier this needs no prior [`calculate`](ControllabilityModel::calculate).
    fn edge_classes(&self) -> Result<Vec<EdgeClass>, Error> {
        let n = self.network.vertex_count();
        let out_deg = self.network.out_degree_sequence();
        let in_deg = self.network.in_degree_sequence();
        let mut diffs: Vec<i64> = (0..n)
            .map(|v| in_deg[v] as i64 - out_deg[v] as i64)
            .collect();

        let mut classes = Vec::with_capacity(self.network.edge_count());
        for (_, u, v) in self.network.edges() {
            if u == v {
                // Removing a self-loop leaves both degree differences unchanged; it only matters
                // for a vertex whose entire edge set is the loop, a singleton balanced component
                // that loses its driver.
                let lone = in_deg[u.index()] == 1 && out_deg[u.index()] == 1;
                classes.push(if lone {
                    EdgeClass::Distinguished
                } else {
                    EdgeClass::Redundant
                });
                continue;
            }

            let mut score = 0i32;
            // The tail stops being divergent: one driver less.
            if diffs[u.index()] == -1 {
                score -= 1;
            }
            // The head becomes divergent: one driver more.
            if diffs[v.index()] == 0 {
                score += 1;
            }
            // A balanced component falls out of balance and loses its driver.
            if diffs[u.index()] == 0
                && diffs[v.index()] == 0
                && self.in_nontrivial_balanced_component(u, None, &diffs)
            {
                score -= 1;
            }
            // The head becomes balanced and completes a balanced component: one driver more.
            if diffs[v.index()] == 1 {
                diffs[v.index()] = 0;
                if self.in_nontrivial_balanced_component(v, Some(u), &diffs) {
                    score += 1;
                }
                diffs[v.index()] = 1;
            }
            // Symmetrically for the tail.
            if diffs[u.index()] == -1 {
                diffs[u.index()] = 0;
                if self.in_nontrivial_balanced_component(u, Some(v), &diffs) {
                    score += 1;
                }
                diffs[u.index()] = -1;
            }

            classes.push(match score {
                score if score < 0 => EdgeClass::Distinguished,
                0 => EdgeClass::Redundant,
                _ => EdgeClass::Critical,
            });
        }
        Ok(classes)
    }

    fn network(&self) -> &Network {
        self.network
    }
}

/// Greedily packs every edge into directed trails.
///
/// Phase 1 drains divergent vertices until their residual degrees balance; phase 2 sweeps the
/// vertices in index order until no unused edge remains. Candidate edges are always taken in
/// lowest-edge-index order, so the packing is deterministic given the graph.
fn pack_walks(network: &Network, out_deg: &[usize], in_deg: &[usize]) -> (Vec<Walk>, Vec<Walk>) {
    let n = network.vertex_count();
    let m = network.edge_count();

    let mut out_edges: Vec<Vec<EdgeIndex>> = vec![Vec::new(); n];
    for (eid, u, _) in network.edges() {
        out_edges[u.index()].push(eid);
    }
    let mut packer = WalkPacker {
        network,
        out_edges,
        cursor: vec![0; n],
        edge_used: FixedBitSet::with_capacity(m),
        res_out: out_deg.to_vec(),
        res_in: in_deg.to_vec(),
    };

    let mut opens = Vec::new();
    let mut closeds = Vec::new();
    let mut emit = |walk: Option<(Walk, bool)>| {
        match walk {
            Some((walk, true)) => closeds.push(walk),
            Some((walk, false)) => opens.push(walk),
            None => {}
        }
    };

    for d in (0..n).map(NodeIndex::new) {
        if out_deg[d.index()] <= in_deg[d.index()] {
            continue;
        }
        while packer.res_out[d.index()] > packer.res_in[d.index()] {
            emit(packer.walk_from(d));
        }
    }
    for i in (0..n).map(NodeIndex::new) {
        while packer.res_out[i.index()] > 0 {
            emit(packer.walk_from(i));
        }
    }

    (opens, closeds)
}

struct WalkPacker<'g> {
    network: &'g Network,
    out_edges: Vec<Vec<EdgeIndex>>,
    cursor: Vec<usize>,
    edge_used: FixedBitSet,
    res_out: Vec<usize>,
    res_in: Vec<usize>,
}

impl WalkPacker<'_> {
    /// Walks from `start` along unused edges until stuck, marking the edges used. Returns the
    /// walk and whether it closed back on `start`; `None` if no step could be taken.
    fn walk_from(&mut self, start: NodeIndex) -> Option<(Walk, bool)> {
        let mut vertices = vec![start];
        let mut edges = Vec::new();
        let mut cur = start;
        loop {
            // The cursor only ever moves forward: used edges stay used.
            let candidates = &self.out_edges[cur.index()];
            let cursor = &mut self.cursor[cur.index()];
            while *cursor < candidates.len() && self.edge_used.contains(candidates[*cursor].index())
            {
                *cursor += 1;
            }
            if *cursor == candidates.len() {
                break;
            }
            let eid = candidates[*cursor];
            self.edge_used.insert(eid.index());
            let (_, target) = self.network.edge_endpoints(eid);
            self.res_out[cur.index()] -= 1;
            self.res_in[target.index()] -= 1;
            edges.push(eid);
            vertices.push(target);
            cur = target;
        }

        if edges.is_empty() {
            return None;
        }
        if cur == start {
            vertices.pop();
            Some((Walk::new(vertices, edges), true))
        } else {
            Some((Walk::new(vertices, edges), false))
        }
    }
}

/// Splices closed walks into walks they share a vertex with, repeating until a full pass makes
/// no progress. Each round first tries the open walks in list order, then earlier surviving
/// closed walks.
fn merge_closed_walks(opens: &mut [Walk], closeds: Vec<Walk>) -> Vec<Walk> {
    let mut pending = closeds;
    loop {
        let mut progress = false;

        let mut keep = Vec::new();
        for walk in pending {
            let target = opens
                .iter()
                .enumerate()
                .find_map(|(i, open)| shared_vertex(open, &walk).map(|(pos, cpos)| (i, pos, cpos)));
            match target {
                Some((i, pos, cpos)) => {
                    splice(&mut opens[i], pos, &walk, cpos);
                    progress = true;
                }
                None => keep.push(walk),
            }
        }

        let mut survivors: Vec<Walk> = Vec::new();
        for walk in keep {
            let target = survivors
                .iter()
                .enumerate()
                .find_map(|(i, host)| shared_vertex(host, &walk).map(|(pos, cpos)| (i, pos, cpos)));
            match target {
                Some((i, pos, cpos)) => {
                    splice(&mut survivors[i], pos, &walk, cpos);
                    progress = true;
                }
                None => survivors.push(walk),
            }
        }

        pending = survivors;
        if !progress {
            return pending;
        }
    }
}

/// Returns the first position pair `(host, cycle)` of a vertex the two walks share.
fn shared_vertex(host: &Walk, cycle: &Walk) -> Option<(usize, usize)> {
    for (pos, &v) in host.vertices.iter().enumerate() {
        if let Some(cpos) = cycle.vertices.iter().position(|&w| w == v) {
            return Some((pos, cpos));
        }
    }
    None
}

/// Splices the closed walk `cycle` into `host` at the shared vertex `host.vertices[pos] ==
/// cycle.vertices[cpos]`. The cycle is rotated to start at the shared vertex and inserted as a
/// detour; works for open and closed hosts alike.
fn splice(host: &mut Walk, pos: usize, cycle: &Walk, cpos: usize) {
    let len = cycle.vertices.len();
    let rotated_vertices = || cycle.vertices[cpos..].iter().chain(&cycle.vertices[..cpos]);
    let rotated_edges = cycle.edges[cpos..].iter().chain(&cycle.edges[..cpos]);

    let mut vertices = Vec::with_capacity(host.vertices.len() + len);
    vertices.extend_from_slice(&host.vertices[..=pos]);
    vertices.extend(rotated_vertices().skip(1));
    vertices.push(host.vertices[pos]);
    vertices.extend_from_slice(&host.vertices[pos + 1..]);

    let mut edges = Vec::with_capacity(host.edges.len() + len);
    edges.extend_from_slice(&host.edges[..pos]);
    edges.extend(rotated_edges);
    edges.extend_from_slice(&host.edges[pos..]);

    host.vertices = vertices;
    host.edges = edges;
}
