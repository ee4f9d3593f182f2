// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random network generators used by the null-model comparison.
//!
//! Both generators take the RNG as an argument so that callers control seeding; given the same
//! RNG state they produce the same network, edges in the same order.

use crate::errors::Error;
use crate::network::Network;
use indexmap::IndexSet;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generates an Erdős–Rényi `G(n, m)` network: `m` distinct edges drawn uniformly at random,
/// self-loops excluded.
///
/// With `directed` unset, `m` unordered pairs are drawn and each is inserted as a pair of
/// opposite arcs (the analysis networks are directed by contract).
pub fn erdos_renyi_gnm<R: Rng + ?Sized>(
    n: usize,
    m: usize,
    directed: bool,
    rng: &mut R,
) -> Result<Network, Error> {
    let max_edges = if directed {
        n.saturating_mul(n.saturating_sub(1))
    } else {
        n.saturating_mul(n.saturating_sub(1)) / 2
    };
    if m > max_edges {
        return Err(Error::InvalidParameter(format!(
            "cannot place {} edges on {} vertices (at most {})",
            m, n, max_edges
        )));
    }

    // Rejection sampling into an insertion-ordered set keeps the edge order deterministic for a
    // given RNG state.
    let mut edges: IndexSet<(usize, usize)> = IndexSet::with_capacity(m);
    while edges.len() < m {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u == v {
            continue;
        }
        let pair = if directed || u < v { (u, v) } else { (v, u) };
        edges.insert(pair);
    }

    let mut network = Network::new();
    network.add_vertices(n);
    for (u, v) in edges {
        network.add_edges([(u, v)]);
        if !directed {
            network.add_edges([(v, u)]);
        }
    }
    Ok(network)
}

/// Generates a directed configuration-model network realizing the given out- and in-degree
/// sequences by uniform stub matching. Self-loops and parallel edges are permitted.
pub fn degree_sequence_game<R: Rng + ?Sized>(
    out_deg: &[usize],
    in_deg: &[usize],
    rng: &mut R,
) -> Result<Network, Error> {
    if out_deg.len() != in_deg.len() {
        return Err(Error::InvalidParameter(format!(
            "degree sequences differ in length ({} vs {})",
            out_deg.len(),
            in_deg.len()
        )));
    }
    let out_sum: usize = out_deg.iter().sum();
    let in_sum: usize = in_deg.iter().sum();
    if out_sum != in_sum {
        return Err(Error::InvalidParameter(format!(
            "degree sequences have unequal sums ({} vs {})",
            out_sum, in_sum
        )));
    }

    let mut out_stubs = Vec::with_capacity(out_sum);
    let mut in_stubs = Vec::with_capacity(in_sum);
    for (v, (&out, &inc)) in out_deg.iter().zip(in_deg).enumerate() {
        out_stubs.extend(std::iter::repeat(v).take(out));
        in_stubs.extend(std::iter::repeat(v).take(inc));
    }
    in_stubs.shuffle(rng);

    let mut network = Network::new();
    network.add_vertices(out_deg.len());
    network.add_edges(out_stubs.into_iter().zip(in_stubs));
    Ok(network)
}
