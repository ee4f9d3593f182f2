// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property tests for the invariants both solvers promise on arbitrary networks.

use crate::network::Network;
use crate::solver::{
    ControllabilityMeasure, ControllabilityModel, LiuSolver, SwitchboardSolver,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

fn network_strategy() -> impl Strategy<Value = Network> {
    (1usize..10).prop_flat_map(|n| {
        proptest::collection::vec((0..n, 0..n), 0..30)
            .prop_map(move |edges| Network::from_edges(n, edges))
    })
}

/// Consecutive vertices of every path are joined by exactly the edges the path lists, wrapping
/// around for cyclic paths.
fn assert_walk_consistency(
    network: &Network,
    solver: &dyn ControllabilityModel,
) -> Result<(), TestCaseError> {
    for path in solver.control_paths().expect("calculated") {
        let vertices = path.vertices();
        let edges = path.edges();
        if path.is_cyclic() {
            prop_assert_eq!(edges.len(), vertices.len());
        } else {
            prop_assert_eq!(edges.len() + 1, vertices.len());
        }
        for (i, &e) in edges.iter().enumerate() {
            let (source, target) = network.edge_endpoints(e);
            prop_assert_eq!(source, vertices[i]);
            let expected = if i + 1 < vertices.len() {
                vertices[i + 1]
            } else {
                vertices[0]
            };
            prop_assert_eq!(target, expected);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn liu_invariants(network in network_strategy()) {
        let mut solver = LiuSolver::new(&network);
        solver.calculate().unwrap();

        // The matching selects real edges and stays consistent in both directions.
        let matching = solver.matching().unwrap();
        for (u, v) in matching.pairs() {
            prop_assert!(network.eid(u, v).is_some());
            prop_assert!(matching.match_out(u).contains(&v));
            prop_assert!(matching.match_out(u).len() <= 1);
        }

        // Stems and buds partition the vertex set.
        let mut seen = vec![0usize; network.vertex_count()];
        for path in solver.control_paths().unwrap() {
            for &v in path.vertices() {
                seen[v.index()] += 1;
            }
        }
        prop_assert!(seen.iter().all(|&count| count == 1));

        // One driver per independent input signal.
        let signals = solver
            .control_paths()
            .unwrap()
            .iter()
            .filter(|path| path.needs_input_signal())
            .count();
        prop_assert_eq!(solver.driver_nodes().unwrap().len(), signals);

        assert_walk_consistency(&network, &solver)?;

        // Every edge gets exactly one class.
        let classes = solver.edge_classes().unwrap();
        prop_assert_eq!(classes.len(), network.edge_count());

        // A second run reproduces the result.
        let drivers = solver.driver_nodes().unwrap().to_vec();
        let paths = solver.control_paths().unwrap().to_vec();
        solver.calculate().unwrap();
        prop_assert_eq!(&drivers, solver.driver_nodes().unwrap());
        prop_assert_eq!(&paths, solver.control_paths().unwrap());
    }

    #[test]
    fn switchboard_invariants(network in network_strategy()) {
        let mut solver = SwitchboardSolver::new(&network);
        solver.calculate().unwrap();

        // The walks cover every edge exactly once.
        let mut used = vec![0usize; network.edge_count()];
        for path in solver.control_paths().unwrap() {
            for &e in path.edges() {
                used[e.index()] += 1;
            }
        }
        prop_assert!(used.iter().all(|&count| count == 1));

        assert_walk_consistency(&network, &solver)?;

        // Every edge gets exactly one class.
        let classes = solver.edge_classes().unwrap();
        prop_assert_eq!(classes.len(), network.edge_count());

        // The node measure is exactly drivers over vertices.
        let mut node_solver = SwitchboardSolver::new(&network);
        node_solver.set_measure(ControllabilityMeasure::Nodes);
        node_solver.calculate().unwrap();
        let expected = node_solver.driver_nodes().unwrap().len() as f64
            / network.vertex_count() as f64;
        prop_assert_eq!(node_solver.controllability().unwrap(), expected);

        // A second run reproduces the result.
        let drivers = solver.driver_nodes().unwrap().to_vec();
        let paths = solver.control_paths().unwrap().to_vec();
        solver.calculate().unwrap();
        prop_assert_eq!(&drivers, solver.driver_nodes().unwrap());
        prop_assert_eq!(&paths, solver.control_paths().unwrap());
    }
}
