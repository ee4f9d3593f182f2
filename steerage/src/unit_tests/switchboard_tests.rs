// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::indices;
use crate::network::Network;
use crate::paths::ControlPath;
use crate::solver::{ControllabilityMeasure, ControllabilityModel, SwitchboardSolver};
use pretty_assertions::assert_eq;

fn calculated(network: &Network) -> SwitchboardSolver<'_> {
    let mut solver = SwitchboardSolver::new(network);
    solver.calculate().expect("calculate succeeds");
    solver
}

/// Every edge of the network is covered by exactly one walk.
fn assert_edge_cover(network: &Network, solver: &SwitchboardSolver<'_>) {
    let mut used = vec![0usize; network.edge_count()];
    for path in solver.control_paths().expect("calculated") {
        for &e in path.edges() {
            used[e.index()] += 1;
        }
    }
    assert!(
        used.iter().all(|&count| count == 1),
        "edge cover counts: {:?}",
        used
    );
}

#[test]
fn results_require_calculate() {
    let network = Network::from_edges(2, [(0, 1)]);
    let solver = SwitchboardSolver::new(&network);
    assert!(solver.driver_nodes().is_err());
    assert!(solver.control_paths().is_err());
    assert!(solver.controllability().is_err());
}

#[test]
fn directed_path_is_one_open_walk() {
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    let solver = calculated(&network);

    assert_eq!(indices(solver.driver_nodes().unwrap()), vec![0]);
    let paths = solver.control_paths().unwrap();
    assert_eq!(paths.len(), 1);
    match &paths[0] {
        ControlPath::OpenWalk(walk) => assert_eq!(indices(&walk.vertices), vec![0, 1, 2, 3]),
        other => panic!("expected an open walk, got {:?}", other),
    }
    assert_edge_cover(&network, &solver);

    // One open walk, no balanced components, three edges.
    assert_eq!(solver.controllability().unwrap(), 1.0 / 3.0);
}

#[test]
fn directed_cycle_is_one_closed_walk() {
    let network = Network::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
    let solver = calculated(&network);

    // Every vertex is balanced, so the lone balanced component elects its lowest vertex.
    assert_eq!(indices(solver.driver_nodes().unwrap()), vec![0]);
    assert_eq!(solver.balanced_component_count().unwrap(), 1);

    let paths = solver.control_paths().unwrap();
    assert_eq!(paths.len(), 1);
    match &paths[0] {
        ControlPath::ClosedWalk(walk) => assert_eq!(indices(&walk.vertices), vec![0, 1, 2]),
        other => panic!("expected a closed walk, got {:?}", other),
    }
    assert!(!paths[0].needs_input_signal());
    assert_edge_cover(&network, &solver);
    assert_eq!(solver.controllability().unwrap(), 1.0 / 3.0);
}

#[test]
fn star_out_hub_is_three_open_walks() {
    let network = Network::from_edges(4, [(0, 1), (0, 2), (0, 3)]);
    let solver = calculated(&network);

    assert_eq!(indices(solver.driver_nodes().unwrap()), vec![0]);
    let paths = solver.control_paths().unwrap();
    assert_eq!(paths.len(), 3);
    assert_eq!(solver.open_walk_count().unwrap(), 3);
    for (walk, leaf) in paths.iter().zip([1, 2, 3]) {
        match walk {
            ControlPath::OpenWalk(walk) => assert_eq!(indices(&walk.vertices), vec![0, leaf]),
            other => panic!("expected an open walk, got {:?}", other),
        }
    }
    assert_edge_cover(&network, &solver);
    assert_eq!(solver.controllability().unwrap(), 1.0);
}

#[test]
fn balanced_component_and_divergent_component() {
    // Cycle A (0, 1) is balanced; component B has the divergent vertex 4.
    let network = Network::from_edges(5, [(0, 1), (1, 0), (2, 3), (3, 2), (4, 2)]);
    let solver = calculated(&network);

    assert_eq!(indices(solver.driver_nodes().unwrap()), vec![0, 4]);
    assert_eq!(solver.balanced_component_count().unwrap(), 1);
    assert_eq!(solver.open_walk_count().unwrap(), 1);

    let paths = solver.control_paths().unwrap();
    assert_eq!(paths.len(), 2);
    match &paths[0] {
        ControlPath::OpenWalk(walk) => assert_eq!(indices(&walk.vertices), vec![4, 2, 3, 2]),
        other => panic!("expected an open walk, got {:?}", other),
    }
    match &paths[1] {
        ControlPath::ClosedWalk(walk) => assert_eq!(indices(&walk.vertices), vec![0, 1]),
        other => panic!("expected a closed walk, got {:?}", other),
    }
    assert_edge_cover(&network, &solver);

    // One open walk plus one balanced component over five edges.
    assert_eq!(solver.controllability().unwrap(), 2.0 / 5.0);
}

#[test]
fn closed_walk_merges_into_an_open_walk() {
    // The walk from 0 exhausts 1's lowest out-edge first, leaving the detour 1 -> 3 -> 1 to turn
    // up as a closed walk in phase 2; merging splices it back in.
    let network = Network::from_edges(4, [(0, 1), (1, 2), (1, 3), (3, 1)]);
    let solver = calculated(&network);

    let paths = solver.control_paths().unwrap();
    assert_eq!(paths.len(), 1);
    match &paths[0] {
        ControlPath::OpenWalk(walk) => {
            assert_eq!(indices(&walk.vertices), vec![0, 1, 3, 1, 2]);
        }
        other => panic!("expected an open walk, got {:?}", other),
    }
    assert_edge_cover(&network, &solver);
    assert_eq!(solver.open_walk_count().unwrap(), 1);
}

#[test]
fn disjoint_closed_walks_merge_with_each_other() {
    // Two edge-disjoint cycles sharing vertex 1 come out of phase 2 separately and merge.
    let network = Network::from_edges(4, [(0, 1), (1, 0), (1, 2), (2, 3), (3, 1)]);
    let solver = calculated(&network);

    let paths = solver.control_paths().unwrap();
    assert_eq!(paths.len(), 1);
    match &paths[0] {
        ControlPath::ClosedWalk(walk) => {
            assert_eq!(walk.vertices.len(), walk.edges.len());
            assert_eq!(walk.edges.len(), 5);
        }
        other => panic!("expected a closed walk, got {:?}", other),
    }
    assert_edge_cover(&network, &solver);
}

#[test]
fn node_measure_divides_by_vertex_count() {
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    let mut solver = SwitchboardSolver::new(&network);
    solver.set_measure(ControllabilityMeasure::Nodes);
    solver.calculate().unwrap();
    assert_eq!(solver.controllability().unwrap(), 0.25);
}

#[test]
fn empty_network_yields_nothing() {
    let network = Network::new();
    let solver = calculated(&network);
    assert!(solver.driver_nodes().unwrap().is_empty());
    assert!(solver.control_paths().unwrap().is_empty());
    assert_eq!(solver.controllability().unwrap(), 0.0);
}

#[test]
fn edgeless_vertices_need_no_drivers() {
    let network = Network::from_edges(3, []);
    let solver = calculated(&network);
    assert!(solver.driver_nodes().unwrap().is_empty());
    assert_eq!(solver.controllability().unwrap(), 0.0);
}

#[test]
fn calculate_is_idempotent() {
    let network = Network::from_edges(5, [(0, 1), (1, 2), (2, 0), (0, 3), (3, 4)]);
    let mut solver = SwitchboardSolver::new(&network);
    solver.calculate().unwrap();
    let drivers = solver.driver_nodes().unwrap().to_vec();
    let paths = solver.control_paths().unwrap().to_vec();

    solver.calculate().unwrap();
    assert_eq!(drivers, solver.driver_nodes().unwrap().to_vec());
    assert_eq!(paths, solver.control_paths().unwrap().to_vec());
}

#[test]
fn clone_keeps_the_measure_but_not_the_results() {
    let network = Network::from_edges(2, [(0, 1)]);
    let mut solver = SwitchboardSolver::new(&network);
    solver.set_measure(ControllabilityMeasure::Nodes);
    solver.calculate().unwrap();

    let mut copy = solver.clone();
    assert_eq!(copy.measure(), ControllabilityMeasure::Nodes);
    assert!(copy.driver_nodes().is_err(), "clones start stateless");
    copy.calculate().unwrap();
    assert_eq!(
        solver.controllability().unwrap(),
        copy.controllability().unwrap()
    );
}
