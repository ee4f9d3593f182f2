// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::network::Network;
use crate::solver::{ControllabilityModel, EdgeClass, LiuSolver, SwitchboardSolver};
use pretty_assertions::assert_eq;

fn liu_classes(network: &Network) -> Vec<EdgeClass> {
    let mut solver = LiuSolver::new(network);
    solver.calculate().expect("calculate succeeds");
    solver.edge_classes().expect("classification succeeds")
}

fn switchboard_classes(network: &Network) -> Vec<EdgeClass> {
    let solver = SwitchboardSolver::new(network);
    solver.edge_classes().expect("classification succeeds")
}

fn count(classes: &[EdgeClass], class: EdgeClass) -> usize {
    classes.iter().filter(|&&c| c == class).count()
}

#[test]
fn liu_path_edges_are_critical() {
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    assert_eq!(
        liu_classes(&network),
        vec![EdgeClass::Critical, EdgeClass::Critical, EdgeClass::Critical]
    );
}

#[test]
fn liu_cycle_edges_are_critical() {
    // The cycle's perfect matching is unique, so every edge is forced.
    let network = Network::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
    assert_eq!(liu_classes(&network), vec![EdgeClass::Critical; 3]);
}

#[test]
fn liu_interchangeable_edges_are_ordinary() {
    // Either of the two edges into 2 can carry the matching.
    let network = Network::from_edges(3, [(0, 2), (1, 2)]);
    assert_eq!(
        liu_classes(&network),
        vec![EdgeClass::Ordinary, EdgeClass::Ordinary]
    );
}

#[test]
fn liu_useless_edge_is_redundant() {
    // (1, 2) is in no maximum matching: 1 must match 3, and 2 is then matched by 0.
    let network = Network::from_edges(4, [(0, 2), (1, 2), (1, 3)]);
    let classes = liu_classes(&network);
    assert_eq!(classes[1], EdgeClass::Redundant);
    assert_eq!(classes[0], EdgeClass::Critical);
    assert_eq!(classes[2], EdgeClass::Critical);
}

#[test]
fn liu_complete_bipartite_matches_are_critical() {
    let network = Network::from_edges(4, [(0, 2), (0, 3), (1, 2), (1, 3)]);
    let classes = liu_classes(&network);
    assert_eq!(count(&classes, EdgeClass::Critical), 2);
    assert_eq!(count(&classes, EdgeClass::Ordinary), 2);
}

#[test]
fn liu_parallel_copy_is_ordinary() {
    let network = Network::from_edges(2, [(0, 1), (0, 1)]);
    let classes = liu_classes(&network);
    assert_eq!(classes[0], EdgeClass::Critical);
    assert_eq!(classes[1], EdgeClass::Ordinary);
}

#[test]
fn liu_every_edge_gets_exactly_one_class() {
    let network = Network::from_edges(6, [(0, 1), (1, 2), (2, 0), (3, 1), (3, 4), (4, 5), (5, 5)]);
    let classes = liu_classes(&network);
    assert_eq!(classes.len(), network.edge_count());
}

#[test]
fn switchboard_path_middle_edge_is_critical() {
    // Removing (1, 2) makes 2 divergent; removing an end edge shifts a driver without creating
    // one.
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    assert_eq!(
        switchboard_classes(&network),
        vec![EdgeClass::Redundant, EdgeClass::Critical, EdgeClass::Redundant]
    );
}

#[test]
fn switchboard_cycle_edges_are_redundant() {
    // Removal trades the balanced-component driver for a divergence driver.
    let network = Network::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
    assert_eq!(switchboard_classes(&network), vec![EdgeClass::Redundant; 3]);
}

#[test]
fn switchboard_sole_outgoing_edge_is_distinguished() {
    // Removing (0, 1) erases the divergence of 0 and with it a driver.
    let network = Network::from_edges(3, [(0, 1), (2, 1)]);
    assert_eq!(
        switchboard_classes(&network),
        vec![EdgeClass::Distinguished, EdgeClass::Distinguished]
    );
}

#[test]
fn switchboard_lone_self_loop_is_distinguished() {
    let network = Network::from_edges(1, [(0, 0)]);
    assert_eq!(
        switchboard_classes(&network),
        vec![EdgeClass::Distinguished]
    );
}

#[test]
fn switchboard_self_loop_with_other_edges_is_redundant() {
    let network = Network::from_edges(2, [(0, 0), (0, 1), (1, 0)]);
    assert_eq!(switchboard_classes(&network)[0], EdgeClass::Redundant);
}

#[test]
fn switchboard_edge_completing_a_balanced_component_is_critical() {
    // Removing either (2, 0) copy balances both endpoints and completes a balanced component, so
    // those edges score positive. (0, 1) is critical the plain way: its removal makes 1
    // divergent.
    let network = Network::from_edges(3, [(0, 1), (1, 2), (2, 0), (2, 0)]);
    assert_eq!(
        switchboard_classes(&network),
        vec![
            EdgeClass::Critical,
            EdgeClass::Redundant,
            EdgeClass::Critical,
            EdgeClass::Critical,
        ]
    );
}
