// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::analysis::{run_analysis, AnalysisMode, AnalysisOptions};
use crate::errors::Error;
use crate::io::Format;
use crate::network::Network;
use crate::solver::Model;
use pretty_assertions::assert_eq;

fn run(network: &Network, options: &AnalysisOptions) -> String {
    let mut out = Vec::new();
    run_analysis(network, options, &mut out).expect("analysis succeeds");
    String::from_utf8(out).expect("output is UTF-8")
}

#[test]
fn driver_nodes_mode_lists_labels() {
    let network = Network::from_edges(4, [(0, 1), (0, 2), (0, 3)]);
    let options = AnalysisOptions::new(Model::Switchboard, AnalysisMode::DriverNodes);
    assert_eq!(run(&network, &options), "0\n");
}

#[test]
fn driver_nodes_mode_uses_names_when_present() {
    let network =
        crate::io::read_network("hub spoke\n".as_bytes(), Format::Ncol).unwrap();
    let options = AnalysisOptions::new(Model::Liu, AnalysisMode::DriverNodes);
    assert_eq!(run(&network, &options), "hub\n");
}

#[test]
fn control_paths_mode_prints_one_path_per_line() {
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    let options = AnalysisOptions::new(Model::Liu, AnalysisMode::ControlPaths);
    assert_eq!(run(&network, &options), "stem: 0 -> 1 -> 2 -> 3\n");
}

#[test]
fn control_paths_mode_shows_cycle_closure() {
    let network = Network::from_edges(3, [(0, 1), (1, 2), (2, 0)]);

    let liu = AnalysisOptions::new(Model::Liu, AnalysisMode::ControlPaths);
    assert_eq!(run(&network, &liu), "bud: 0 -> 1 -> 2 -> 0\n");

    let switchboard = AnalysisOptions::new(Model::Switchboard, AnalysisMode::ControlPaths);
    assert_eq!(run(&network, &switchboard), "closed walk: 0 -> 1 -> 2 -> 0\n");
}

#[test]
fn statistics_mode_reports_counts_then_fractions() {
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);

    let liu = AnalysisOptions::new(Model::Liu, AnalysisMode::Statistics);
    assert_eq!(run(&network, &liu), "1 0 0 0 3\n0.25 0 0 0 1\n");

    let switchboard = AnalysisOptions::new(Model::Switchboard, AnalysisMode::Statistics);
    assert_eq!(
        run(&network, &switchboard),
        "1 0 2 0 1\n0.25 0 0.6666666666666666 0 0.3333333333333333\n"
    );
}

#[test]
fn statistics_mode_survives_an_empty_network() {
    let network = Network::new();
    let options = AnalysisOptions::new(Model::Liu, AnalysisMode::Statistics);
    assert_eq!(run(&network, &options), "0 0 0 0 0\n0 0 0 0 0\n");
}

#[test]
fn significance_mode_writes_labelled_rows() {
    let network = Network::from_edges(10, []);
    let mut options = AnalysisOptions::new(Model::Liu, AnalysisMode::Significance);
    options.trials = 2;
    options.seed = Some(1);
    assert_eq!(
        run(&network, &options),
        "Observed\t1\nER\t1\nConfiguration\t1\nConfiguration_no_joint\t1\n"
    );
}

#[test]
fn graph_mode_writes_annotated_gml() {
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    let mut options = AnalysisOptions::new(Model::Liu, AnalysisMode::Graph);
    options.graph_format = Format::Gml;
    let expected = "\
graph [
  directed 1
  node [
    id 0
    is_driver 1
  ]
  node [
    id 1
    is_driver 0
  ]
  node [
    id 2
    is_driver 0
  ]
  node [
    id 3
    is_driver 0
  ]
  edge [
    source 0
    target 1
    path_type \"stem\"
    path_indices 0
    path_order 0
    edge_class \"critical\"
  ]
  edge [
    source 1
    target 2
    path_type \"stem\"
    path_indices 0
    path_order 1
    edge_class \"critical\"
  ]
  edge [
    source 2
    target 3
    path_type \"stem\"
    path_indices 0
    path_order 2
    edge_class \"critical\"
  ]
]
";
    assert_eq!(run(&network, &options), expected);
}

#[test]
fn graph_mode_writes_annotated_graphml() {
    let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
    let options = AnalysisOptions::new(Model::Liu, AnalysisMode::Graph);
    let output = run(&network, &options);
    assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(output.contains(r#"<key id="edge_class" for="edge" attr.name="edge_class" attr.type="string"/>"#));
    assert!(output.contains(r#"<data key="is_driver">true</data>"#));
    assert!(output.contains(r#"<data key="edge_class">critical</data>"#));
    assert!(output.contains(r#"<edge source="n0" target="n1">"#));
    assert!(output.ends_with("</graphml>\n"));
}

#[test]
fn annotated_output_requires_an_annotating_format() {
    let network = Network::from_edges(2, [(0, 1)]);
    let mut options = AnalysisOptions::new(Model::Liu, AnalysisMode::Graph);
    options.graph_format = Format::EdgeList;
    let mut out = Vec::new();
    let err = run_analysis(&network, &options, &mut out).unwrap_err();
    assert!(matches!(err, Error::UnsupportedOperation(_)));
}

#[test]
fn mode_names_round_trip() {
    for mode in [
        AnalysisMode::DriverNodes,
        AnalysisMode::ControlPaths,
        AnalysisMode::Statistics,
        AnalysisMode::Significance,
        AnalysisMode::Graph,
    ] {
        assert_eq!(mode.to_string().parse::<AnalysisMode>().unwrap(), mode);
    }
    assert!("everything".parse::<AnalysisMode>().is_err());
}

#[test]
fn model_names_round_trip() {
    for model in [Model::Liu, Model::Switchboard] {
        assert_eq!(model.to_string().parse::<Model>().unwrap(), model);
    }
    assert!("kalman".parse::<Model>().is_err());
}
