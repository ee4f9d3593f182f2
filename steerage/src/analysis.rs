// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The analysis front door: run one model in one mode and write the result.
//!
//! Five modes are supported: listing driver nodes, listing control paths, summary statistics,
//! null-model significance testing, and annotated graph output. This is the surface the
//! command-line front-end drives.

use crate::errors::Error;
use crate::io::{self, Format};
use crate::network::Network;
use crate::null_model::{significance, DEFAULT_TRIALS};
use crate::paths::ControlPath;
use crate::solver::{EdgeClass, Model};
use log::info;
use petgraph::graph::NodeIndex;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// What to compute and report.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AnalysisMode {
    /// List the driver nodes, one per line.
    DriverNodes,
    /// List the control paths, one per line.
    ControlPaths,
    /// Report counts and fractions of drivers and edge classes.
    Statistics,
    /// Compare the observed controllability against null models.
    Significance,
    /// Write the input graph, annotated with the analysis results.
    Graph,
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalysisMode::DriverNodes => "driver_nodes",
            AnalysisMode::ControlPaths => "control_paths",
            AnalysisMode::Statistics => "statistics",
            AnalysisMode::Significance => "significance",
            AnalysisMode::Graph => "graph",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for AnalysisMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driver_nodes" => Ok(AnalysisMode::DriverNodes),
            "control_paths" => Ok(AnalysisMode::ControlPaths),
            "statistics" => Ok(AnalysisMode::Statistics),
            "significance" => Ok(AnalysisMode::Significance),
            "graph" => Ok(AnalysisMode::Graph),
            other => Err(Error::InvalidParameter(format!(
                "unknown analysis mode '{}'",
                other
            ))),
        }
    }
}

/// Options for [`run_analysis`].
#[derive(Clone, Copy, Debug)]
pub struct AnalysisOptions {
    /// The controllability model to analyze under.
    pub model: Model,
    /// What to compute and report.
    pub mode: AnalysisMode,
    /// Trials per ensemble in significance mode.
    pub trials: usize,
    /// RNG seed for significance mode; `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Output format for graph mode; must be GraphML or GML.
    pub graph_format: Format,
}

impl AnalysisOptions {
    /// Creates options with the conventional defaults: 100 trials, entropy seeding, GraphML.
    pub fn new(model: Model, mode: AnalysisMode) -> Self {
        Self {
            model,
            mode,
            trials: DEFAULT_TRIALS,
            seed: None,
            graph_format: Format::GraphML,
        }
    }
}

/// Analysis results attached to the vertices and edges of a network, ready for annotated output.
#[derive(Clone, Debug)]
pub struct Annotations {
    /// Whether each vertex is a driver node, indexed by vertex.
    pub is_driver: Vec<bool>,
    /// Per-edge annotations, indexed by edge.
    pub edges: Vec<EdgeAnnotation>,
}

/// The annotations carried by a single edge.
#[derive(Clone, Debug)]
pub struct EdgeAnnotation {
    /// The type of the control path this edge lies on, if any.
    pub path_type: Option<&'static str>,
    /// The index of that path in the solver's path list.
    pub path_index: Option<usize>,
    /// The 0-based position of this edge within that path.
    pub path_order: Option<usize>,
    /// How this edge's removal would change the number of drivers.
    pub edge_class: EdgeClass,
}

impl Annotations {
    /// Assembles annotations from solver results.
    pub fn new(
        network: &Network,
        drivers: &[NodeIndex],
        paths: &[ControlPath],
        classes: &[EdgeClass],
    ) -> Self {
        let mut is_driver = vec![false; network.vertex_count()];
        for &d in drivers {
            is_driver[d.index()] = true;
        }
        let mut edges: Vec<EdgeAnnotation> = classes
            .iter()
            .map(|&edge_class| EdgeAnnotation {
                path_type: None,
                path_index: None,
                path_order: None,
                edge_class,
            })
            .collect();
        for (path_index, path) in paths.iter().enumerate() {
            for (path_order, &eid) in path.edges().iter().enumerate() {
                let edge = &mut edges[eid.index()];
                edge.path_type = Some(path.kind_name());
                edge.path_index = Some(path_index);
                edge.path_order = Some(path_order);
            }
        }
        Self { is_driver, edges }
    }
}

/// Runs one analysis over `network` and writes the result to `out`.
pub fn run_analysis(
    network: &Network,
    options: &AnalysisOptions,
    out: &mut dyn Write,
) -> Result<(), Error> {
    match options.mode {
        AnalysisMode::DriverNodes => {
            let mut solver = options.model.solver(network);
            info!("calculating driver nodes ({} model)", options.model);
            solver.calculate()?;
            for &d in solver.driver_nodes()? {
                writeln!(out, "{}", network.vertex_label(d)).map_err(Error::OutputError)?;
            }
        }
        AnalysisMode::ControlPaths => {
            let mut solver = options.model.solver(network);
            info!("calculating control paths ({} model)", options.model);
            solver.calculate()?;
            for path in solver.control_paths()? {
                writeln!(out, "{}", path.display(network)).map_err(Error::OutputError)?;
            }
        }
        AnalysisMode::Statistics => {
            let mut solver = options.model.solver(network);
            info!("calculating statistics ({} model)", options.model);
            solver.calculate()?;
            let drivers = solver.driver_nodes()?.len();
            let classes = solver.edge_classes()?;
            let count =
                |class: EdgeClass| classes.iter().filter(|&&c| c == class).count();
            let (distinguished, redundant, ordinary, critical) = (
                count(EdgeClass::Distinguished),
                count(EdgeClass::Redundant),
                count(EdgeClass::Ordinary),
                count(EdgeClass::Critical),
            );
            writeln!(
                out,
                "{} {} {} {} {}",
                drivers, distinguished, redundant, ordinary, critical
            )
            .map_err(Error::OutputError)?;

            let vertex_fraction = |count: usize| match network.vertex_count() {
                0 => 0.0,
                n => count as f64 / n as f64,
            };
            let edge_fraction = |count: usize| match network.edge_count() {
                0 => 0.0,
                m => count as f64 / m as f64,
            };
            writeln!(
                out,
                "{} {} {} {} {}",
                vertex_fraction(drivers),
                edge_fraction(distinguished),
                edge_fraction(redundant),
                edge_fraction(ordinary),
                edge_fraction(critical)
            )
            .map_err(Error::OutputError)?;
        }
        AnalysisMode::Significance => {
            info!("testing null models ({} model)", options.model);
            let report = significance(network, options.model, options.trials, options.seed)?;
            for (label, fraction) in report.rows() {
                writeln!(out, "{}\t{}", label, fraction).map_err(Error::OutputError)?;
            }
        }
        AnalysisMode::Graph => {
            let mut solver = options.model.solver(network);
            info!("calculating graph annotations ({} model)", options.model);
            solver.calculate()?;
            let annotations = Annotations::new(
                network,
                solver.driver_nodes()?,
                solver.control_paths()?,
                &solver.edge_classes()?,
            );
            io::write_annotated(network, Some(&annotations), options.graph_format, out)?;
        }
    }
    Ok(())
}
