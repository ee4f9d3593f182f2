// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Find driver nodes and control paths in directed networks.
//!
//! `steerage` analyzes the structural controllability of a directed network: the smallest set of
//! *driver nodes* to which independent input signals must be attached so that the whole network
//! can be steered, and the *control paths* those signals travel along. Two dynamical models are
//! supported:
//!
//! * the nodal dynamics of Liu, Slotine and Barabási, solved through maximum bipartite matching
//!   ([`LiuSolver`]);
//! * the switchboard (edge) dynamics of Ruths and Ruths, solved through degree imbalance
//!   ([`SwitchboardSolver`]).
//!
//! Both solvers also classify every edge by what its removal would do to the number of drivers
//! (see [`EdgeClass`]), and [`significance`] compares the observed controllability against
//! random-network null models.
//!
//! # Examples
//!
//! Drivers and control paths of a directed path:
//!
//! ```
//! use steerage::{ControllabilityModel, Model, Network};
//!
//! let network = Network::from_edges(4, [(0, 1), (1, 2), (2, 3)]);
//! let mut solver = Model::Liu.solver(&network);
//! solver.calculate().unwrap();
//!
//! // Only the head of the path needs an input signal...
//! let drivers = solver.driver_nodes().unwrap();
//! assert_eq!(drivers.len(), 1);
//! assert_eq!(drivers[0].index(), 0);
//!
//! // ...and one stem carries it to every other vertex.
//! let paths = solver.control_paths().unwrap();
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].kind_name(), "stem");
//! ```

#![warn(missing_docs)]

mod analysis;
pub mod errors;
pub mod generate;
pub mod io;
mod matching;
mod network;
mod null_model;
mod paths;
pub(crate) mod petgraph_support;
mod solver;
#[cfg(test)]
mod unit_tests;

pub use analysis::{run_analysis, AnalysisMode, AnalysisOptions, Annotations, EdgeAnnotation};
pub use errors::Error;
pub use matching::DirectedMatching;
pub use network::Network;
pub use null_model::{significance, SignificanceReport, DEFAULT_TRIALS};
pub use paths::{Bud, ControlPath, ControlPathDisplay, Stem, Walk};
pub use solver::{
    ControllabilityMeasure, ControllabilityModel, EdgeClass, LiuSolver, Model, SwitchboardSolver,
};

// Public re-exports for upstream types used in APIs. The no_inline ensures that they show up as
// re-exports in documentation.
#[doc(no_inline)]
pub use petgraph::graph::{EdgeIndex, NodeIndex};
