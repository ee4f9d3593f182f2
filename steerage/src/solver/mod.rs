// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The controllability solvers.
//!
//! Two dynamical models are supported: the maximum-matching construction of Liu et al.
//! ([`LiuSolver`]) and the switchboard dynamics of Ruths et al. ([`SwitchboardSolver`]). Both
//! implement [`ControllabilityModel`]; pick one through [`Model`] when the choice is made at
//! runtime.

mod liu;
mod switchboard;

pub use liu::LiuSolver;
pub use switchboard::SwitchboardSolver;

use crate::errors::Error;
use crate::network::Network;
use crate::paths::ControlPath;
use petgraph::graph::NodeIndex;
use std::fmt;
use std::str::FromStr;

/// The controllability model to analyze a network under.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Model {
    /// Nodal dynamics: drivers derived from a maximum bipartite matching.
    Liu,
    /// Switchboard (edge) dynamics: drivers derived from degree imbalance.
    Switchboard,
}

impl Model {
    /// Creates a solver for this model, attached to `network`.
    pub fn solver(self, network: &Network) -> Box<dyn ControllabilityModel + '_> {
        match self {
            Model::Liu => Box::new(LiuSolver::new(network)),
            Model::Switchboard => Box::new(SwitchboardSolver::new(network)),
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Liu => write!(f, "liu"),
            Model::Switchboard => write!(f, "switchboard"),
        }
    }
}

impl FromStr for Model {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "liu" => Ok(Model::Liu),
            "switchboard" => Ok(Model::Switchboard),
            other => Err(Error::InvalidParameter(format!(
                "unknown model '{}' (expected 'liu' or 'switchboard')",
                other
            ))),
        }
    }
}

/// How an edge's removal would change the number of drivers required.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum EdgeClass {
    /// Neither critical nor redundant (Liu model only).
    Ordinary,
    /// Removal never changes the driver count.
    Redundant,
    /// Removal forces an additional driver in every control configuration.
    Critical,
    /// Removal decreases the driver count (switchboard model only).
    Distinguished,
}

impl EdgeClass {
    /// Returns the lowercase name of this class, as used in annotated graph output.
    pub fn name(&self) -> &'static str {
        match self {
            EdgeClass::Ordinary => "ordinary",
            EdgeClass::Redundant => "redundant",
            EdgeClass::Critical => "critical",
            EdgeClass::Distinguished => "distinguished",
        }
    }
}

impl fmt::Display for EdgeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The normalization applied to the driver count when reporting controllability.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ControllabilityMeasure {
    /// Driver nodes divided by the vertex count.
    Nodes,
    /// Input signals (open walks plus balanced components) divided by the edge count.
    Edges,
}

/// The common surface of the two controllability solvers.
///
/// A solver borrows its network for its whole lifetime. [`calculate`](Self::calculate) replaces
/// any previous result; the accessors return [`Error::NotCalculated`] until it has run once.
pub trait ControllabilityModel {
    /// Computes the driver set and control paths for the attached network, replacing any
    /// previous result.
    fn calculate(&mut self) -> Result<(), Error>;

    /// Returns the driver nodes found by the last [`calculate`](Self::calculate).
    fn driver_nodes(&self) -> Result<&[NodeIndex], Error>;

    /// Returns the control paths found by the last [`calculate`](Self::calculate).
    fn control_paths(&self) -> Result<&[ControlPath], Error>;

    /// Returns the controllability measure of the attached network.
    fn controllability(&self) -> Result<f64, Error>;

    /// Classifies every edge of the attached network, in edge-index order.
    fn edge_classes(&self) -> Result<Vec<EdgeClass>, Error>;

    /// Returns the network this solver is attached to.
    fn network(&self) -> &Network;
}
