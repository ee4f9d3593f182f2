// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Control paths: the routes along which control signals reach the network.
//!
//! The Liu model produces *stems* (directed paths of matched edges rooted at a driver) and *buds*
//! (directed cycles of matched edges, optionally attached to a stem). The switchboard model
//! produces *open walks* and *closed walks* (directed trails covering every edge).
//!
//! All four shapes are variants of [`ControlPath`]. Cyclic paths (buds and closed walks) store
//! their vertex sequence without repeating the first vertex; their edge list includes the closing
//! edge, so a cyclic path over `k` vertices carries `k` edges while an acyclic one over `k + 1`
//! vertices carries `k`. Trails may revisit vertices, so a vertex can appear more than once in a
//! walk's sequence.

use crate::network::Network;
use itertools::Itertools;
use petgraph::graph::{EdgeIndex, NodeIndex};
use std::fmt;

/// A stem: a directed path of matched edges whose root is a driver node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Stem {
    pub(crate) vertices: Vec<NodeIndex>,
    pub(crate) edges: Vec<EdgeIndex>,
}

impl Stem {
    pub(crate) fn new(vertices: Vec<NodeIndex>, edges: Vec<EdgeIndex>) -> Self {
        debug_assert_eq!(vertices.len(), edges.len() + 1);
        Self { vertices, edges }
    }

    /// The driver-node entry point of this stem.
    pub fn root(&self) -> NodeIndex {
        self.vertices[0]
    }

    /// The end of this stem.
    pub fn tip(&self) -> NodeIndex {
        *self.vertices.last().expect("stems are nonempty")
    }
}

/// A bud: a directed cycle of matched edges, optionally attached to a stem.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Bud {
    pub(crate) vertices: Vec<NodeIndex>,
    pub(crate) edges: Vec<EdgeIndex>,
    pub(crate) stem: Option<usize>,
}

impl Bud {
    pub(crate) fn new(vertices: Vec<NodeIndex>, edges: Vec<EdgeIndex>) -> Self {
        debug_assert_eq!(vertices.len(), edges.len());
        Self {
            vertices,
            edges,
            stem: None,
        }
    }

    /// The index, within the solver's path list, of the stem this bud is attached to.
    ///
    /// An unattached bud consumes an input signal of its own.
    pub fn attached_stem(&self) -> Option<usize> {
        self.stem
    }
}

/// An open or closed walk produced by the switchboard model.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Walk {
    pub(crate) vertices: Vec<NodeIndex>,
    pub(crate) edges: Vec<EdgeIndex>,
}

impl Walk {
    pub(crate) fn new(vertices: Vec<NodeIndex>, edges: Vec<EdgeIndex>) -> Self {
        Self { vertices, edges }
    }
}

/// A control path: one of the four shapes control signals are routed along.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ControlPath {
    /// A directed path of matched edges, rooted at a driver node.
    Stem(Stem),
    /// A directed cycle of matched edges.
    Bud(Bud),
    /// A directed trail with distinct endpoints; requires an input signal.
    OpenWalk(Walk),
    /// A cyclic directed trail; requires no independent input signal.
    ClosedWalk(Walk),
}

impl ControlPath {
    /// Returns the lowercase human-readable name of this path's type.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ControlPath::Stem(_) => "stem",
            ControlPath::Bud(_) => "bud",
            ControlPath::OpenWalk(_) => "open walk",
            ControlPath::ClosedWalk(_) => "closed walk",
        }
    }

    /// Returns the vertex sequence of this path.
    ///
    /// Cyclic paths do not repeat the first vertex at the end.
    pub fn vertices(&self) -> &[NodeIndex] {
        match self {
            ControlPath::Stem(stem) => &stem.vertices,
            ControlPath::Bud(bud) => &bud.vertices,
            ControlPath::OpenWalk(walk) | ControlPath::ClosedWalk(walk) => &walk.vertices,
        }
    }

    /// Returns the edges of this path, in traversal order.
    ///
    /// For cyclic paths the last edge closes the cycle back to the first vertex.
    pub fn edges(&self) -> &[EdgeIndex] {
        match self {
            ControlPath::Stem(stem) => &stem.edges,
            ControlPath::Bud(bud) => &bud.edges,
            ControlPath::OpenWalk(walk) | ControlPath::ClosedWalk(walk) => &walk.edges,
        }
    }

    /// Returns true if this path closes back on its first vertex.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, ControlPath::Bud(_) | ControlPath::ClosedWalk(_))
    }

    /// Returns true if this path consumes an independent input signal.
    ///
    /// Stems and open walks always do; closed walks never do; buds only when not attached to a
    /// stem.
    pub fn needs_input_signal(&self) -> bool {
        match self {
            ControlPath::Stem(_) | ControlPath::OpenWalk(_) => true,
            ControlPath::Bud(bud) => bud.stem.is_none(),
            ControlPath::ClosedWalk(_) => false,
        }
    }

    /// Returns a displayable form of this path, using vertex names from `network` where assigned.
    pub fn display<'a>(&'a self, network: &'a Network) -> ControlPathDisplay<'a> {
        ControlPathDisplay {
            path: self,
            network,
        }
    }
}

/// A display adaptor for [`ControlPath`], returned by [`ControlPath::display`].
///
/// Prints the path type followed by the vertex sequence; cyclic paths repeat the first vertex at
/// the end to show the closure.
pub struct ControlPathDisplay<'a> {
    path: &'a ControlPath,
    network: &'a Network,
}

impl fmt::Display for ControlPathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.path.kind_name())?;
        let labels = self
            .path
            .vertices()
            .iter()
            .map(|&v| self.network.vertex_label(v))
            .format(" -> ");
        write!(f, "{}", labels)?;
        if self.path.is_cyclic() && !self.path.vertices().is_empty() {
            write!(
                f,
                " -> {}",
                self.network.vertex_label(self.path.vertices()[0])
            )?;
        }
        if let ControlPath::Bud(bud) = self.path {
            if let Some(stem) = bud.stem {
                write!(f, " (attached to path {})", stem)?;
            }
        }
        Ok(())
    }
}
