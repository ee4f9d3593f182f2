// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

mod analysis_tests;
mod classify_tests;
mod proptests;
mod switchboard_tests;

use petgraph::graph::NodeIndex;

/// Collapses a slice of node indices into plain `usize`s for terser assertions.
pub(crate) fn indices(vertices: &[NodeIndex]) -> Vec<usize> {
    vertices.iter().map(|v| v.index()).collect()
}
