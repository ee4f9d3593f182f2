// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LGL: adjacency blocks. A line `# name` opens a block for a source vertex; each following
//! line names one of its out-neighbors (with an optional weight, ignored here).

use crate::errors::Error;
use crate::network::Network;
use indexmap::IndexMap;
use petgraph::prelude::*;
use std::io::{BufRead, Write};

pub(super) fn read(reader: impl BufRead) -> Result<Network, Error> {
    let mut network = Network::new();
    let mut names: IndexMap<String, usize> = IndexMap::new();
    let mut intern = |network: &mut Network, name: &str| -> usize {
        *names.entry(name.to_string()).or_insert_with(|| {
            network.add_named_vertex(name).index()
        })
    };

    let mut edges = Vec::new();
    let mut source: Option<usize> = None;
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::GraphReadError)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(name) = trimmed.strip_prefix('#') {
            let name = name.trim();
            if name.is_empty() {
                return Err(Error::GraphParseError {
                    format: "lgl",
                    line: lineno + 1,
                    message: "empty source vertex name".to_string(),
                });
            }
            source = Some(intern(&mut network, name));
        } else {
            let target = trimmed
                .split_whitespace()
                .next()
                .expect("nonempty trimmed line has a token");
            let u = source.ok_or_else(|| Error::GraphParseError {
                format: "lgl",
                line: lineno + 1,
                message: "neighbor listed before any '# source' line".to_string(),
            })?;
            let v = intern(&mut network, target);
            edges.push((u, v));
        }
    }
    network.add_edges(edges);
    Ok(network)
}

pub(super) fn write(network: &Network, writer: &mut impl Write) -> Result<(), Error> {
    for v in (0..network.vertex_count()).map(NodeIndex::new) {
        writeln!(writer, "# {}", network.vertex_label(v)).map_err(Error::OutputError)?;
        for target in network.incident(v, Outgoing).collect::<Vec<_>>().into_iter().rev() {
            let (_, w) = network.edge_endpoints(target);
            writeln!(writer, "{}", network.vertex_label(w)).map_err(Error::OutputError)?;
        }
    }
    Ok(())
}
