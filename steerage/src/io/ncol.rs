// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! NCOL: one edge per line as `from to`, with an optional trailing weight (ignored here).
//! Vertices are named; indices are assigned in order of first appearance.

use crate::errors::Error;
use crate::network::Network;
use indexmap::IndexMap;
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
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::GraphReadError)?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => {}
            [from, to] | [from, to, _] => {
                let u = intern(&mut network, from);
                let v = intern(&mut network, to);
                edges.push((u, v));
            }
            _ => {
                return Err(Error::GraphParseError {
                    format: "ncol",
                    line: lineno + 1,
                    message: format!("expected 'from to [weight]', found {} fields", tokens.len()),
                })
            }
        }
    }
    network.add_edges(edges);
    Ok(network)
}

pub(super) fn write(network: &Network, writer: &mut impl Write) -> Result<(), Error> {
    for (_, u, v) in network.edges() {
        writeln!(
            writer,
            "{} {}",
            network.vertex_label(u),
            network.vertex_label(v)
        )
        .map_err(Error::OutputError)?;
    }
    Ok(())
}
