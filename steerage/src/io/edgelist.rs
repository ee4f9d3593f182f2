// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Numeric edge lists: whitespace-separated vertex id pairs, possibly spread over lines.

use crate::errors::Error;
use crate::network::Network;
use std::io::{BufRead, Write};

pub(super) fn read(reader: impl BufRead) -> Result<Network, Error> {
    let mut ids = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::GraphReadError)?;
        for token in line.split_whitespace() {
            let id: usize = token.parse().map_err(|_| Error::GraphParseError {
                format: "edgelist",
                line: lineno + 1,
                message: format!("expected a vertex id, found '{}'", token),
            })?;
            ids.push(id);
        }
    }
    if ids.len() % 2 != 0 {
        return Err(Error::GraphParseError {
            format: "edgelist",
            line: 0,
            message: "odd number of vertex ids".to_string(),
        });
    }

    let n = ids.iter().max().map_or(0, |max| max + 1);
    let mut network = Network::new();
    network.add_vertices(n);
    network.add_edges(ids.chunks_exact(2).map(|pair| (pair[0], pair[1])));
    Ok(network)
}

pub(super) fn write(network: &Network, writer: &mut impl Write) -> Result<(), Error> {
    for (_, u, v) in network.edges() {
        writeln!(writer, "{} {}", u.index(), v.index()).map_err(Error::OutputError)?;
    }
    Ok(())
}
