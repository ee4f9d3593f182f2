// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading and writing networks.
//!
//! Four textual formats are read: numeric edge lists, NCOL, LGL and GML. All of those plus
//! GraphML are written; the GraphML and GML writers also carry the annotations produced by the
//! `graph` analysis mode (driver flags, path membership, edge classes). GraphML *input* is not
//! supported.
//!
//! The format of a file is inferred from its extension with [`Format::from_path`], or forced by
//! the caller.

mod edgelist;
mod gml;
mod graphml;
mod lgl;
mod ncol;

use crate::analysis::Annotations;
use crate::errors::Error;
use crate::network::Network;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::str::FromStr;

/// A graph file format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Format {
    /// Whitespace-separated pairs of numeric vertex ids.
    EdgeList,
    /// One named edge per line (`from to [weight]`).
    Ncol,
    /// Adjacency blocks headed by `# source` lines.
    Lgl,
    /// GraphML XML (write only).
    GraphML,
    /// Graph Modelling Language.
    Gml,
}

impl Format {
    /// Infers the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("txt") => Ok(Format::EdgeList),
            Some("ncol") => Ok(Format::Ncol),
            Some("lgl") => Ok(Format::Lgl),
            Some("graphml") => Ok(Format::GraphML),
            Some("gml") => Ok(Format::Gml),
            _ => Err(Error::UnknownFormat(path.display().to_string())),
        }
    }

    /// Returns the lowercase name of this format.
    pub fn name(self) -> &'static str {
        match self {
            Format::EdgeList => "edgelist",
            Format::Ncol => "ncol",
            Format::Lgl => "lgl",
            Format::GraphML => "graphml",
            Format::Gml => "gml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "edgelist" => Ok(Format::EdgeList),
            "ncol" => Ok(Format::Ncol),
            "lgl" => Ok(Format::Lgl),
            "graphml" => Ok(Format::GraphML),
            "gml" => Ok(Format::Gml),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

/// Reads a network in the given format.
pub fn read_network(reader: impl BufRead, format: Format) -> Result<Network, Error> {
    match format {
        Format::EdgeList => edgelist::read(reader),
        Format::Ncol => ncol::read(reader),
        Format::Lgl => lgl::read(reader),
        Format::Gml => gml::read(reader),
        Format::GraphML => Err(Error::GraphParseError {
            format: "graphml",
            line: 0,
            message: "reading GraphML is not supported; convert to GML or an edge list".to_string(),
        }),
    }
}

/// Reads a network from `path`, inferring the format from the extension unless one is given.
pub fn read_network_from_path(path: &Path, format: Option<Format>) -> Result<Network, Error> {
    let format = match format {
        Some(format) => format,
        None => Format::from_path(path)?,
    };
    let file = File::open(path).map_err(Error::GraphReadError)?;
    read_network(BufReader::new(file), format)
}

/// Writes a network in the given format, without annotations.
pub fn write_network(
    network: &Network,
    format: Format,
    writer: impl Write,
) -> Result<(), Error> {
    write_annotated(network, None, format, writer)
}

/// Writes a network in the given format, with the given analysis annotations.
///
/// Only GraphML and GML carry annotations; requesting another format with annotations present is
/// an unsupported operation.
pub fn write_annotated(
    network: &Network,
    annotations: Option<&Annotations>,
    format: Format,
    mut writer: impl Write,
) -> Result<(), Error> {
    match format {
        Format::EdgeList | Format::Ncol | Format::Lgl if annotations.is_some() => {
            Err(Error::UnsupportedOperation(format!(
                "annotated output requires graphml or gml, not {}",
                format
            )))
        }
        Format::EdgeList => edgelist::write(network, &mut writer),
        Format::Ncol => ncol::write(network, &mut writer),
        Format::Lgl => lgl::write(network, &mut writer),
        Format::GraphML => graphml::write(network, annotations, &mut writer),
        Format::Gml => gml::write(network, annotations, &mut writer),
    }
}
