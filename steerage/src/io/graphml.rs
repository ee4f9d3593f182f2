// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! GraphML output, with the analysis annotations as `<key>`-declared attributes.

use crate::analysis::Annotations;
use crate::errors::Error;
use crate::network::Network;
use petgraph::prelude::*;
use std::io::{self, Write};

pub(super) fn write(
    network: &Network,
    annotations: Option<&Annotations>,
    writer: &mut impl Write,
) -> Result<(), Error> {
    write_inner(network, annotations, writer).map_err(Error::OutputError)
}

fn write_inner(
    network: &Network,
    annotations: Option<&Annotations>,
    w: &mut impl Write,
) -> io::Result<()> {
    writeln!(w, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        w,
        r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns""#
    )?;
    writeln!(
        w,
        r#"         xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#
    )?;
    writeln!(
        w,
        r#"         xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd">"#
    )?;

    let named = (0..network.vertex_count())
        .map(NodeIndex::new)
        .any(|v| network.vertex_name(v).is_some());
    if named {
        writeln!(
            w,
            r#"  <key id="name" for="node" attr.name="name" attr.type="string"/>"#
        )?;
    }
    if annotations.is_some() {
        writeln!(
            w,
            r#"  <key id="is_driver" for="node" attr.name="is_driver" attr.type="boolean"/>"#
        )?;
        writeln!(
            w,
            r#"  <key id="path_type" for="edge" attr.name="path_type" attr.type="string"/>"#
        )?;
        writeln!(
            w,
            r#"  <key id="path_indices" for="edge" attr.name="path_indices" attr.type="long"/>"#
        )?;
        writeln!(
            w,
            r#"  <key id="path_order" for="edge" attr.name="path_order" attr.type="long"/>"#
        )?;
        writeln!(
            w,
            r#"  <key id="edge_class" for="edge" attr.name="edge_class" attr.type="string"/>"#
        )?;
    }

    writeln!(w, r#"  <graph id="G" edgedefault="directed">"#)?;
    for v in (0..network.vertex_count()).map(NodeIndex::new) {
        let mut data = Vec::new();
        if let Some(name) = network.vertex_name(v) {
            data.push(format!(r#"<data key="name">{}</data>"#, escape(name)));
        }
        if let Some(annotations) = annotations {
            data.push(format!(
                r#"<data key="is_driver">{}</data>"#,
                annotations.is_driver[v.index()]
            ));
        }
        if data.is_empty() {
            writeln!(w, r#"    <node id="n{}"/>"#, v.index())?;
        } else {
            writeln!(w, r#"    <node id="n{}">"#, v.index())?;
            for datum in data {
                writeln!(w, "      {}", datum)?;
            }
            writeln!(w, "    </node>")?;
        }
    }
    for (eid, u, v) in network.edges() {
        match annotations {
            None => writeln!(
                w,
                r#"    <edge source="n{}" target="n{}"/>"#,
                u.index(),
                v.index()
            )?,
            Some(annotations) => {
                writeln!(
                    w,
                    r#"    <edge source="n{}" target="n{}">"#,
                    u.index(),
                    v.index()
                )?;
                let edge = &annotations.edges[eid.index()];
                if let Some(path_type) = edge.path_type {
                    writeln!(w, r#"      <data key="path_type">{}</data>"#, path_type)?;
                }
                if let Some(path_index) = edge.path_index {
                    writeln!(w, r#"      <data key="path_indices">{}</data>"#, path_index)?;
                }
                if let Some(path_order) = edge.path_order {
                    writeln!(w, r#"      <data key="path_order">{}</data>"#, path_order)?;
                }
                writeln!(
                    w,
                    r#"      <data key="edge_class">{}</data>"#,
                    edge.edge_class
                )?;
                writeln!(w, "    </edge>")?;
            }
        }
    }
    writeln!(w, "  </graph>")?;
    writeln!(w, "</graphml>")?;
    Ok(())
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
