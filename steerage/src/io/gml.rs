// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph Modelling Language: nested `key value` lists in brackets.
//!
//! The reader understands the subset every GML graph carries (`graph`, `node` with `id` and
//! optional `label`, `edge` with `source` and `target`) and skips unknown keys, including whole
//! nested blocks. The writer emits the same subset, plus analysis annotations when present.

use crate::analysis::Annotations;
use crate::errors::Error;
use crate::network::Network;
use indexmap::IndexMap;
use petgraph::prelude::*;
use std::io::{self, BufRead, Write};

#[derive(Debug)]
enum Token {
    Open,
    Close,
    Word(String),
    Quoted(String),
}

#[derive(Debug)]
enum Value {
    Scalar(String),
    List(Vec<(String, Value)>),
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::GraphParseError {
        format: "gml",
        line,
        message: message.into(),
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, Error> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();
    let mut line = 1;
    while let Some(&c) = chars.peek() {
        match c {
            '\n' => {
                line += 1;
                chars.next();
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '[' => {
                tokens.push((Token::Open, line));
                chars.next();
            }
            ']' => {
                tokens.push((Token::Close, line));
                chars.next();
            }
            '"' => {
                chars.next();
                let mut string = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\n') => {
                            line += 1;
                            string.push('\n');
                        }
                        Some(ch) => string.push(ch),
                        None => return Err(parse_error(line, "unterminated string")),
                    }
                }
                tokens.push((Token::Quoted(string), line));
            }
            _ => {
                let mut word = String::new();
                while let Some(&ch) = chars.peek() {
                    if ch.is_whitespace() || ch == '[' || ch == ']' {
                        break;
                    }
                    word.push(ch);
                    chars.next();
                }
                tokens.push((Token::Word(word), line));
            }
        }
    }
    Ok(tokens)
}

fn parse_list(
    tokens: &[(Token, usize)],
    pos: &mut usize,
    top_level: bool,
) -> Result<Vec<(String, Value)>, Error> {
    let mut items = Vec::new();
    loop {
        match tokens.get(*pos) {
            None if top_level => return Ok(items),
            None => return Err(parse_error(0, "unexpected end of input")),
            Some((Token::Close, line)) => {
                if top_level {
                    return Err(parse_error(*line, "unmatched ']'"));
                }
                *pos += 1;
                return Ok(items);
            }
            Some((Token::Word(key), line)) => {
                *pos += 1;
                match tokens.get(*pos) {
                    Some((Token::Open, _)) => {
                        *pos += 1;
                        let list = parse_list(tokens, pos, false)?;
                        items.push((key.clone(), Value::List(list)));
                    }
                    Some((Token::Word(value), _)) => {
                        *pos += 1;
                        items.push((key.clone(), Value::Scalar(value.clone())));
                    }
                    Some((Token::Quoted(value), _)) => {
                        *pos += 1;
                        items.push((key.clone(), Value::Scalar(value.clone())));
                    }
                    _ => return Err(parse_error(*line, format!("key '{}' has no value", key))),
                }
            }
            Some((token, line)) => {
                return Err(parse_error(*line, format!("expected a key, found {:?}", token)))
            }
        }
    }
}

fn scalar<'a>(items: &'a [(String, Value)], key: &str) -> Option<&'a str> {
    items.iter().find_map(|(k, v)| match v {
        Value::Scalar(s) if k == key => Some(s.as_str()),
        _ => None,
    })
}

pub(super) fn read(mut reader: impl BufRead) -> Result<Network, Error> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(Error::GraphReadError)?;
    let tokens = tokenize(&input)?;
    let mut pos = 0;
    let document = parse_list(&tokens, &mut pos, true)?;

    let graph = document
        .iter()
        .find_map(|(key, value)| match value {
            Value::List(items) if key == "graph" => Some(items),
            _ => None,
        })
        .ok_or_else(|| parse_error(0, "no 'graph' block"))?;

    let mut network = Network::new();
    let mut id_map: IndexMap<i64, usize> = IndexMap::new();
    for (key, value) in graph {
        if key != "node" {
            continue;
        }
        let items = match value {
            Value::List(items) => items,
            Value::Scalar(_) => return Err(parse_error(0, "'node' is not a block")),
        };
        let id: i64 = scalar(items, "id")
            .ok_or_else(|| parse_error(0, "node without an 'id'"))?
            .parse()
            .map_err(|_| parse_error(0, "node 'id' is not an integer"))?;
        if id_map.contains_key(&id) {
            return Err(parse_error(0, format!("duplicate node id {}", id)));
        }
        let ix = match scalar(items, "label") {
            Some(label) => network.add_named_vertex(label),
            None => network.add_vertex(),
        };
        id_map.insert(id, ix.index());
    }

    let mut edges = Vec::new();
    for (key, value) in graph {
        if key != "edge" {
            continue;
        }
        let items = match value {
            Value::List(items) => items,
            Value::Scalar(_) => return Err(parse_error(0, "'edge' is not a block")),
        };
        let mut endpoint = |key: &str| -> Result<usize, Error> {
            let id: i64 = scalar(items, key)
                .ok_or_else(|| parse_error(0, format!("edge without a '{}'", key)))?
                .parse()
                .map_err(|_| parse_error(0, format!("edge '{}' is not an integer", key)))?;
            id_map
                .get(&id)
                .copied()
                .ok_or_else(|| parse_error(0, format!("edge references unknown node id {}", id)))
        };
        edges.push((endpoint("source")?, endpoint("target")?));
    }
    network.add_edges(edges);
    Ok(network)
}

fn escape(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

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
    writeln!(w, "graph [")?;
    writeln!(w, "  directed 1")?;
    for v in (0..network.vertex_count()).map(NodeIndex::new) {
        writeln!(w, "  node [")?;
        writeln!(w, "    id {}", v.index())?;
        if let Some(name) = network.vertex_name(v) {
            writeln!(w, "    label \"{}\"", escape(name))?;
        }
        if let Some(annotations) = annotations {
            writeln!(
                w,
                "    is_driver {}",
                if annotations.is_driver[v.index()] { 1 } else { 0 }
            )?;
        }
        writeln!(w, "  ]")?;
    }
    for (eid, u, v) in network.edges() {
        writeln!(w, "  edge [")?;
        writeln!(w, "    source {}", u.index())?;
        writeln!(w, "    target {}", v.index())?;
        if let Some(annotations) = annotations {
            let edge = &annotations.edges[eid.index()];
            if let Some(path_type) = edge.path_type {
                writeln!(w, "    path_type \"{}\"", path_type)?;
            }
            if let Some(path_index) = edge.path_index {
                writeln!(w, "    path_indices {}", path_index)?;
            }
            if let Some(path_order) = edge.path_order {
                writeln!(w, "    path_order {}", path_order)?;
            }
            writeln!(w, "    edge_class \"{}\"", edge.edge_class)?;
        }
        writeln!(w, "  ]")?;
    }
    writeln!(w, "]")?;
    Ok(())
}
