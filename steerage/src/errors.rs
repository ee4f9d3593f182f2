// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contains types that describe errors that `steerage` methods can return.

use std::error;
use std::fmt;
use std::io;

use Error::*;

/// Error type describing the sorts of errors `steerage` can return.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A solver result was requested before `calculate` was run.
    NotCalculated,
    /// The requested operation is not supported by the selected model.
    UnsupportedOperation(String),
    /// A graph generator or analysis was invoked with parameters it cannot satisfy.
    InvalidParameter(String),
    /// An error occurred while reading a graph from a file or stream.
    GraphReadError(io::Error),
    /// A graph file could not be parsed.
    GraphParseError {
        /// The name of the format being parsed.
        format: &'static str,
        /// The 1-based line at which parsing failed (0 if unknown).
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// An error occurred while writing a graph or a report.
    OutputError(io::Error),
    /// A graph format could not be inferred from a file name.
    UnknownFormat(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotCalculated => write!(f, "results requested before calculate() was run"),
            UnsupportedOperation(msg) => write!(f, "unsupported operation: {}", msg),
            InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            GraphReadError(err) => write!(f, "error while reading graph: {}", err),
            GraphParseError {
                format,
                line,
                message,
            } => {
                if *line == 0 {
                    write!(f, "error while parsing {} input: {}", format, message)
                } else {
                    write!(
                        f,
                        "error while parsing {} input at line {}: {}",
                        format, line, message
                    )
                }
            }
            OutputError(err) => write!(f, "error while writing output: {}", err),
            UnknownFormat(name) => write!(f, "cannot infer graph format from '{}'", name),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            GraphReadError(err) => Some(err),
            OutputError(err) => Some(err),
            NotCalculated
            | UnsupportedOperation(_)
            | InvalidParameter(_)
            | GraphParseError { .. }
            | UnknownFormat(_) => None,
        }
    }
}
