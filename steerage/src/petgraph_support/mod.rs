// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support code for petgraph.
//!
//! The code in here is generic and not tied to controllability analysis, so it lives in its own
//! module.

pub(crate) mod components;
pub(crate) mod scc;
