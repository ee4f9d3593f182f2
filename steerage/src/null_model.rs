// Copyright (c) The steerage Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Null-model comparison: is the observed controllability explained by size, density or degree
//! distribution alone?
//!
//! The observed network is compared against three random ensembles: Erdős–Rényi graphs with the
//! same vertex and edge counts, configuration-model graphs with the same joint in/out-degree
//! sequence, and configuration-model graphs with the out-degree vector shuffled across vertices
//! (destroying the joint distribution while preserving both marginals). Each ensemble is sampled
//! [`DEFAULT_TRIALS`] times and the mean controllability reported.

use crate::errors::Error;
use crate::generate::{degree_sequence_game, erdos_renyi_gnm};
use crate::network::Network;
use crate::solver::Model;
use log::{info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// The number of random networks drawn per ensemble.
pub const DEFAULT_TRIALS: usize = 100;

/// The outcome of a significance run: the observed controllability and the null-model means.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignificanceReport {
    /// Controllability of the observed network.
    pub observed: f64,
    /// Mean controllability over the Erdős–Rényi ensemble.
    pub erdos_renyi: f64,
    /// Mean controllability over the configuration-model ensemble.
    pub configuration: f64,
    /// Mean controllability over the configuration-model ensemble with shuffled out-degrees.
    pub configuration_no_joint: f64,
}

impl SignificanceReport {
    /// Returns the report as labelled rows, in output order.
    pub fn rows(&self) -> [(&'static str, f64); 4] {
        [
            ("Observed", self.observed),
            ("ER", self.erdos_renyi),
            ("Configuration", self.configuration),
            ("Configuration_no_joint", self.configuration_no_joint),
        ]
    }
}

/// Runs the null-model comparison for `network` under `model`.
///
/// `trials` networks are drawn per ensemble (`DEFAULT_TRIALS` is the conventional choice). Pass a
/// seed to make the run reproducible; `None` seeds from the operating system. Any failing trial
/// fails the whole run.
pub fn significance(
    network: &Network,
    model: Model,
    trials: usize,
    seed: Option<u64>,
) -> Result<SignificanceReport, Error> {
    if trials == 0 {
        return Err(Error::InvalidParameter(
            "significance testing needs at least one trial".to_string(),
        ));
    }

    let mut solver = model.solver(network);
    solver.calculate()?;
    let observed = solver.controllability()?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let n = network.vertex_count();
    let m = network.edge_count();
    let out_deg = network.out_degree_sequence();
    let in_deg = network.in_degree_sequence();

    info!("testing against Erdős–Rényi null model ({} trials)", trials);
    let erdos_renyi = ensemble_mean(model, trials, &mut rng, |rng| {
        erdos_renyi_gnm(n, m, true, rng)
    })?;

    info!("testing against configuration null model ({} trials)", trials);
    let configuration = ensemble_mean(model, trials, &mut rng, |rng| {
        degree_sequence_game(&out_deg, &in_deg, rng)
    })?;

    info!(
        "testing against configuration null model without joint degrees ({} trials)",
        trials
    );
    let configuration_no_joint = ensemble_mean(model, trials, &mut rng, |rng| {
        let mut shuffled_out = out_deg.clone();
        shuffled_out.shuffle(rng);
        degree_sequence_game(&shuffled_out, &in_deg, rng)
    })?;

    Ok(SignificanceReport {
        observed,
        erdos_renyi,
        configuration,
        configuration_no_joint,
    })
}

fn ensemble_mean<R: Rng>(
    model: Model,
    trials: usize,
    rng: &mut R,
    mut generate: impl FnMut(&mut R) -> Result<Network, Error>,
) -> Result<f64, Error> {
    let mut total = 0.0;
    for trial in 0..trials {
        let sample = generate(rng)?;
        let mut solver = model.solver(&sample);
        solver.calculate()?;
        let controllability = solver.controllability()?;
        trace!("trial {}: controllability {}", trial, controllability);
        total += controllability;
    }
    Ok(total / trials as f64)
}
