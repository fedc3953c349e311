//! Monte Carlo check of whether a sample size is large enough for
//! [`estimate_space_size`] to be trusted.
//!
//! The true number of distinct gate sequences is known exactly from the gate
//! set (see [`GateSet::space_size`]). Each trial draws a fresh population
//! with its own seed, counts sequence-level duplicates, and estimates the
//! space size from them; the sample size is deemed valid if a large enough
//! fraction of trials lands within a relative margin of the true size.

use rand::{ rngs::StdRng, SeedableRng };
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use tracing::info;
use crate::{
    count::count_sequence_duplicates,
    error::{ Error, Result },
    estimate::estimate_space_size,
    gate::GateSet,
    generate::generate_population,
};

/// Population settings for a validation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationParams {
    pub gate_set: GateSet,
    pub qubits: usize,
    pub gates: usize,
    /// Number of circuits drawn per trial.
    pub sample_num: usize,
    /// Trial `k` is seeded with `seed + k`.
    pub seed: u64,
    /// Search bracket handed to the estimator.
    pub bounds: (u64, u64),
}

impl ValidationParams {
    /// Create a new set of parameters with seed 0 and estimator bracket
    /// `[1, 10 * true_size]`.
    ///
    /// Fails if the space size doesn't fit in a `u64`.
    pub fn new(gate_set: GateSet, qubits: usize, gates: usize, sample_num: usize)
        -> Result<Self>
    {
        let true_size = gate_set.space_size(qubits, gates)?;
        let bounds = (1, true_size.saturating_mul(10).max(1));
        Ok(Self { gate_set, qubits, gates, sample_num, seed: 0, bounds })
    }

    /// Number of distinct gate sequences the population is drawn from.
    pub fn true_size(&self) -> Result<u64> {
        self.gate_set.space_size(self.qubits, self.gates)
    }
}

/// Outcome of a validation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSizeReport {
    pub true_size: u64,
    /// Closed interval `true_size * (1 ± margin)`.
    pub interval: (f64, f64),
    /// Per-trial estimates, in trial order.
    pub estimates: Vec<u64>,
    /// Number of estimates inside `interval`.
    pub hits: usize,
    /// `hits / trials`, or zero if there were no trials.
    pub achieved_confidence: f64,
    pub is_valid: bool,
}

fn check_probability(name: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::InvalidProbability { name, value })
    }
}

/// Run `total_runs` independent trials and report how often the estimated
/// space size falls within `margin` (relative) of the true size.
///
/// The sample size is valid iff the achieved fraction is at least
/// `confidence`. Trials run in parallel, but each is seeded independently so
/// the report doesn't depend on scheduling.
pub fn validate_sample_size(
    params: &ValidationParams,
    margin: f64,
    confidence: f64,
    total_runs: usize,
) -> Result<SampleSizeReport>
{
    check_probability("margin", margin)?;
    check_probability("confidence", confidence)?;
    let true_size = params.true_size()?;
    let interval = (
        true_size as f64 * (1.0 - margin),
        true_size as f64 * (1.0 + margin),
    );
    let (lower, upper) = params.bounds;
    let estimates: Vec<u64>
        = (0..total_runs).into_par_iter()
        .map(|run| {
            let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(run as u64));
            let population
                = generate_population(
                    &params.gate_set,
                    params.qubits,
                    params.gates,
                    params.sample_num,
                    &mut rng,
                )?;
            let count = count_sequence_duplicates(&population)?;
            estimate_space_size(
                params.sample_num as u64, count.duplicates as u64, lower, upper)
        })
        .collect::<Result<Vec<u64>>>()?;
    let hits: usize
        = estimates.iter()
        .filter(|est| (interval.0..=interval.1).contains(&(**est as f64)))
        .count();
    let achieved_confidence: f64
        = if total_runs == 0 { 0.0 } else { hits as f64 / total_runs as f64 };
    let is_valid = achieved_confidence >= confidence;
    info!(
        gate_set = %params.gate_set,
        qubits = params.qubits,
        gates = params.gates,
        sample_num = params.sample_num,
        true_size,
        hits,
        total_runs,
        achieved_confidence,
        is_valid,
        "validated sample size"
    );
    Ok(SampleSizeReport {
        true_size,
        interval,
        estimates,
        hits,
        achieved_confidence,
        is_valid,
    })
}

/// Like [`validate_sample_size`], but return only the verdict.
pub fn is_valid_sample_size(
    params: &ValidationParams,
    margin: f64,
    confidence: f64,
    total_runs: usize,
) -> Result<bool>
{
    validate_sample_size(params, margin, confidence, total_runs)
        .map(|report| report.is_valid)
}
