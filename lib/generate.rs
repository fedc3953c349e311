//! Random gates, circuits, and populations of circuits.
//!
//! Every gate is drawn by first choosing a gate kind uniformly from a
//! [`GateSet`] and then choosing qubits uniformly, without replacement for
//! multi-qubit kinds. All randomness comes from the caller's generator.

use rand::{
    rngs::StdRng,
    seq::{ index, SliceRandom },
    Rng,
    SeedableRng,
};
use crate::{
    error::{ Error, Result },
    gate::{ Circuit, Gate, GateKind, GateSet },
};

/// Create a new generator from a seed, or from system entropy if no seed is
/// given.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map(StdRng::seed_from_u64)
        .unwrap_or_else(StdRng::from_entropy)
}

/// Sample a random gate from `gate_set` acting on an `n`-qubit register.
///
/// Controlled gates take their control and target from two distinct qubits.
pub fn random_gate<R>(gate_set: &GateSet, n: usize, rng: &mut R)
    -> Result<Gate>
where R: Rng + ?Sized
{
    if n < 2 { return Err(Error::TooFewQubits { n, min: 2 }); }
    let kind = gate_set.kinds().choose(rng).ok_or(Error::EmptyGateSet)?;
    let gate
        = match kind {
            GateKind::H => Gate::H(rng.gen_range(0..n)),
            GateKind::S => Gate::S(rng.gen_range(0..n)),
            GateKind::T => Gate::T(rng.gen_range(0..n)),
            GateKind::CX => {
                let pair = index::sample(rng, n, 2);
                Gate::CX(pair.index(1), pair.index(0))
            },
            GateKind::Swap => {
                let pair = index::sample(rng, n, 2);
                Gate::Swap(pair.index(0), pair.index(1))
            },
        };
    Ok(gate)
}

/// Sample a random `n`-qubit circuit of `gates` gates.
pub fn random_circuit<R>(gate_set: &GateSet, n: usize, gates: usize, rng: &mut R)
    -> Result<Circuit>
where R: Rng + ?Sized
{
    let mut circuit = Circuit::new(n)?;
    for _ in 0..gates {
        circuit.push(random_gate(gate_set, n, rng)?)?;
    }
    Ok(circuit)
}

/// Sample `count` independent random circuits.
pub fn generate_population<R>(
    gate_set: &GateSet,
    n: usize,
    gates: usize,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Circuit>>
where R: Rng + ?Sized
{
    (0..count)
        .map(|_| random_circuit(gate_set, n, gates, rng))
        .collect()
}
