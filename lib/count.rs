//! Counting repeated circuits in a population under different encodings.
//!
//! An [`Encoding`] maps each circuit to a key; a circuit counts as a duplicate
//! iff its key has already been seen earlier in the population. Two encodings
//! are provided:
//! - [`HasseEncoding`] keys circuits by the fingerprint of their
//!   [`HasseDiagram`], so reorderings of commuting gates collapse together.
//! - [`SequenceEncoding`] keys circuits by their exact gate sequence, as a
//!   baseline with no knowledge of commutation.

use std::{
    hash::Hash,
    time::{ Duration, Instant },
};
use rustc_hash::FxHashSet;
use tracing::debug;
use crate::{
    commute::{ CliffordTable, Commute },
    error::{ Error, Result },
    fingerprint::{ Fingerprint, WlHasher },
    gate::{ Circuit, Labeling },
    hasse::HasseDiagram,
};

/// A way to reduce circuits to hashable keys.
pub trait Encoding {
    type Key: Hash + Eq;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn encode(&self, circuit: &Circuit) -> Result<Self::Key>;
}

/// Key circuits by the fingerprint of their Hasse diagram.
#[derive(Copy, Clone, Debug, Default)]
pub struct HasseEncoding<C = CliffordTable> {
    pub rule: C,
    pub labeling: Labeling,
    pub hasher: WlHasher,
}

impl<C> HasseEncoding<C> {
    pub fn new(rule: C, labeling: Labeling) -> Self {
        Self { rule, labeling, hasher: WlHasher::new() }
    }
}

impl<C> Encoding for HasseEncoding<C>
where C: Commute
{
    type Key = Fingerprint;

    fn name(&self) -> &'static str { "hasse" }

    fn encode(&self, circuit: &Circuit) -> Result<Fingerprint> {
        let diagram = HasseDiagram::build(circuit, &self.rule, self.labeling)?;
        Ok(self.hasher.hash(&diagram))
    }
}

/// Key circuits by their exact gate sequence.
#[derive(Copy, Clone, Debug, Default)]
pub struct SequenceEncoding;

impl Encoding for SequenceEncoding {
    type Key = Circuit;

    fn name(&self) -> &'static str { "sequence" }

    fn encode(&self, circuit: &Circuit) -> Result<Circuit> {
        Ok(circuit.clone())
    }
}

/// Result of a single duplicate-counting pass over a population.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DuplicateCount {
    /// Number of circuits whose key was already seen.
    pub duplicates: usize,
    /// Wall-clock time spent encoding and counting.
    pub elapsed: Duration,
}

impl DuplicateCount {
    pub fn elapsed_secs(&self) -> f64 { self.elapsed.as_secs_f64() }
}

/// Count duplicates in `population` under `encoding`, in a single
/// left-to-right pass.
///
/// The first occurrence of every key is never counted. Fails if the
/// population is empty or if any circuit can't be encoded.
pub fn count_duplicates<E>(encoding: &E, population: &[Circuit])
    -> Result<DuplicateCount>
where E: Encoding + ?Sized
{
    if population.is_empty() { return Err(Error::EmptyPopulation); }
    let start = Instant::now();
    let mut seen: FxHashSet<E::Key> = FxHashSet::default();
    let mut duplicates: usize = 0;
    for circuit in population.iter() {
        if !seen.insert(encoding.encode(circuit)?) { duplicates += 1; }
    }
    let elapsed = start.elapsed();
    debug!(
        encoding = encoding.name(),
        circuits = population.len(),
        duplicates,
        elapsed_secs = elapsed.as_secs_f64(),
        "counted duplicates"
    );
    Ok(DuplicateCount { duplicates, elapsed })
}

/// Count duplicates under the default [`HasseEncoding`].
pub fn count_hasse_duplicates(population: &[Circuit]) -> Result<DuplicateCount> {
    count_duplicates(&HasseEncoding::<CliffordTable>::default(), population)
}

/// Count duplicates under the [`SequenceEncoding`].
pub fn count_sequence_duplicates(population: &[Circuit])
    -> Result<DuplicateCount>
{
    count_duplicates(&SequenceEncoding, population)
}
