//! Tools for counting structurally distinct quantum circuits.
//!
//! Two gate sequences that differ only by reordering commuting gates realize
//! the same computation. Each circuit is reduced to its Hasse diagram (the
//! transitive reduction of its gate non-commutation order), and diagrams are
//! compared through a canonical Weisfeiler-Lehman fingerprint. Counting
//! repeated fingerprints in a random population, compared against a
//! sequence-level baseline, measures how much redundancy commutation removes.
//! The number of collisions observed can also be inverted through the
//! birthday problem to estimate the size of the space being sampled.

pub mod error;
pub mod gate;
pub mod commute;
pub mod hasse;
pub mod fingerprint;
pub mod count;
pub mod generate;
pub mod estimate;
pub mod validate;
pub mod experiment;

pub use error::{ Error, Result };
