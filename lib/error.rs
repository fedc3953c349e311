//! Errors raised while building, encoding, or measuring gate sequences.

use thiserror::Error;
use crate::gate::GateKind;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A commutation oracle was handed a gate kind it has no rules for.
    #[error("no commutation rules implemented for gate kind {kind}")]
    UnsupportedGate { kind: GateKind },

    /// Both gate kinds are supported, but the pair has no rule entry.
    #[error("no commutation rule for gate kinds ({a}, {b})")]
    NoRule { a: GateKind, b: GateKind },

    #[error("qubit index {qubit} out of range for {n}-qubit circuit")]
    QubitOutOfRange { qubit: usize, n: usize },

    #[error("gate acts on qubit {qubit} more than once")]
    DuplicateQubit { qubit: usize },

    #[error("circuit needs at least {min} qubits, but has {n}")]
    TooFewQubits { n: usize, min: usize },

    #[error("gate set is empty")]
    EmptyGateSet,

    #[error("population is empty")]
    EmptyPopulation,

    /// Search brackets must satisfy `1 <= lower <= upper`.
    #[error("invalid search bracket [{lower}, {upper}]")]
    InvalidBracket { lower: u64, upper: u64 },

    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// The combinatorial size of the circuit space overflows a `u64`.
    #[error("search space for {qubits} qubits and {gates} gates is too large")]
    SpaceTooLarge { qubits: usize, gates: usize },

    #[error("failed to build graphviz: {0}")]
    Graphviz(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unsupported_gate_names_kind() {
        let err = Error::UnsupportedGate { kind: GateKind::Swap };
        assert!(err.to_string().contains("Swap"));
    }

    #[test]
    fn bracket_message() {
        let err = Error::InvalidBracket { lower: 5, upper: 2 };
        assert_eq!(err.to_string(), "invalid search bracket [5, 2]");
    }
}
