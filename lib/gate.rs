//! Gates drawn from a small, fixed Clifford+T vocabulary and the circuits
//! built from them.
//!
//! Every gate acts on one *target* qubit; controlled gates additionally carry
//! a single *control* qubit. `Swap` is included for generation purposes but
//! has no distinguished target and is rejected by the commutation oracles.

use std::fmt;
use itertools::Itertools;
use serde::{ Deserialize, Serialize };
use crate::error::{ Error, Result };

/// Type tag of a [`Gate`], with qubit indices stripped.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize,
)]
pub enum GateKind {
    /// Hadamard
    H,
    /// π/2 rotation about Z
    S,
    /// π/4 rotation about Z
    T,
    /// Z-controlled π rotation about X
    CX,
    /// Swap
    Swap,
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl GateKind {
    /// Number of qubits a gate of this kind acts on.
    pub fn arity(self) -> usize {
        match self {
            Self::H | Self::S | Self::T => 1,
            Self::CX | Self::Swap => 2,
        }
    }

    /// Return `true` if gates of this kind are diagonal in the Z basis.
    pub fn is_diagonal(self) -> bool { matches!(self, Self::S | Self::T) }

    /// Return `true` if gates of this kind carry a control qubit.
    pub fn is_controlled(self) -> bool { matches!(self, Self::CX) }
}

/// The part a qubit plays in a gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Target,
    Control,
}

/// How much of a gate survives in its node label.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Labeling {
    /// Kind and role pattern only; qubit identity is left to the graph
    /// structure.
    ///
    /// This can merge inequivalent circuits: `[CX(0, 1), CX(1, 2)]` and
    /// `[CX(1, 2), CX(0, 1)]` give the same labeled diagram. Duplicate counts
    /// under `Shape` are therefore an upper bound on counts of true
    /// commutation-equivalence classes.
    #[default]
    Shape,
    /// Kind, role pattern, and qubit indices.
    Indexed,
}

/// A single gate application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Hadamard
    H(usize),
    /// π/2 rotation about Z
    S(usize),
    /// π/4 rotation about Z
    T(usize),
    /// Z-controlled π rotation about X.
    ///
    /// The first qubit index is the control.
    CX(usize, usize),
    /// Swap
    Swap(usize, usize),
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::H(k) | Self::S(k) | Self::T(k)
                => write!(f, "{}(target={})", self.kind(), k),
            Self::CX(c, t)
                => write!(f, "CX(control={}, target={})", c, t),
            Self::Swap(a, b)
                => write!(f, "Swap({}, {})", a, b),
        }
    }
}

impl Gate {
    /// Return `true` if `self` is `H`.
    pub fn is_h(&self) -> bool { matches!(self, Self::H(..)) }

    /// Return `true` if `self` is `CX`.
    pub fn is_cx(&self) -> bool { matches!(self, Self::CX(..)) }

    /// Return `true` if `self` is `Swap`.
    pub fn is_swap(&self) -> bool { matches!(self, Self::Swap(..)) }

    pub fn kind(&self) -> GateKind {
        match self {
            Self::H(..) => GateKind::H,
            Self::S(..) => GateKind::S,
            Self::T(..) => GateKind::T,
            Self::CX(..) => GateKind::CX,
            Self::Swap(..) => GateKind::Swap,
        }
    }

    /// Return the target qubit.
    ///
    /// For `Swap`, this is the second index.
    pub fn target(&self) -> usize {
        match *self {
            Self::H(k) | Self::S(k) | Self::T(k) => k,
            Self::CX(_, t) | Self::Swap(_, t) => t,
        }
    }

    /// Return the control qubit, if any.
    pub fn control(&self) -> Option<usize> {
        match *self {
            Self::CX(c, _) => Some(c),
            _ => None,
        }
    }

    /// Iterate over all qubit indices `self` acts on, in declaration order.
    pub fn qubits(&self) -> impl Iterator<Item = usize> {
        let (a, b): (usize, Option<usize>)
            = match *self {
                Self::H(k) | Self::S(k) | Self::T(k) => (k, None),
                Self::CX(a, b) | Self::Swap(a, b) => (a, Some(b)),
            };
        std::iter::once(a).chain(b)
    }

    /// Return `true` if `self` acts on qubit `q`.
    pub fn acts_on(&self, q: usize) -> bool { self.qubits().any(|k| k == q) }

    /// Return `true` if `self` and `other` act on at least one common qubit.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.qubits().any(|q| other.acts_on(q))
    }

    /// Return the role qubit `q` plays in `self`, or `None` if `self` doesn't
    /// act on `q`.
    ///
    /// Both qubits of a `Swap` count as targets.
    pub fn role_of(&self, q: usize) -> Option<Role> {
        match *self {
            Self::CX(c, _) if c == q => Some(Role::Control),
            _ if self.acts_on(q) => Some(Role::Target),
            _ => None,
        }
    }

    /// Render the node label used for `self` in a
    /// [`HasseDiagram`][crate::hasse::HasseDiagram].
    pub fn label(&self, labeling: Labeling) -> String {
        match (labeling, *self) {
            (Labeling::Shape, Self::CX(..)) => "CX(c,t)".to_string(),
            (Labeling::Shape, _) => self.kind().to_string(),
            // same as the `Display` impl with role names abbreviated
            (Labeling::Indexed, _)
                => self.to_string()
                .replace("arget", "")
                .replace("ontrol", ""),
        }
    }

    /// Check that all qubit indices are less than `n` and pairwise distinct.
    pub fn check(&self, n: usize) -> Result<()> {
        if let Some(qubit) = self.qubits().find(|q| *q >= n) {
            return Err(Error::QubitOutOfRange { qubit, n });
        }
        if let Some(qubit) = self.qubits().duplicates().next() {
            return Err(Error::DuplicateQubit { qubit });
        }
        Ok(())
    }
}

/// An ordered, non-empty list of gate kinds from which circuits are drawn.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<GateKind>", into = "Vec<GateKind>")]
pub struct GateSet(Vec<GateKind>);

impl TryFrom<Vec<GateKind>> for GateSet {
    type Error = Error;

    fn try_from(kinds: Vec<GateKind>) -> Result<Self> { Self::new(kinds) }
}

impl From<GateSet> for Vec<GateKind> {
    fn from(gate_set: GateSet) -> Self { gate_set.0 }
}

impl fmt::Display for GateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

impl GateSet {
    /// Create a new gate set, dropping repeated kinds.
    ///
    /// Fails if no kinds are given.
    pub fn new<I>(kinds: I) -> Result<Self>
    where I: IntoIterator<Item = GateKind>
    {
        let kinds: Vec<GateKind> = kinds.into_iter().unique().collect();
        if kinds.is_empty() { return Err(Error::EmptyGateSet); }
        Ok(Self(kinds))
    }

    /// H, S, T, and CX.
    pub fn clifford_t() -> Self {
        Self(vec![GateKind::H, GateKind::S, GateKind::T, GateKind::CX])
    }

    pub fn kinds(&self) -> &[GateKind] { &self.0 }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Number of distinct gates that can be placed at a single step of an
    /// `n`-qubit circuit.
    ///
    /// Each single-qubit kind contributes `n` choices and each two-qubit kind
    /// contributes `n (n - 1)` ordered qubit pairs.
    pub fn branching_factor(&self, n: usize) -> u64 {
        let n = n as u64;
        self.0.iter()
            .map(|kind| {
                match kind.arity() {
                    1 => n,
                    _ => n * n.saturating_sub(1),
                }
            })
            .sum()
    }

    /// Number of distinct ordered gate sequences of length `gates` on `n`
    /// qubits.
    pub fn space_size(&self, n: usize, gates: usize) -> Result<u64> {
        let exp: u32
            = gates.try_into()
            .map_err(|_| Error::SpaceTooLarge { qubits: n, gates })?;
        self.branching_factor(n)
            .checked_pow(exp)
            .ok_or(Error::SpaceTooLarge { qubits: n, gates })
    }
}

/// A gate sequence on a fixed number of qubits.
///
/// All gates are guaranteed to act on qubit indices less than `n`, with all
/// two-qubit gate indices non-equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Circuit {
    n: usize,
    gates: Vec<Gate>,
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circuit({})[{}]", self.n, self.gates.iter().join(", "))
    }
}

impl IntoIterator for Circuit {
    type Item = Gate;
    type IntoIter = <Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.gates.into_iter() }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = <&'a Vec<Gate> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.gates.iter() }
}

impl Circuit {
    /// Create a new, empty circuit on `n` qubits.
    ///
    /// Fails if `n < 2`.
    pub fn new(n: usize) -> Result<Self> {
        if n < 2 { return Err(Error::TooFewQubits { n, min: 2 }); }
        Ok(Self { n, gates: Vec::new() })
    }

    /// Convert a series of gates to a new `n`-qubit circuit, verifying every
    /// gate with [`Gate::check`].
    pub fn from_gates<I>(n: usize, gates: I) -> Result<Self>
    where I: IntoIterator<Item = Gate>
    {
        let mut circuit = Self::new(n)?;
        for gate in gates { circuit.push(gate)?; }
        Ok(circuit)
    }

    /// Append a gate to the end of the circuit.
    pub fn push(&mut self, gate: Gate) -> Result<&mut Self> {
        gate.check(self.n)?;
        self.gates.push(gate);
        Ok(self)
    }

    pub fn n(&self) -> usize { self.n }

    pub fn len(&self) -> usize { self.gates.len() }

    pub fn is_empty(&self) -> bool { self.gates.is_empty() }

    pub fn gates(&self) -> &[Gate] { &self.gates }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn roles() {
        let cx = Gate::CX(0, 2);
        assert_eq!(cx.role_of(0), Some(Role::Control));
        assert_eq!(cx.role_of(2), Some(Role::Target));
        assert_eq!(cx.role_of(1), None);
        assert_eq!(Gate::H(1).role_of(1), Some(Role::Target));
        assert_eq!(cx.qubits().collect::<Vec<_>>(), vec![0, 2]);
        assert!(cx.overlaps(&Gate::T(2)));
        assert!(!cx.overlaps(&Gate::T(1)));
    }

    #[test]
    fn labels() {
        assert_eq!(Gate::S(4).label(Labeling::Shape), "S");
        assert_eq!(Gate::CX(1, 0).label(Labeling::Shape), "CX(c,t)");
        assert_eq!(Gate::CX(1, 0).label(Labeling::Indexed), "CX(c=1, t=0)");
        assert_eq!(Gate::H(3).label(Labeling::Indexed), "H(t=3)");
        assert_eq!(
            Gate::CX(0, 1).label(Labeling::Shape),
            Gate::CX(2, 1).label(Labeling::Shape),
        );
    }

    #[test]
    fn circuit_checks_indices() {
        assert!(matches!(
            Circuit::from_gates(3, [Gate::H(0), Gate::T(3)]),
            Err(Error::QubitOutOfRange { qubit: 3, n: 3 }),
        ));
        assert!(matches!(
            Circuit::from_gates(3, [Gate::CX(1, 1)]),
            Err(Error::DuplicateQubit { qubit: 1 }),
        ));
        assert!(matches!(
            Circuit::new(1),
            Err(Error::TooFewQubits { n: 1, min: 2 }),
        ));
        let circuit
            = Circuit::from_gates(3, [Gate::H(0), Gate::CX(0, 2)]).unwrap();
        assert_eq!(circuit.len(), 2);
        assert_eq!(
            circuit.to_string(),
            "Circuit(3)[H(target=0), CX(control=0, target=2)]",
        );
    }

    #[test]
    fn gate_set_combinatorics() {
        let gs = GateSet::clifford_t();
        assert_eq!(gs.to_string(), "[H, S, T, CX]");
        // 3 single-qubit kinds * 3 + 1 two-qubit kind * 3 * 2
        assert_eq!(gs.branching_factor(3), 15);
        assert_eq!(gs.space_size(3, 4).unwrap(), 50625);

        let gs = GateSet::new([GateKind::H, GateKind::T, GateKind::CX, GateKind::H])
            .unwrap();
        assert_eq!(gs.len(), 3);
        assert_eq!(gs.space_size(3, 4).unwrap(), 12_u64.pow(4));
        assert!(matches!(
            gs.space_size(64, 100),
            Err(Error::SpaceTooLarge { .. }),
        ));
        assert!(matches!(GateSet::new([]), Err(Error::EmptyGateSet)));
    }

    #[test]
    fn gate_set_json() {
        let gs = GateSet::clifford_t();
        let json = serde_json::to_string(&gs).unwrap();
        assert_eq!(json, r#"["H","S","T","CX"]"#);
        let back: GateSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, gs);
        assert!(serde_json::from_str::<GateSet>("[]").is_err());
    }
}
