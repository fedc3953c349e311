//! Deciding whether two gate applications commute.
//!
//! Two oracles are provided:
//! - [`CliffordTable`] is a fixed rule table over H, S, T, and CX, keyed by
//!   the pair of gate kinds and the role a shared qubit plays in each gate.
//! - [`MatrixRule`] checks commutation qubit by qubit using the 2×2 matrix
//!   each gate applies to its target, so that it extends to any
//!   single-target gate whose matrix is known.
//!
//! On the H, S, T, CX vocabulary the two agree. Neither handles `Swap`.

use nalgebra as na;
use num_complex::Complex64 as C64;
use once_cell::sync::Lazy;
use crate::{
    error::{ Error, Result },
    gate::{ Gate, GateKind, Role },
};

/// A commutation oracle.
pub trait Commute {
    /// Return `true` if applying `a` then `b` has the same effect as applying
    /// `b` then `a`.
    ///
    /// Fails if either gate lies outside the vocabulary of the oracle.
    fn commutes(&self, a: &Gate, b: &Gate) -> Result<bool>;

    /// Fail if `gate` lies outside the vocabulary of the oracle.
    fn check(&self, gate: &Gate) -> Result<()>;
}

impl<C> Commute for &C
where C: Commute + ?Sized
{
    fn commutes(&self, a: &Gate, b: &Gate) -> Result<bool> {
        (**self).commutes(a, b)
    }

    fn check(&self, gate: &Gate) -> Result<()> { (**self).check(gate) }
}

/// Decide commutation of `a` and `b` with the [`CliffordTable`].
pub fn commutes(a: &Gate, b: &Gate) -> Result<bool> {
    CliffordTable.commutes(a, b)
}

/// Rule table for the Clifford+T vocabulary {H, S, T, CX}.
///
/// S and T are diagonal, H is the only basis-changing single-qubit gate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CliffordTable;

impl CliffordTable {
    fn check_supported(gate: &Gate) -> Result<()> {
        match gate.kind() {
            GateKind::H | GateKind::S | GateKind::T | GateKind::CX => Ok(()),
            kind => Err(Error::UnsupportedGate { kind }),
        }
    }
}

impl Commute for CliffordTable {
    fn commutes(&self, a: &Gate, b: &Gate) -> Result<bool> {
        self.check(a)?;
        self.check(b)?;
        if !a.overlaps(b) { return Ok(true); }
        match (*a, *b) {
            (Gate::S(_) | Gate::T(_), Gate::S(_) | Gate::T(_))
                => Ok(true),
            (Gate::H(_), Gate::H(_))
                => Ok(true),
            (Gate::S(_) | Gate::T(_), Gate::H(_))
            | (Gate::H(_), Gate::S(_) | Gate::T(_))
                => Ok(false),
            // diagonal gates pass through the control line only
            (Gate::S(k) | Gate::T(k), Gate::CX(c, _))
            | (Gate::CX(c, _), Gate::S(k) | Gate::T(k))
                => Ok(k == c),
            (Gate::H(_), Gate::CX(..)) | (Gate::CX(..), Gate::H(_))
                => Ok(false),
            (Gate::CX(c1, t1), Gate::CX(c2, t2))
                => Ok(c1 != t2 && t1 != c2),
            _ => Err(Error::NoRule { a: a.kind(), b: b.kind() }),
        }
    }

    fn check(&self, gate: &Gate) -> Result<()> { Self::check_supported(gate) }
}

/// Per-qubit commutation check built from target matrices.
///
/// For every qubit of `a` that `b` also acts on:
/// - target/target: the two target matrices must commute;
/// - target/control: the target matrix must commute with both Z-basis
///   projectors;
/// - control/control: always fine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MatrixRule;

const EPSILON: f64 = 1e-12;

impl MatrixRule {
    /// Return the matrix a gate applies to its target qubit.
    fn target_matrix(gate: &Gate) -> Result<&'static na::Matrix2<C64>> {
        match gate.kind() {
            GateKind::H => Ok(Lazy::force(&MAT_H)),
            GateKind::S => Ok(Lazy::force(&MAT_S)),
            GateKind::T => Ok(Lazy::force(&MAT_T)),
            GateKind::CX => Ok(Lazy::force(&MAT_X)),
            kind => Err(Error::UnsupportedGate { kind }),
        }
    }

    fn commutes_on_qubit(a: &Gate, b: &Gate, q: usize) -> Result<bool> {
        match (a.role_of(q), b.role_of(q)) {
            (None, _) | (_, None) => Ok(true),
            (Some(Role::Target), Some(Role::Target))
                => Ok(matrices_commute(
                    Self::target_matrix(a)?, Self::target_matrix(b)?)),
            (Some(Role::Target), Some(Role::Control))
                => Ok(commutes_with_projectors(Self::target_matrix(a)?)),
            (Some(Role::Control), Some(Role::Target))
                => Ok(commutes_with_projectors(Self::target_matrix(b)?)),
            (Some(Role::Control), Some(Role::Control))
                => Ok(true),
        }
    }
}

impl Commute for MatrixRule {
    fn commutes(&self, a: &Gate, b: &Gate) -> Result<bool> {
        self.check(a)?;
        self.check(b)?;
        for q in a.qubits() {
            if !Self::commutes_on_qubit(a, b, q)? { return Ok(false); }
        }
        Ok(true)
    }

    fn check(&self, gate: &Gate) -> Result<()> {
        Self::target_matrix(gate).map(|_| ())
    }
}

fn matrices_commute(a: &na::Matrix2<C64>, b: &na::Matrix2<C64>) -> bool {
    (a * b - b * a).norm() < EPSILON
}

fn commutes_with_projectors(a: &na::Matrix2<C64>) -> bool {
    matrices_commute(a, Lazy::force(&PROJ_0))
        && matrices_commute(a, Lazy::force(&PROJ_1))
}

const ZERO: C64 = C64 { re: 0.0, im: 0.0 };
const ONE: C64 = C64 { re: 1.0, im: 0.0 };

/// Hadamard
pub static MAT_H: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| {
        use std::f64::consts::FRAC_1_SQRT_2;
        let ort2 = C64::from(FRAC_1_SQRT_2);
        na::Matrix2::new(ort2, ort2, ort2, -ort2)
    });

/// π/2 phase
pub static MAT_S: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| na::Matrix2::new(ONE, ZERO, ZERO, C64::i()));

/// π/4 phase
pub static MAT_T: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| {
        use std::f64::consts::FRAC_PI_4;
        na::Matrix2::new(ONE, ZERO, ZERO, C64::cis(FRAC_PI_4))
    });

/// Pauli X
pub static MAT_X: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| na::Matrix2::new(ZERO, ONE, ONE, ZERO));

/// ∣0⟩⟨0∣
pub static PROJ_0: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| na::Matrix2::new(ONE, ZERO, ZERO, ZERO));

/// ∣1⟩⟨1∣
pub static PROJ_1: Lazy<na::Matrix2<C64>> =
    Lazy::new(|| na::Matrix2::new(ZERO, ZERO, ZERO, ONE));
