//! Two-site time-evolution blocks for the XYZ spin chain.
//!
//! Both blocks are exact propagators of a single bond:
//!
//!   Uxz(γ, δ)        = exp(-i (γ X⊗X + δ Z⊗Z))
//!   Uxyz(θx, θy, θz) = exp(-i (θx X⊗X + θy Y⊗Y + θz Z⊗Z))
//!
//! Since X⊗X, Y⊗Y and Z⊗Z commute pairwise, each block factors exactly into
//! `RXX(2θx) · RYY(2θy) · RZZ(2θz)`, which is what [`PropagatorGate::decompose`]
//! returns. In the computational basis the unitary splits into two 2×2 blocks,
//! on {|00⟩, |11⟩} and {|01⟩, |10⟩}, giving the closed form used by
//! [`PropagatorGate::matrix`].

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::gate::{Gate, StandardGate};
use crate::parameter::ParameterExpression;

/// Propagator for simultaneous X and Z coupling between two sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UxzGate {
    /// X⊗X angle.
    pub gamma: ParameterExpression,
    /// Z⊗Z angle.
    pub delta: ParameterExpression,
}

impl UxzGate {
    /// Create a block from its two angles.
    pub fn new(gamma: impl Into<ParameterExpression>, delta: impl Into<ParameterExpression>) -> Self {
        Self {
            gamma: gamma.into(),
            delta: delta.into(),
        }
    }
}

/// Propagator for full XYZ coupling between two sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UxyzGate {
    /// X⊗X angle.
    pub theta_x: ParameterExpression,
    /// Y⊗Y angle.
    pub theta_y: ParameterExpression,
    /// Z⊗Z angle.
    pub theta_z: ParameterExpression,
}

impl UxyzGate {
    /// Create a block from its three angles.
    pub fn new(
        theta_x: impl Into<ParameterExpression>,
        theta_y: impl Into<ParameterExpression>,
        theta_z: impl Into<ParameterExpression>,
    ) -> Self {
        Self {
            theta_x: theta_x.into(),
            theta_y: theta_y.into(),
            theta_z: theta_z.into(),
        }
    }
}

/// One of the two propagator blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropagatorGate {
    /// Two-axis block.
    Uxz(UxzGate),
    /// Three-axis block.
    Uxyz(UxyzGate),
}

impl PropagatorGate {
    /// Instruction name.
    pub fn name(&self) -> &'static str {
        match self {
            PropagatorGate::Uxz(_) => "uxz",
            PropagatorGate::Uxyz(_) => "uxyz",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            PropagatorGate::Uxz(_) => "Uxz",
            PropagatorGate::Uxyz(_) => "Uxyz",
        }
    }

    /// Angles in declaration order.
    pub fn parameters(&self) -> Vec<&ParameterExpression> {
        match self {
            PropagatorGate::Uxz(g) => vec![&g.gamma, &g.delta],
            PropagatorGate::Uxyz(g) => vec![&g.theta_x, &g.theta_y, &g.theta_z],
        }
    }

    /// Rebuild the block with every angle passed through `f`.
    #[must_use]
    pub fn map_params(&self, f: impl Fn(&ParameterExpression) -> ParameterExpression) -> Self {
        match self {
            PropagatorGate::Uxz(g) => PropagatorGate::Uxz(UxzGate::new(f(&g.gamma), f(&g.delta))),
            PropagatorGate::Uxyz(g) => PropagatorGate::Uxyz(UxyzGate::new(
                f(&g.theta_x),
                f(&g.theta_y),
                f(&g.theta_z),
            )),
        }
    }

    /// Per-axis angles `[x, y, z]`; `None` for an axis the block does not couple.
    fn axis_angles(&self) -> [Option<&ParameterExpression>; 3] {
        match self {
            PropagatorGate::Uxz(g) => [Some(&g.gamma), None, Some(&g.delta)],
            PropagatorGate::Uxyz(g) => [Some(&g.theta_x), Some(&g.theta_y), Some(&g.theta_z)],
        }
    }

    /// Exact factorisation into standard two-qubit rotations.
    pub fn decompose(&self) -> Vec<StandardGate> {
        let [x, y, z] = self.axis_angles();
        let twice = |p: &ParameterExpression| p.clone().scaled(2.0);
        let mut gates = Vec::with_capacity(3);
        gates.extend(x.map(|p| StandardGate::RXX(twice(p))));
        gates.extend(y.map(|p| StandardGate::RYY(twice(p))));
        gates.extend(z.map(|p| StandardGate::RZZ(twice(p))));
        gates
    }

    /// Row-major 4×4 unitary, or `None` while any angle is symbolic.
    pub fn matrix(&self) -> Option<Vec<Complex64>> {
        let [x, y, z] = self.axis_angles();
        let value = |p: Option<&ParameterExpression>| p.map_or(Some(0.0), ParameterExpression::as_f64);
        Some(xyz_unitary(value(x)?, value(y)?, value(z)?))
    }
}

/// `exp(-i (a X⊗X + b Y⊗Y + c Z⊗Z))` in the computational basis.
fn xyz_unitary(a: f64, b: f64, c: f64) -> Vec<Complex64> {
    let zero = Complex64::new(0.0, 0.0);
    let minus_i = Complex64::new(0.0, -1.0);
    // {|00⟩, |11⟩}: c·I + (a - b)·σx
    let even = Complex64::from_polar(1.0, -c);
    // {|01⟩, |10⟩}: -c·I + (a + b)·σx
    let odd = Complex64::from_polar(1.0, c);

    let d_even = even * (a - b).cos();
    let o_even = even * minus_i * (a - b).sin();
    let d_odd = odd * (a + b).cos();
    let o_odd = odd * minus_i * (a + b).sin();

    vec![
        d_even, zero, zero, o_even, //
        zero, d_odd, o_odd, zero, //
        zero, o_odd, d_odd, zero, //
        o_even, zero, zero, d_even,
    ]
}

impl From<UxzGate> for PropagatorGate {
    fn from(gate: UxzGate) -> Self {
        PropagatorGate::Uxz(gate)
    }
}

impl From<UxyzGate> for PropagatorGate {
    fn from(gate: UxyzGate) -> Self {
        PropagatorGate::Uxyz(gate)
    }
}

impl From<UxzGate> for Gate {
    fn from(gate: UxzGate) -> Self {
        Gate::propagator(gate.into())
    }
}

impl From<UxyzGate> for Gate {
    fn from(gate: UxyzGate) -> Self {
        Gate::propagator(gate.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn assert_close(m: &[Complex64], expected: &[Complex64]) {
        for (got, want) in m.iter().zip(expected) {
            assert!((got - want).norm() < 1e-12, "{got} != {want}");
        }
    }

    fn is_unitary(m: &[Complex64]) -> bool {
        (0..4).all(|r| {
            (0..4).all(|c| {
                let dot: Complex64 = (0..4).map(|k| m[r * 4 + k] * m[c * 4 + k].conj()).sum();
                let want = if r == c { 1.0 } else { 0.0 };
                (dot - Complex64::new(want, 0.0)).norm() < 1e-12
            })
        })
    }

    #[test]
    fn test_zero_angles_give_identity() {
        let m = PropagatorGate::from(UxyzGate::new(0.0, 0.0, 0.0))
            .matrix()
            .unwrap();
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let mut id = vec![zero; 16];
        for i in 0..4 {
            id[i * 5] = one;
        }
        assert_close(&m, &id);
    }

    #[test]
    fn test_quarter_turn_xx_is_minus_i_xx() {
        let m = PropagatorGate::from(UxzGate::new(FRAC_PI_2, 0.0))
            .matrix()
            .unwrap();
        let zero = Complex64::new(0.0, 0.0);
        let mi = Complex64::new(0.0, -1.0);
        let expected = vec![
            zero, zero, zero, mi, //
            zero, zero, mi, zero, //
            zero, mi, zero, zero, //
            mi, zero, zero, zero,
        ];
        assert_close(&m, &expected);
    }

    #[test]
    fn test_zz_only_is_diagonal_phase() {
        let c = 0.3;
        let m = PropagatorGate::from(UxzGate::new(0.0, c)).matrix().unwrap();
        assert!((m[0] - Complex64::from_polar(1.0, -c)).norm() < 1e-12);
        assert!((m[5] - Complex64::from_polar(1.0, c)).norm() < 1e-12);
        assert!(m[3].norm() < 1e-12);
    }

    #[test]
    fn test_generic_angles_are_unitary() {
        let m = PropagatorGate::from(UxyzGate::new(0.7, -0.2, 1.3))
            .matrix()
            .unwrap();
        assert!(is_unitary(&m));
    }

    #[test]
    fn test_symbolic_block_has_no_matrix() {
        let gate = PropagatorGate::from(UxzGate::new(ParameterExpression::symbol("g"), 1.0));
        assert!(gate.matrix().is_none());
    }

    #[test]
    fn test_decompose_doubles_angles() {
        let gates = PropagatorGate::from(UxzGate::new(0.25, 0.5)).decompose();
        assert_eq!(gates.len(), 2);
        assert_eq!(gates[0].name(), "rxx");
        assert_eq!(gates[0].parameters()[0].as_f64(), Some(0.5));
        assert_eq!(gates[1].name(), "rzz");
        assert_eq!(gates[1].parameters()[0].as_f64(), Some(1.0));

        let names: Vec<_> = PropagatorGate::from(UxyzGate::new(1.0, 1.0, 1.0))
            .decompose()
            .iter()
            .map(StandardGate::name)
            .collect();
        assert_eq!(names, vec!["rxx", "ryy", "rzz"]);
    }
}
