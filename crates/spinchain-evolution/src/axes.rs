//! Coupling axes and the propagator they select.

use std::fmt;

use crate::error::SpecError;

/// Absolute tolerance below which a coupling constant counts as zero.
pub const ZERO_TOLERANCE: f64 = 1e-8;

/// Whether `value` is zero within [`ZERO_TOLERANCE`].
#[inline]
pub fn is_near_zero(value: f64) -> bool {
    value.abs() <= ZERO_TOLERANCE
}

/// One Pauli axis of the nearest-neighbour coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X⊗X coupling.
    X,
    /// Y⊗Y coupling.
    Y,
    /// Z⊗Z coupling.
    Z,
}

impl Axis {
    /// All axes in coupling-vector order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Position in a `[Jx, Jy, Jz]` triple.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Single-letter label.
    #[inline]
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

/// The set of axes with nonzero coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ActiveAxes {
    mask: [bool; 3],
}

impl ActiveAxes {
    /// All three axes active.
    pub fn all() -> Self {
        Self { mask: [true; 3] }
    }

    /// Axes whose coupling constant is not near zero.
    pub fn from_coupling(coupling: &[f64; 3]) -> Self {
        Self {
            mask: coupling.map(|j| !is_near_zero(j)),
        }
    }

    /// Check whether `axis` is active.
    #[inline]
    pub fn contains(self, axis: Axis) -> bool {
        self.mask[axis.index()]
    }

    /// Number of active axes.
    pub fn len(self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    /// Whether no axis is active.
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Active axes in X, Y, Z order.
    pub fn iter(self) -> impl Iterator<Item = Axis> {
        Axis::ALL.into_iter().filter(move |&a| self.contains(a))
    }

    /// Label such as `"XZ"` or `"XYZ"`.
    pub fn label(self) -> String {
        self.iter().map(Axis::letter).collect()
    }

    /// The coupling constants of the active axes, in X, Y, Z order.
    pub fn select(self, coupling: &[f64; 3]) -> Vec<f64> {
        self.iter().map(|a| coupling[a.index()]).collect()
    }

    /// Pick the block propagator for this axis set.
    pub fn propagator(self) -> Result<Propagator, SpecError> {
        match self.len() {
            0 => Err(SpecError::NoActiveAxes),
            2 if self.contains(Axis::X) && self.contains(Axis::Z) => Ok(Propagator::TwoAxis),
            2 => Err(SpecError::UnsupportedAxisPair(self.label())),
            3 => Ok(Propagator::ThreeAxis),
            n => Err(SpecError::UnsupportedAxisCount(n)),
        }
    }
}

impl fmt::Display for ActiveAxes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Two-site block used for every bond of the brick wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Propagator {
    /// `Uxz(γ, δ)`, for X and Z coupling.
    TwoAxis,
    /// `Uxyz(θx, θy, θz)`, for full XYZ coupling.
    ThreeAxis,
}

impl Propagator {
    /// Angles per block.
    #[inline]
    pub fn num_params(self) -> u32 {
        match self {
            Propagator::TwoAxis => 2,
            Propagator::ThreeAxis => 3,
        }
    }

    /// Name of the gate this propagator appends.
    pub fn gate_name(self) -> &'static str {
        match self {
            Propagator::TwoAxis => "uxz",
            Propagator::ThreeAxis => "uxyz",
        }
    }
}

impl fmt::Display for Propagator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.gate_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_coupling() {
        assert_eq!(ActiveAxes::from_coupling(&[1.0, 0.0, 1.0]).label(), "XZ");
        assert_eq!(ActiveAxes::from_coupling(&[0.5, -2.0, 1.0]).label(), "XYZ");
        assert_eq!(ActiveAxes::from_coupling(&[0.0, 0.0, 0.0]).label(), "");
        assert_eq!(ActiveAxes::all().to_string(), "XYZ");
    }

    #[test]
    fn test_tolerance() {
        let axes = ActiveAxes::from_coupling(&[1.0, 1e-9, 1.0]);
        assert!(!axes.contains(Axis::Y));
        assert_eq!(axes.select(&[1.0, 1e-9, 2.0]), vec![1.0, 2.0]);

        let axes = ActiveAxes::from_coupling(&[1.0, 1e-6, 1.0]);
        assert!(axes.contains(Axis::Y));
    }

    #[test]
    fn test_propagator_choice() {
        let pick = |j: [f64; 3]| ActiveAxes::from_coupling(&j).propagator();
        assert_eq!(pick([1.0, 0.0, 1.0]), Ok(Propagator::TwoAxis));
        assert_eq!(pick([1.0, 1.0, 1.0]), Ok(Propagator::ThreeAxis));
        assert_eq!(pick([0.0, 0.0, 0.0]), Err(SpecError::NoActiveAxes));
        assert_eq!(pick([0.0, 0.0, 1.0]), Err(SpecError::UnsupportedAxisCount(1)));
        assert_eq!(
            pick([1.0, 1.0, 0.0]),
            Err(SpecError::UnsupportedAxisPair("XY".into()))
        );
        assert_eq!(
            pick([0.0, 1.0, 1.0]),
            Err(SpecError::UnsupportedAxisPair("YZ".into()))
        );
    }

    #[test]
    fn test_propagator_params() {
        assert_eq!(Propagator::TwoAxis.num_params(), 2);
        assert_eq!(Propagator::ThreeAxis.num_params(), 3);
        assert_eq!(Propagator::ThreeAxis.to_string(), "uxyz");
    }
}
