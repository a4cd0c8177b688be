//! Input parameters of an XYZ evolution circuit.

use serde::{Deserialize, Serialize};

use crate::axes::{ActiveAxes, Propagator, is_near_zero};
use crate::error::SpecError;

fn default_true() -> bool {
    true
}

/// Everything needed to build an evolution circuit.
///
/// Built either with the `with_*` methods or deserialized from a YAML/JSON
/// document, where every field except `num_qubits` is optional:
///
/// ```yaml
/// num_qubits: 4
/// coupling: [1.0, 0.0, 1.0]
/// magnetic_field: 0.5
/// final_time: 2.0
/// trotter_num: 8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvolutionSpec {
    num_qubits: u32,
    /// `[Jx, Jy, Jz]`; absent for a purely variational circuit.
    #[serde(default)]
    coupling: Option<[f64; 3]>,
    #[serde(default)]
    magnetic_field: f64,
    #[serde(default)]
    final_time: f64,
    #[serde(default)]
    trotter_num: u32,
    /// Use numeric block angles when a coupling is given.
    #[serde(default = "default_true")]
    bound: bool,
    /// Fence each field layer with full-width barriers.
    #[serde(default = "default_true")]
    barriers: bool,
}

impl EvolutionSpec {
    /// A chain of `num_qubits` sites with every other setting at its default.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            coupling: None,
            magnetic_field: 0.0,
            final_time: 0.0,
            trotter_num: 0,
            bound: true,
            barriers: true,
        }
    }

    /// Set the `[Jx, Jy, Jz]` coupling constants.
    #[must_use]
    pub fn with_coupling(mut self, coupling: [f64; 3]) -> Self {
        self.coupling = Some(coupling);
        self
    }

    /// Set the uniform Z field strength.
    #[must_use]
    pub fn with_magnetic_field(mut self, field: f64) -> Self {
        self.magnetic_field = field;
        self
    }

    /// Set the total simulated time.
    #[must_use]
    pub fn with_final_time(mut self, time: f64) -> Self {
        self.final_time = time;
        self
    }

    /// Set the number of Trotter steps.
    #[must_use]
    pub fn with_trotter_num(mut self, steps: u32) -> Self {
        self.trotter_num = steps;
        self
    }

    /// Request numeric (`true`) or symbolic (`false`) block angles.
    #[must_use]
    pub fn with_bound(mut self, bound: bool) -> Self {
        self.bound = bound;
        self
    }

    /// Enable or disable the barriers around field layers.
    #[must_use]
    pub fn with_barriers(mut self, barriers: bool) -> Self {
        self.barriers = barriers;
        self
    }

    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    pub fn coupling(&self) -> Option<[f64; 3]> {
        self.coupling
    }

    pub fn magnetic_field(&self) -> f64 {
        self.magnetic_field
    }

    pub fn final_time(&self) -> f64 {
        self.final_time
    }

    pub fn trotter_num(&self) -> u32 {
        self.trotter_num
    }

    /// The requested angle mode; see [`EvolutionSpec::is_bound`] for the
    /// effective one.
    pub fn bound(&self) -> bool {
        self.bound
    }

    pub fn barriers(&self) -> bool {
        self.barriers
    }

    /// Whether block angles are numeric. Requires a coupling; without one
    /// the circuit is always symbolic.
    pub fn is_bound(&self) -> bool {
        self.bound && self.coupling.is_some()
    }

    /// Time per Trotter step, `0` when there are no steps.
    pub fn time_delta(&self) -> f64 {
        if self.trotter_num == 0 {
            0.0
        } else {
            self.final_time / f64::from(self.trotter_num)
        }
    }

    /// Angle of the per-step field rotation, `h·Δt`.
    pub fn field_angle(&self) -> f64 {
        self.magnetic_field * self.time_delta()
    }

    /// Whether field layers are emitted: the rotation angle is not near zero.
    pub fn has_field(&self) -> bool {
        !is_near_zero(self.field_angle())
    }

    /// Axes with nonzero coupling; all three when no coupling is given.
    pub fn active_axes(&self) -> ActiveAxes {
        self.coupling
            .as_ref()
            .map_or_else(ActiveAxes::all, ActiveAxes::from_coupling)
    }

    /// Check the specification and pick its block propagator.
    pub fn validate(&self) -> Result<Propagator, SpecError> {
        if self.num_qubits == 0 {
            return Err(SpecError::ZeroQubits);
        }
        if let Some(coupling) = &self.coupling {
            if coupling.iter().any(|j| !j.is_finite()) {
                return Err(SpecError::NonFinite("coupling"));
            }
        }
        if !self.magnetic_field.is_finite() {
            return Err(SpecError::NonFinite("magnetic_field"));
        }
        if !self.final_time.is_finite() {
            return Err(SpecError::NonFinite("final_time"));
        }
        let axes = self.active_axes();
        let propagator = axes.propagator()?;

        let time_delta = self.time_delta();
        if !time_delta.is_finite() {
            return Err(SpecError::NonFinite("time_delta"));
        }
        if !self.field_angle().is_finite() {
            return Err(SpecError::NonFinite("field angle"));
        }
        if let Some(coupling) = &self.coupling {
            if self.bound
                && axes
                    .select(coupling)
                    .iter()
                    .any(|j| !(time_delta * j).is_finite())
            {
                return Err(SpecError::NonFinite("block angle"));
            }
        }
        Ok(propagator)
    }
}
