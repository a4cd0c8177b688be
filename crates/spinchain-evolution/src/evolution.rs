//! The XYZ evolution circuit builder.
//!
//! Approximates `exp(-i H t)` for
//!
//!   H = Σ_i (Jx X_i X_{i+1} + Jy Y_i Y_{i+1} + Jz Z_i Z_{i+1}) + h Σ_i Z_i
//!
//! by repeating a brick-wall layer pair `trotter_num` times: each step applies
//! `Rz(h·Δt)` on all sites, then one block per even bond, then one block per
//! odd bond, where `Δt = t / trotter_num` and each block is the exact bond
//! propagator with angles `Δt·J`.

use spinchain_ir::{
    Circuit, Gate, Instruction, IrResult, NodeIndex, ParameterExpression, ParameterVector,
    QubitId, UxyzGate, UxzGate,
};
use tracing::{debug, trace};

use crate::axes::{ActiveAxes, Propagator};
use crate::error::{EvolutionError, EvolutionResult};
use crate::params::ParameterSource;
use crate::schedule::TrotterSchedule;
use crate::spec::EvolutionSpec;

/// Name given to every built circuit.
pub const CIRCUIT_NAME: &str = "xyz_evolution";

/// A brick-wall Trotter circuit for the XYZ Heisenberg chain.
///
/// The circuit is complete once [`XyzEvolution::new`] returns. The block
/// appliers stay available for appending further blocks by hand.
#[derive(Debug, Clone)]
pub struct XyzEvolution {
    spec: EvolutionSpec,
    axes: ActiveAxes,
    propagator: Propagator,
    time_delta: f64,
    schedule: TrotterSchedule,
    parameters: Vec<ParameterVector>,
    circuit: Circuit,
}

impl XyzEvolution {
    /// Validate `spec` and lay down the whole circuit.
    pub fn new(spec: EvolutionSpec) -> EvolutionResult<Self> {
        let propagator = spec.validate()?;
        let axes = spec.active_axes();
        let time_delta = spec.time_delta();
        let schedule =
            TrotterSchedule::new(spec.num_qubits(), spec.trotter_num(), spec.has_field());

        let source = match spec.coupling() {
            Some(coupling) if spec.is_bound() => ParameterSource::bound(
                axes.select(&coupling)
                    .into_iter()
                    .map(|j| time_delta * j)
                    .collect(),
            ),
            _ => ParameterSource::free(schedule.num_blocks(), propagator.num_params()),
        };

        let mut evolution = Self {
            circuit: Circuit::with_size(CIRCUIT_NAME, spec.num_qubits()),
            spec,
            axes,
            propagator,
            time_delta,
            schedule,
            parameters: vec![],
        };
        evolution.parameters = evolution.lay_down(source)?;
        Ok(evolution)
    }

    /// Append `Uxz(γ, δ) = exp(-i (γ XX + δ ZZ))` on two qubits.
    pub fn uxz(
        &mut self,
        gamma: impl Into<ParameterExpression>,
        delta: impl Into<ParameterExpression>,
        qubit1: QubitId,
        qubit2: QubitId,
    ) -> IrResult<NodeIndex> {
        self.circuit.append(Instruction::two_qubit_gate(
            UxzGate::new(gamma, delta),
            qubit1,
            qubit2,
        ))
    }

    /// Append `Uxyz(θx, θy, θz) = exp(-i (θx XX + θy YY + θz ZZ))` on two qubits.
    pub fn uxyz(
        &mut self,
        theta_x: impl Into<ParameterExpression>,
        theta_y: impl Into<ParameterExpression>,
        theta_z: impl Into<ParameterExpression>,
        qubit1: QubitId,
        qubit2: QubitId,
    ) -> IrResult<NodeIndex> {
        self.circuit.append(Instruction::two_qubit_gate(
            UxyzGate::new(theta_x, theta_y, theta_z),
            qubit1,
            qubit2,
        ))
    }

    /// Walk the schedule, returning the placeholder vectors that were used.
    fn lay_down(&mut self, mut source: ParameterSource) -> EvolutionResult<Vec<ParameterVector>> {
        let expected = self.schedule.num_blocks();
        let field_angle = self.spec.field_angle();
        let barriers = self.spec.barriers();

        debug!(
            num_qubits = self.spec.num_qubits(),
            trotter_num = self.spec.trotter_num(),
            axes = %self.axes,
            propagator = %self.propagator,
            bound = self.spec.is_bound(),
            time_delta = self.time_delta,
            blocks = expected,
            "synthesising XYZ evolution circuit"
        );

        let circuit = &mut self.circuit;
        let mut produced = 0;
        for layer in self.schedule.layers() {
            trace!(
                layer = layer.index,
                parity = layer.parity,
                field = layer.field,
                blocks = layer.pairs.len(),
                "laying down Trotter layer"
            );

            if layer.field {
                if barriers {
                    circuit.barrier_all()?;
                }
                for q in 0..self.spec.num_qubits() {
                    circuit.rz(field_angle, QubitId(q))?;
                }
                if barriers {
                    circuit.barrier_all()?;
                }
            }

            for &(q1, q2) in &layer.pairs {
                let params = source
                    .next_block(layer.parity)
                    .ok_or(EvolutionError::BlockCountMismatch {
                        expected,
                        produced: produced + 1,
                    })?;
                circuit.append(Instruction::two_qubit_gate(
                    block(self.propagator, &params)?,
                    q1,
                    q2,
                ))?;
                produced += 1;
            }
        }

        if produced != expected {
            return Err(EvolutionError::BlockCountMismatch { expected, produced });
        }

        debug!(
            gates = circuit.size(),
            depth = circuit.depth(),
            "XYZ evolution circuit complete"
        );
        Ok(source.into_vectors())
    }

    pub fn spec(&self) -> &EvolutionSpec {
        &self.spec
    }

    /// Axes with nonzero coupling, rendered as e.g. `"XZ"`.
    pub fn active_axes(&self) -> ActiveAxes {
        self.axes
    }

    pub fn propagator(&self) -> Propagator {
        self.propagator
    }

    pub fn time_delta(&self) -> f64 {
        self.time_delta
    }

    pub fn schedule(&self) -> &TrotterSchedule {
        &self.schedule
    }

    /// Number of blocks laid down by the constructor.
    pub fn num_blocks(&self) -> usize {
        self.schedule.num_blocks()
    }

    /// Placeholder vectors of a symbolic circuit, one per block in order.
    /// Empty for a bound circuit.
    pub fn parameter_vectors(&self) -> &[ParameterVector] {
        &self.parameters
    }

    /// The block angles every bound block receives: `Δt·J` over the active
    /// axes. `None` without a coupling.
    pub fn block_angles(&self) -> Option<Vec<f64>> {
        let coupling = self.spec.coupling()?;
        Some(
            self.axes
                .select(&coupling)
                .into_iter()
                .map(|j| self.time_delta * j)
                .collect(),
        )
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }
}

/// Build the propagator gate for one block.
fn block(propagator: Propagator, params: &[ParameterExpression]) -> EvolutionResult<Gate> {
    match (propagator, params) {
        (Propagator::TwoAxis, [gamma, delta]) => Ok(UxzGate::new(gamma, delta).into()),
        (Propagator::ThreeAxis, [x, y, z]) => Ok(UxyzGate::new(x, y, z).into()),
        _ => Err(spinchain_ir::IrError::ParameterCountMismatch {
            expected: propagator.num_params() as usize,
            got: params.len(),
        }
        .into()),
    }
}
