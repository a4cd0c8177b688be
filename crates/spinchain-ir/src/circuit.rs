//! High-level circuit builder API.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::dag::{CircuitDag, NodeIndex};
use crate::draw;
use crate::error::{IrError, IrResult};
use crate::gate::{Gate, GateKind, StandardGate};
use crate::instruction::{Instruction, InstructionKind};
use crate::parameter::ParameterExpression;
use crate::qubit::QubitId;

/// A quantum circuit over a fixed chain of qubits.
///
/// Gates are appended through the fluent helpers (`h`, `rz`, `cx`, ...) or
/// through [`Circuit::append`], which hands back the node of the new
/// instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "CircuitData", try_from = "CircuitData")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit, in ascending order.
    qubits: Vec<QubitId>,
    /// The underlying DAG representation.
    dag: CircuitDag,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            dag: CircuitDag::new(),
        }
    }

    /// Create a circuit with a given number of qubits.
    pub fn with_size(name: impl Into<String>, num_qubits: u32) -> Self {
        let mut circuit = Self::new(name);
        for _ in 0..num_qubits {
            circuit.add_qubit();
        }
        circuit
    }

    /// Add a single qubit at the end of the chain.
    pub fn add_qubit(&mut self) -> QubitId {
        let id = QubitId(u32::try_from(self.qubits.len()).unwrap_or(u32::MAX));
        self.qubits.push(id);
        self.dag.add_qubit(id);
        id
    }

    /// Append an instruction and return its node.
    pub fn append(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        self.dag.apply(instruction)
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::H, qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag
            .apply(Instruction::single_qubit_gate(StandardGate::X, qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation gate.
    pub fn rx(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(
            StandardGate::Rx(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Ry rotation gate.
    pub fn ry(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(
            StandardGate::Ry(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    /// Apply Rz rotation gate.
    pub fn rz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        qubit: QubitId,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::single_qubit_gate(
            StandardGate::Rz(theta.into()),
            qubit,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))?;
        Ok(self)
    }

    /// Apply RZZ (ZZ rotation) gate.
    pub fn rzz(
        &mut self,
        theta: impl Into<ParameterExpression>,
        q1: QubitId,
        q2: QubitId,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::two_qubit_gate(
            StandardGate::RZZ(theta.into()),
            q1,
            q2,
        ))?;
        Ok(self)
    }

    // =========================================================================
    // Other operations
    // =========================================================================

    /// Apply an arbitrary gate.
    pub fn gate(
        &mut self,
        gate: impl Into<Gate>,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::gate(gate, qubits))?;
        Ok(self)
    }

    /// Apply a barrier to specified qubits.
    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Apply a barrier to all qubits.
    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        let qubits = self.qubits.clone();
        self.dag.apply(Instruction::barrier(qubits))?;
        Ok(self)
    }

    /// Append every instruction of `other`, qubit `i` of `other` landing on
    /// qubit `i` of `self`.
    pub fn compose(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits() > self.num_qubits() {
            return Err(IrError::CompositionWidth {
                other: other.num_qubits(),
                target: self.num_qubits(),
            });
        }
        for inst in other.instructions() {
            self.dag.apply(inst.clone())?;
        }
        Ok(self)
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Names of all free parameters, in order of first appearance.
    pub fn parameters(&self) -> Vec<String> {
        let mut names = vec![];
        for gate in self.instructions().filter_map(Instruction::as_gate) {
            for param in gate.parameters() {
                param.collect_symbols(&mut names);
            }
        }
        let mut seen = FxHashSet::default();
        names.retain(|name| seen.insert(name.clone()));
        names
    }

    /// Check if any gate still carries a symbolic parameter.
    pub fn is_parameterized(&self) -> bool {
        self.instructions()
            .filter_map(Instruction::as_gate)
            .any(Gate::is_parameterized)
    }

    /// Return a copy with the named parameters replaced by values.
    ///
    /// Parameters not mentioned stay symbolic. Naming a parameter the circuit
    /// does not contain is an error.
    pub fn bind_parameters<'a>(
        &self,
        bindings: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> IrResult<Circuit> {
        let known: FxHashSet<String> = self.parameters().into_iter().collect();
        let mut values = FxHashMap::default();
        for (name, value) in bindings {
            if !known.contains(name) {
                return Err(IrError::UnknownParameter(name.to_string()));
            }
            values.insert(name.to_string(), value);
        }
        self.map_gates(|gate| {
            vec![gate.map_params(|p| p.bind_all(&values).simplify())]
        })
    }

    /// Return a copy with every free parameter bound positionally, in the
    /// order reported by [`Circuit::parameters`].
    pub fn assign_parameters(&self, values: &[f64]) -> IrResult<Circuit> {
        let names = self.parameters();
        if names.len() != values.len() {
            return Err(IrError::ParameterCountMismatch {
                expected: names.len(),
                got: values.len(),
            });
        }
        self.bind_parameters(names.iter().map(String::as_str).zip(values.iter().copied()))
    }

    /// Return a copy where every propagator block is replaced by its exact
    /// RXX/RYY/RZZ factorisation.
    pub fn decompose_propagators(&self) -> IrResult<Circuit> {
        self.map_gates(|gate| match &gate.kind {
            GateKind::Propagator(p) => p.decompose().into_iter().map(Gate::standard).collect(),
            GateKind::Standard(_) => vec![gate.clone()],
        })
    }

    /// Rebuild the circuit, expanding each gate into zero or more gates on the
    /// same qubits. Barriers are copied as they are.
    fn map_gates(&self, mut f: impl FnMut(&Gate) -> Vec<Gate>) -> IrResult<Circuit> {
        let mut out = Circuit::with_size(self.name.clone(), self.num_qubits_u32());
        for inst in self.instructions() {
            match &inst.kind {
                InstructionKind::Gate(gate) => {
                    for replacement in f(gate) {
                        out.append(Instruction::gate(replacement, inst.qubits.iter().copied()))?;
                    }
                }
                InstructionKind::Barrier => {
                    out.append(inst.clone())?;
                }
            }
        }
        Ok(out)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn num_qubits_u32(&self) -> u32 {
        self.qubits.len() as u32
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Get the circuit depth (barriers excluded).
    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    /// Number of gate instructions (barriers excluded).
    pub fn size(&self) -> usize {
        self.instructions().filter(|i| i.is_gate()).count()
    }

    /// Instructions in the order they were appended.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.dag.ops().map(|(_, inst)| inst)
    }

    /// Look up the instruction behind a node handle.
    pub fn instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.dag.get_instruction(node)
    }

    /// Count of instructions per name.
    pub fn count_ops(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for inst in self.instructions() {
            *counts.entry(inst.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    // =========================================================================
    // Rendering and serialization
    // =========================================================================

    /// Render the circuit as a text diagram.
    pub fn draw(&self) -> String {
        draw::draw(self)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> IrResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rebuild a circuit from JSON produced by [`Circuit::to_json`].
    pub fn from_json(source: &str) -> IrResult<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.draw())
    }
}

impl PartialEq for Circuit {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.qubits == other.qubits
            && self.instructions().eq(other.instructions())
    }
}

/// Flat wire format: name, width and the instruction list.
#[derive(Serialize, Deserialize)]
struct CircuitData {
    name: String,
    num_qubits: u32,
    instructions: Vec<Instruction>,
}

impl From<Circuit> for CircuitData {
    fn from(circuit: Circuit) -> Self {
        Self {
            num_qubits: circuit.num_qubits_u32(),
            instructions: circuit.instructions().cloned().collect(),
            name: circuit.name,
        }
    }
}

impl TryFrom<CircuitData> for Circuit {
    type Error = IrError;

    fn try_from(data: CircuitData) -> IrResult<Self> {
        let mut circuit = Circuit::with_size(data.name, data.num_qubits);
        for inst in data.instructions {
            circuit.append(inst)?;
        }
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameter::ParameterVector;
    use crate::propagator::{UxyzGate, UxzGate};

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 0);
        assert_eq!(circuit.size(), 0);
    }

    #[test]
    fn test_circuit_with_size() {
        let circuit = Circuit::with_size("test", 3);
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.qubits(), &[QubitId(0), QubitId(1), QubitId(2)]);
    }

    #[test]
    fn test_append_returns_handle() {
        let mut circuit = Circuit::with_size("test", 2);
        let node = circuit
            .append(Instruction::two_qubit_gate(
                UxzGate::new(1.0, 2.0),
                QubitId(0),
                QubitId(1),
            ))
            .unwrap();
        let inst = circuit.instruction(node).unwrap();
        assert_eq!(inst.name(), "uxz");
        assert_eq!(inst.qubits, vec![QubitId(0), QubitId(1)]);
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .rz(0.5, QubitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.count_ops().get("cx"), Some(&1));
    }

    #[test]
    fn test_compose() {
        let mut small = Circuit::with_size("small", 2);
        small.rzz(0.1, QubitId(0), QubitId(1)).unwrap();

        let mut big = Circuit::with_size("big", 3);
        big.x(QubitId(2)).unwrap();
        big.compose(&small).unwrap();
        assert_eq!(big.size(), 2);

        let mut tiny = Circuit::with_size("tiny", 1);
        assert!(matches!(
            tiny.compose(&small),
            Err(IrError::CompositionWidth { other: 2, target: 1 })
        ));
    }

    #[test]
    fn test_parameters_in_first_appearance_order() {
        let mut circuit = Circuit::with_size("test", 2);
        let v1 = ParameterVector::new("θ1", 2).params();
        let v0 = ParameterVector::new("θ0", 2).params();
        circuit
            .gate(UxzGate::new(v1[0].clone(), v1[1].clone()), [QubitId(0), QubitId(1)])
            .unwrap()
            .gate(UxzGate::new(v0[0].clone(), v0[1].clone()), [QubitId(0), QubitId(1)])
            .unwrap()
            .rz(v1[0].clone(), QubitId(0))
            .unwrap();

        assert_eq!(circuit.parameters(), vec!["θ1[0]", "θ1[1]", "θ0[0]", "θ0[1]"]);
        assert!(circuit.is_parameterized());
    }

    #[test]
    fn test_bind_parameters() {
        let mut circuit = Circuit::with_size("test", 2);
        circuit
            .ry(ParameterExpression::symbol("a"), QubitId(0))
            .unwrap()
            .ry(ParameterExpression::symbol("b"), QubitId(1))
            .unwrap();

        let partial = circuit.bind_parameters([("a", 0.5)]).unwrap();
        assert_eq!(partial.parameters(), vec!["b"]);

        let full = partial.bind_parameters([("b", 1.5)]).unwrap();
        assert!(!full.is_parameterized());

        assert!(matches!(
            circuit.bind_parameters([("zeta", 1.0)]),
            Err(IrError::UnknownParameter(_))
        ));
    }

    #[test]
    fn test_assign_parameters_positional() {
        let mut circuit = Circuit::with_size("test", 2);
        let v = ParameterVector::new("θ0", 3).params();
        circuit
            .gate(
                UxyzGate::new(v[0].clone(), v[1].clone(), v[2].clone()),
                [QubitId(0), QubitId(1)],
            )
            .unwrap();

        let bound = circuit.assign_parameters(&[0.1, 0.2, 0.3]).unwrap();
        let params: Vec<_> = bound
            .instructions()
            .flat_map(|i| i.as_gate().unwrap().parameters())
            .map(|p| p.as_f64().unwrap())
            .collect();
        assert_eq!(params, vec![0.1, 0.2, 0.3]);

        assert!(matches!(
            circuit.assign_parameters(&[0.1]),
            Err(IrError::ParameterCountMismatch { expected: 3, got: 1 })
        ));
    }

    #[test]
    fn test_decompose_propagators() {
        let mut circuit = Circuit::with_size("test", 3);
        circuit
            .gate(UxyzGate::new(0.1, 0.2, 0.3), [QubitId(0), QubitId(1)])
            .unwrap()
            .barrier_all()
            .unwrap()
            .gate(UxzGate::new(0.1, 0.3), [QubitId(1), QubitId(2)])
            .unwrap();

        let lowered = circuit.decompose_propagators().unwrap();
        let names: Vec<_> = lowered.instructions().map(Instruction::name).collect();
        assert_eq!(names, vec!["rxx", "ryy", "rzz", "barrier", "rxx", "rzz"]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut circuit = Circuit::with_size("round_trip", 3);
        circuit
            .rz(1.5, QubitId(0))
            .unwrap()
            .barrier_all()
            .unwrap()
            .gate(
                UxzGate::new(ParameterVector::new("θ0", 2).params()[0].clone(), 0.3),
                [QubitId(1), QubitId(2)],
            )
            .unwrap();

        let json = circuit.to_json().unwrap();
        let restored = Circuit::from_json(&json).unwrap();
        assert_eq!(restored, circuit);
        assert_eq!(restored.draw(), circuit.draw());
    }

    #[test]
    fn test_json_rejects_out_of_range_qubit() {
        let json = r#"{"name":"bad","num_qubits":1,"instructions":[
            {"kind":"Barrier","qubits":[3]}
        ]}"#;
        assert!(Circuit::from_json(json).is_err());
    }
}
