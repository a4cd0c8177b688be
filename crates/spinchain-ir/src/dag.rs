//! DAG-based circuit representation.

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex as PetNodeIndex};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{IrError, IrResult};
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::QubitId;

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq)]
pub enum DagNode {
    /// Input node for a qubit wire.
    In(QubitId),
    /// Output node for a qubit wire.
    Out(QubitId),
    /// Operation node containing an instruction.
    Op(Instruction),
}

impl DagNode {
    /// Check if this is an operation node.
    #[inline]
    pub fn is_op(&self) -> bool {
        matches!(self, DagNode::Op(_))
    }

    /// Get the instruction if this is an operation node.
    #[inline]
    pub fn instruction(&self) -> Option<&Instruction> {
        match self {
            DagNode::Op(inst) => Some(inst),
            _ => None,
        }
    }
}

/// An edge in the circuit DAG: one segment of a qubit wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DagEdge {
    /// The wire this edge belongs to.
    pub qubit: QubitId,
}

/// DAG-based circuit representation.
///
/// Every qubit owns an `In` and an `Out` node; operations are threaded onto
/// the wires between them. Operations are only ever appended, so insertion
/// order is a valid topological order and is kept explicitly for
/// deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    /// The underlying graph.
    graph: DiGraph<DagNode, DagEdge, u32>,
    /// Map from qubit to its input node.
    inputs: FxHashMap<QubitId, NodeIndex>,
    /// Map from qubit to its output node.
    outputs: FxHashMap<QubitId, NodeIndex>,
    /// Wire front: the node just before each qubit's output node.
    wire_front: FxHashMap<QubitId, NodeIndex>,
    /// Operation nodes in insertion order.
    order: Vec<NodeIndex>,
}

impl CircuitDag {
    /// Create a new empty circuit DAG.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a qubit wire. Adding an existing qubit is a no-op.
    pub fn add_qubit(&mut self, qubit: QubitId) {
        if self.inputs.contains_key(&qubit) {
            return;
        }
        let in_node = self.graph.add_node(DagNode::In(qubit));
        let out_node = self.graph.add_node(DagNode::Out(qubit));
        self.graph.add_edge(in_node, out_node, DagEdge { qubit });
        self.inputs.insert(qubit, in_node);
        self.outputs.insert(qubit, out_node);
        self.wire_front.insert(qubit, in_node);
    }

    /// Append an instruction at the end of its wires.
    #[allow(clippy::cast_possible_truncation)]
    pub fn apply(&mut self, instruction: Instruction) -> IrResult<NodeIndex> {
        let gate_name = match &instruction.kind {
            InstructionKind::Gate(gate) => Some(gate.name().to_string()),
            InstructionKind::Barrier => None,
        };

        if let InstructionKind::Gate(gate) = &instruction.kind {
            let expected = gate.num_qubits() as usize;
            let got = instruction.qubits.len();
            if expected != got {
                return Err(IrError::QubitCountMismatch {
                    gate_name: gate.name().to_string(),
                    expected: expected as u32,
                    got: got as u32,
                });
            }
        }

        let mut seen = FxHashSet::default();
        for &qubit in &instruction.qubits {
            if !self.inputs.contains_key(&qubit) {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: gate_name.clone(),
                });
            }
        }

        let qubits = instruction.qubits.clone();
        let op_node = self.graph.add_node(DagNode::Op(instruction));

        for qubit in qubits {
            let out_node = self.outputs[&qubit];
            let prev_node = self.wire_front[&qubit];

            let edge = self
                .graph
                .edges_directed(prev_node, Direction::Outgoing)
                .find(|e| e.weight().qubit == qubit && e.target() == out_node)
                .map(|e| e.id())
                .ok_or_else(|| {
                    IrError::InvalidDag(format!(
                        "Missing edge from wire front to output for {qubit}"
                    ))
                })?;
            self.graph.remove_edge(edge);
            self.graph.add_edge(prev_node, op_node, DagEdge { qubit });
            self.graph.add_edge(op_node, out_node, DagEdge { qubit });
            self.wire_front.insert(qubit, op_node);
        }

        self.order.push(op_node);
        Ok(op_node)
    }

    /// Iterate over operations in insertion order.
    pub fn ops(&self) -> impl Iterator<Item = (NodeIndex, &Instruction)> {
        self.order
            .iter()
            .filter_map(|&idx| self.graph[idx].instruction().map(|inst| (idx, inst)))
    }

    /// Get an instruction by node index.
    #[inline]
    pub fn get_instruction(&self, node: NodeIndex) -> Option<&Instruction> {
        self.graph.node_weight(node).and_then(DagNode::instruction)
    }

    /// Operation nodes directly preceding `node` on any of its wires.
    pub fn predecessors(&self, node: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .map(|e| e.source())
            .filter(|&src| self.graph[src].is_op())
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.inputs.len()
    }

    /// Get the number of operations (barriers included).
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.order.len()
    }

    /// Qubits in ascending order.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<_> = self.inputs.keys().copied().collect();
        qubits.sort_unstable();
        qubits
    }

    /// Longest chain of operations, not counting barriers.
    pub fn depth(&self) -> usize {
        self.levels(|inst| usize::from(!inst.is_barrier()))
            .values()
            .copied()
            .max()
            .unwrap_or(0)
    }

    /// As-soon-as-possible layering: each operation sits one layer after the
    /// latest operation it depends on. Barriers occupy a layer of their own.
    pub fn layers(&self) -> Vec<Vec<NodeIndex>> {
        let levels = self.levels(|_| 1);
        let mut layers: Vec<Vec<NodeIndex>> = vec![];
        for &node in &self.order {
            let level = levels[&node];
            if layers.len() < level {
                layers.resize_with(level, Vec::new);
            }
            layers[level - 1].push(node);
        }
        layers
    }

    /// Level of every operation, where each op adds `weight(op)` on top of
    /// its deepest predecessor.
    fn levels(&self, weight: impl Fn(&Instruction) -> usize) -> FxHashMap<NodeIndex, usize> {
        let mut levels: FxHashMap<NodeIndex, usize> =
            FxHashMap::with_capacity_and_hasher(self.order.len(), Default::default());
        for (node, inst) in self.ops() {
            let base = self
                .predecessors(node)
                .map(|p| levels.get(&p).copied().unwrap_or(0))
                .max()
                .unwrap_or(0);
            levels.insert(node, base + weight(inst));
        }
        levels
    }

    /// Check that every wire runs from its input to its output node and the
    /// graph is acyclic.
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }

        for (&qubit, &in_node) in &self.inputs {
            let out_node = self.outputs.get(&qubit).copied().ok_or_else(|| {
                IrError::InvalidDag(format!("{qubit} has an In node but no Out node"))
            })?;

            let mut current = in_node;
            let mut steps = 0;
            while current != out_node {
                current = self
                    .graph
                    .edges_directed(current, Direction::Outgoing)
                    .find(|e| e.weight().qubit == qubit)
                    .map(|e| e.target())
                    .ok_or_else(|| {
                        IrError::InvalidDag(format!(
                            "Wire for {qubit} is broken at node {current:?}"
                        ))
                    })?;
                steps += 1;
                if steps > self.graph.node_count() {
                    return Err(IrError::InvalidDag(format!(
                        "Wire for {qubit} does not terminate"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::StandardGate;

    fn dag_with(n: u32) -> CircuitDag {
        let mut dag = CircuitDag::new();
        for q in 0..n {
            dag.add_qubit(QubitId(q));
        }
        dag
    }

    #[test]
    fn test_empty_dag() {
        let dag = dag_with(3);
        assert_eq!(dag.num_qubits(), 3);
        assert_eq!(dag.num_ops(), 0);
        assert_eq!(dag.depth(), 0);
        assert!(dag.layers().is_empty());
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_apply_keeps_insertion_order() {
        let mut dag = dag_with(2);
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::X, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1)))
            .unwrap();

        let names: Vec<_> = dag.ops().map(|(_, i)| i.name()).collect();
        assert_eq!(names, vec!["h", "x", "cx"]);
        assert_eq!(dag.depth(), 2);
        dag.verify_integrity().unwrap();
    }

    #[test]
    fn test_layers_pack_independent_ops() {
        let mut dag = dag_with(4);
        dag.apply(Instruction::two_qubit_gate(StandardGate::CZ, QubitId(0), QubitId(1)))
            .unwrap();
        dag.apply(Instruction::two_qubit_gate(StandardGate::CZ, QubitId(2), QubitId(3)))
            .unwrap();
        dag.apply(Instruction::two_qubit_gate(StandardGate::CZ, QubitId(1), QubitId(2)))
            .unwrap();

        let layers = dag.layers();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].len(), 2);
        assert_eq!(layers[1].len(), 1);
    }

    #[test]
    fn test_barrier_does_not_add_depth() {
        let mut dag = dag_with(2);
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(0)))
            .unwrap();
        dag.apply(Instruction::barrier([QubitId(0), QubitId(1)]))
            .unwrap();
        dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(1)))
            .unwrap();
        assert_eq!(dag.depth(), 2);
        assert_eq!(dag.layers().len(), 3);
    }

    #[test]
    fn test_rejects_bad_operands() {
        let mut dag = dag_with(2);
        assert!(matches!(
            dag.apply(Instruction::single_qubit_gate(StandardGate::H, QubitId(5))),
            Err(IrError::QubitNotFound { .. })
        ));
        assert!(matches!(
            dag.apply(Instruction::two_qubit_gate(StandardGate::CX, QubitId(1), QubitId(1))),
            Err(IrError::DuplicateQubit { .. })
        ));
        assert!(matches!(
            dag.apply(Instruction::gate(StandardGate::CX, [QubitId(0)])),
            Err(IrError::QubitCountMismatch { expected: 2, got: 1, .. })
        ));
        assert_eq!(dag.num_ops(), 0);
    }
}
