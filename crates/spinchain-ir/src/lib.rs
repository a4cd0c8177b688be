//! Spin-chain circuit intermediate representation
//!
//! This crate provides the circuit data structures that the evolution builder
//! writes into and the emitters read from.
//!
//! # Overview
//!
//! A [`Circuit`] is a fixed chain of qubits `q_0 .. q_{n-1}` backed by a DAG
//! ([`CircuitDag`]). Instructions are only ever appended, so the order in
//! which they were added is preserved exactly and is what serialization,
//! drawing and emission all observe.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a site of the chain
//! - **Gates**: [`StandardGate`] for built-in gates and [`PropagatorGate`] for
//!   the two-site evolution blocks [`UxzGate`] and [`UxyzGate`]
//! - **Parameters**: [`ParameterExpression`] for concrete or symbolic angles,
//!   [`ParameterVector`] for tagged groups of placeholders
//! - **Instructions**: [`Instruction`] combining a gate (or a barrier) with its qubits
//! - **Circuit**: [`Circuit`] high-level builder API with text drawing and JSON I/O
//!
//! # Example: One Trotter Bond
//!
//! ```rust
//! use spinchain_ir::{Circuit, QubitId, UxyzGate};
//!
//! let mut circuit = Circuit::with_size("bond", 2);
//! circuit.rz(0.1, QubitId(0)).unwrap();
//! circuit
//!     .gate(UxyzGate::new(0.05, 0.05, 0.05), [QubitId(0), QubitId(1)])
//!     .unwrap();
//!
//! assert_eq!(circuit.size(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Example: Parameterized Block
//!
//! ```rust
//! use spinchain_ir::{Circuit, ParameterVector, QubitId, UxzGate};
//!
//! let theta = ParameterVector::new("θ0", 2);
//! let p = theta.params();
//!
//! let mut circuit = Circuit::with_size("variational", 2);
//! circuit
//!     .gate(UxzGate::new(p[0].clone(), p[1].clone()), [QubitId(0), QubitId(1)])
//!     .unwrap();
//! assert_eq!(circuit.parameters(), vec!["θ0[0]", "θ0[1]"]);
//!
//! let bound = circuit.assign_parameters(&[0.3, 0.7]).unwrap();
//! assert!(!bound.is_parameterized());
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`, `X`, `Y`, `Z` | 1 | Identity and Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates |
//! | `CX`, `CZ` | 2 | Controlled-NOT and Controlled-Z |
//! | `RXX`, `RYY`, `RZZ` | 2 | Two-qubit Pauli rotations |
//! | `Uxz` | 2 | `exp(-i (γ XX + δ ZZ))` |
//! | `Uxyz` | 2 | `exp(-i (θx XX + θy YY + θz ZZ))` |

pub mod circuit;
pub mod dag;
pub mod draw;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod parameter;
pub mod propagator;
pub mod qubit;

pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use parameter::{ParameterExpression, ParameterVector};
pub use propagator::{PropagatorGate, UxyzGate, UxzGate};
pub use qubit::QubitId;
