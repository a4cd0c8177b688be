//! `OpenQASM` 3 emitter for spin-chain circuits
//!
//! Serializes a [`spinchain_ir::Circuit`] into self-contained `OpenQASM` 3.0
//! source. The evolution blocks `uxz` and `uxyz` are not part of
//! `stdgates.inc`, so their definitions (and those of the two-qubit Pauli
//! rotations they are built from) are emitted inline whenever they are used.
//!
//! # Example
//!
//! ```rust
//! use spinchain_ir::{Circuit, QubitId, UxzGate};
//! use spinchain_qasm3::emit;
//!
//! let mut circuit = Circuit::with_size("bond", 2);
//! circuit.rz(1.5, QubitId(0)).unwrap();
//! circuit
//!     .gate(UxzGate::new(0.5, 0.25), [QubitId(0), QubitId(1)])
//!     .unwrap();
//!
//! let qasm = emit(&circuit).unwrap();
//! assert!(qasm.starts_with("OPENQASM 3.0;"));
//! assert!(qasm.contains("gate uxz(gamma, delta) a, b"));
//! assert!(qasm.contains("rz(1.5) q[0];"));
//! assert!(qasm.contains("uxz(0.5, 0.25) q[0], q[1];"));
//! ```
//!
//! Symbolic parameters become `input angle` declarations; a vector element
//! `θ0[1]` is declared as `θ0_1`.

pub mod emitter;
pub mod error;

pub use emitter::emit;
pub use error::{EmitError, EmitResult};
