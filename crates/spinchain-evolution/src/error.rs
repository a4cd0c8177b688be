//! Error types for the evolution crate.

use spinchain_ir::IrError;
use thiserror::Error;

/// Problems with an [`EvolutionSpec`](crate::EvolutionSpec) detected before
/// any gate is laid down.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum SpecError {
    /// The chain has no qubits.
    #[error("qubit count must be positive")]
    ZeroQubits,

    /// Every coupling constant is (numerically) zero.
    #[error("no active coupling axes specified")]
    NoActiveAxes,

    /// Only two- and three-axis propagators exist.
    #[error("unsupported number of simultaneously active coupling axes: {0}")]
    UnsupportedAxisCount(usize),

    /// Two active axes other than X and Z.
    #[error("two-axis propagator is defined for X and Z coupling only, got {0}")]
    UnsupportedAxisPair(String),

    /// A numeric input is NaN or infinite.
    #[error("{0} must be a finite number")]
    NonFinite(&'static str),
}

/// Errors produced while building an evolution circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EvolutionError {
    /// The specification was rejected.
    #[error("invalid evolution specification: {0}")]
    InvalidSpec(#[from] SpecError),

    /// The number of blocks laid down disagrees with the schedule.
    #[error("laid down {produced} propagator blocks, expected {expected}")]
    BlockCountMismatch {
        /// Blocks the schedule called for.
        expected: usize,
        /// Blocks actually produced.
        produced: usize,
    },

    /// Circuit builder returned an error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for evolution construction.
pub type EvolutionResult<T> = Result<T, EvolutionError>;
