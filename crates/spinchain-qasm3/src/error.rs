//! Error types for the QASM3 emitter.

use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// A parameter name cannot be written as an OpenQASM identifier.
    #[error("Parameter '{0}' is not a valid OpenQASM identifier")]
    InvalidIdentifier(String),

    /// Two distinct parameters would be declared under the same name.
    #[error("Parameters '{first}' and '{second}' both map to identifier '{identifier}'")]
    IdentifierCollision {
        first: String,
        second: String,
        identifier: String,
    },

    /// A numeric angle is NaN or infinite.
    #[error("Gate '{gate}' has a non-finite angle {value}")]
    NonFiniteAngle { gate: String, value: f64 },
}

/// Result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;
