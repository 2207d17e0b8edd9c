//! Error types for the QASM emitter.

use thiserror::Error;

/// Errors that can occur during emission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EmitError {
    /// The circuit uses a gate the target cannot express.
    #[error("Gate '{gate}' is not supported by target '{target}'")]
    UnsupportedGate {
        /// Name of the rejected gate.
        gate: String,
        /// Name of the target format or basis.
        target: String,
    },
}

/// Result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;
