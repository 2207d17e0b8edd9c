//! Generator error types.

use qcgen_ir::IrError;
use qcgen_qasm3::EmitError;
use thiserror::Error;

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that can occur while configuring, generating or exporting circuits.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GenError {
    /// The configuration cannot produce a circuit.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A gate is not accepted by the export target.
    #[error("Gate '{gate}' is not supported by target '{target}'")]
    UnsupportedGate {
        /// Name of the rejected gate.
        gate: String,
        /// Name of the target basis.
        target: String,
    },

    /// Structured circuit data is malformed.
    #[error("Invalid circuit data: {0}")]
    InvalidData(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration text could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<IrError> for GenError {
    fn from(e: IrError) -> Self {
        GenError::InvalidConfiguration(e.to_string())
    }
}

impl From<EmitError> for GenError {
    fn from(e: EmitError) -> Self {
        match e {
            EmitError::UnsupportedGate { gate, target } => {
                GenError::UnsupportedGate { gate, target }
            }
            other => GenError::InvalidData(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for GenError {
    fn from(e: serde_json::Error) -> Self {
        GenError::Parse(e.to_string())
    }
}

impl From<serde_yaml_ng::Error> for GenError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        GenError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for GenError {
    fn from(e: std::io::Error) -> Self {
        GenError::Io(e.to_string())
    }
}
