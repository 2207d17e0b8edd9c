//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index is not below the circuit width.
    #[error("Qubit {qubit} out of range for {num_qubits}-qubit circuit{}", format_gate_context(.gate_name))]
    QubitOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Width of the circuit or connectivity.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Qubit already carries an operation in the same layer.
    #[error("Qubit {qubit} is already used in this layer{}", format_gate_context(.gate_name))]
    QubitReuse {
        /// The reused qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// Duplicate qubit in a single placement.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Parameterized gate placed without an angle.
    #[error("Gate '{0}' requires a rotation angle")]
    MissingParameter(String),

    /// Fixed gate placed with an angle.
    #[error("Gate '{0}' does not take a rotation angle")]
    UnexpectedParameter(String),

    /// Angle is NaN or infinite.
    #[error("Gate '{gate_name}' has a non-finite angle {value}")]
    InvalidParameter {
        /// Name of the gate.
        gate_name: String,
        /// The rejected value.
        value: f64,
    },

    /// Gate name is not part of the vocabulary.
    #[error("Unknown gate: {0}")]
    UnknownGate(String),

    /// Connectivity edge is a self-loop or leaves the register.
    #[error("Invalid connectivity edge ({0}, {1}) for {2} qubits")]
    InvalidEdge(u32, u32, u32),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
