//! Gate placements: a gate bound to its qubits.

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::gate::GateKind;
use crate::qubit::QubitId;

/// A gate applied to specific qubits, with its angle when parameterized.
///
/// Qubit order is significant: for controlled gates the control comes first.
/// Placements are only built through the checked constructors (or checked
/// on insertion into a layer), so there is no `Deserialize` impl.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatePlacement {
    gate: GateKind,
    qubits: Vec<QubitId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    angle: Option<f64>,
}

impl GatePlacement {
    /// Create a placement, checking arity, operand distinctness and the angle.
    pub fn new(
        gate: GateKind,
        qubits: impl IntoIterator<Item = QubitId>,
        angle: Option<f64>,
    ) -> IrResult<Self> {
        let placement = Self {
            gate,
            qubits: qubits.into_iter().collect(),
            angle,
        };
        placement.validate()?;
        Ok(placement)
    }

    /// Create a single-qubit placement of a fixed (non-parameterized) gate.
    ///
    /// The placement is checked when it is pushed into a [`Layer`](crate::Layer).
    pub fn single(gate: GateKind, qubit: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![qubit],
            angle: None,
        }
    }

    /// Create a two-qubit placement of a fixed (non-parameterized) gate.
    ///
    /// The placement is checked when it is pushed into a [`Layer`](crate::Layer).
    pub fn two(gate: GateKind, q1: QubitId, q2: QubitId) -> Self {
        Self {
            gate,
            qubits: vec![q1, q2],
            angle: None,
        }
    }

    /// Create a placement of a parameterized gate.
    pub fn rotation(
        gate: GateKind,
        angle: f64,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<Self> {
        Self::new(gate, qubits, Some(angle))
    }

    /// Check the placement invariants.
    pub fn validate(&self) -> IrResult<()> {
        let name = self.gate.name();
        let expected = self.gate.num_qubits();
        let got = u32::try_from(self.qubits.len()).unwrap_or(u32::MAX);
        if got != expected {
            return Err(IrError::QubitCountMismatch {
                gate_name: name.to_string(),
                expected,
                got,
            });
        }

        if let [a, b] = self.qubits.as_slice() {
            if a == b {
                return Err(IrError::DuplicateQubit {
                    qubit: *a,
                    gate_name: Some(name.to_string()),
                });
            }
        }

        match (self.gate.is_parameterized(), self.angle) {
            (true, None) => Err(IrError::MissingParameter(name.to_string())),
            (false, Some(_)) => Err(IrError::UnexpectedParameter(name.to_string())),
            (true, Some(value)) if !value.is_finite() => Err(IrError::InvalidParameter {
                gate_name: name.to_string(),
                value,
            }),
            _ => Ok(()),
        }
    }

    /// The gate being applied.
    #[inline]
    pub fn gate(&self) -> GateKind {
        self.gate
    }

    /// Qubit operands in order.
    #[inline]
    pub fn qubits(&self) -> &[QubitId] {
        &self.qubits
    }

    /// Rotation angle, if the gate is parameterized.
    #[inline]
    pub fn angle(&self) -> Option<f64> {
        self.angle
    }

    /// Name of the placed gate.
    pub fn name(&self) -> &'static str {
        self.gate.name()
    }

    /// Check if this is a two-qubit placement.
    pub fn is_two_qubit(&self) -> bool {
        self.qubits.len() == 2
    }

    /// Check if this placement touches `qubit`.
    pub fn acts_on(&self, qubit: QubitId) -> bool {
        self.qubits.contains(&qubit)
    }
}
