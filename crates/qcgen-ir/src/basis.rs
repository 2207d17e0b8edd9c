//! Target gate sets.

use serde::{Deserialize, Serialize};

use crate::gate::GateKind;

/// Basis gates accepted by an export target or device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasisGates {
    /// Label used in error messages.
    name: String,
    /// List of gate names in the basis.
    gates: Vec<String>,
}

impl BasisGates {
    /// Create a new basis gate set.
    pub fn new(
        name: impl Into<String>,
        gates: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            gates: gates.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a gate name is in the basis.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Check if a vocabulary gate is in the basis.
    pub fn supports(&self, gate: GateKind) -> bool {
        self.contains(gate.name())
    }

    /// Label of this basis.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the basis gates.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }

    /// Gates declared by OpenQASM 2.0's `qelib1.inc`.
    pub fn openqasm2() -> Self {
        Self::new(
            "openqasm2",
            [
                "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "sxdg", "rx", "ry", "rz",
                "p", "cx", "cy", "cz", "ch", "swap", "crx", "cry", "crz", "cp", "rxx", "rzz",
            ],
        )
    }

    /// Gates declared by OpenQASM 3.0's `stdgates.inc`.
    pub fn openqasm3() -> Self {
        Self::new(
            "openqasm3",
            [
                "id", "x", "y", "z", "h", "s", "sdg", "t", "tdg", "sx", "rx", "ry", "rz", "p",
                "cx", "cy", "cz", "ch", "swap", "crx", "cry", "crz", "cp",
            ],
        )
    }

    /// IBM basis gates (RZ + SX + X + CX).
    pub fn ibm() -> Self {
        Self::new("ibm", ["id", "rz", "sx", "x", "cx"])
    }

    /// IBM Heron basis gates (RZ + SX + X + CZ, plus RX and RZZ).
    pub fn heron() -> Self {
        Self::new("heron", ["id", "rz", "sx", "x", "cz", "rx", "rzz"])
    }

    /// Every gate in the generator vocabulary.
    pub fn universal() -> Self {
        Self::new("universal", GateKind::ALL.iter().map(|g| g.name()))
    }
}
