//! Gate vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IrError;

/// Number of qubits a gate acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateArity {
    /// Acts on one qubit.
    Single,
    /// Acts on two qubits.
    Two,
}

impl GateArity {
    /// Number of qubit operands.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        match self {
            GateArity::Single => 1,
            GateArity::Two => 2,
        }
    }
}

/// Gates the generator knows how to place.
///
/// Parameterized kinds carry their angle on the [`GatePlacement`](crate::GatePlacement),
/// not on the kind, so a vocabulary can list `rx` once and receive a fresh
/// angle at every placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GateKind {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,
    /// sqrt(X) gate.
    SX,
    /// sqrt(X)-dagger gate.
    SXdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx,
    /// Rotation around Y axis.
    Ry,
    /// Rotation around Z axis.
    Rz,
    /// Phase gate.
    P,

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// Controlled-Hadamard gate.
    CH,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Controlled rotation around X.
    CRx,
    /// Controlled rotation around Y.
    CRy,
    /// Controlled rotation around Z.
    CRz,
    /// Controlled phase gate.
    CP,
    /// XX rotation gate.
    RXX,
    /// YY rotation gate.
    RYY,
    /// ZZ rotation gate.
    RZZ,
}

impl GateKind {
    /// Every gate in the vocabulary, single-qubit gates first.
    pub const ALL: [GateKind; 28] = [
        GateKind::I,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::H,
        GateKind::S,
        GateKind::Sdg,
        GateKind::T,
        GateKind::Tdg,
        GateKind::SX,
        GateKind::SXdg,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::P,
        GateKind::CX,
        GateKind::CY,
        GateKind::CZ,
        GateKind::CH,
        GateKind::Swap,
        GateKind::ISwap,
        GateKind::CRx,
        GateKind::CRy,
        GateKind::CRz,
        GateKind::CP,
        GateKind::RXX,
        GateKind::RYY,
        GateKind::RZZ,
    ];

    /// Canonical (OpenQASM) name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            GateKind::I => "id",
            GateKind::X => "x",
            GateKind::Y => "y",
            GateKind::Z => "z",
            GateKind::H => "h",
            GateKind::S => "s",
            GateKind::Sdg => "sdg",
            GateKind::T => "t",
            GateKind::Tdg => "tdg",
            GateKind::SX => "sx",
            GateKind::SXdg => "sxdg",
            GateKind::Rx => "rx",
            GateKind::Ry => "ry",
            GateKind::Rz => "rz",
            GateKind::P => "p",
            GateKind::CX => "cx",
            GateKind::CY => "cy",
            GateKind::CZ => "cz",
            GateKind::CH => "ch",
            GateKind::Swap => "swap",
            GateKind::ISwap => "iswap",
            GateKind::CRx => "crx",
            GateKind::CRy => "cry",
            GateKind::CRz => "crz",
            GateKind::CP => "cp",
            GateKind::RXX => "rxx",
            GateKind::RYY => "ryy",
            GateKind::RZZ => "rzz",
        }
    }

    /// Look a gate up by name.
    ///
    /// Matching is case-insensitive and accepts a few common aliases
    /// (`cnot`, `i`, `phase`, `cphase`).
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let kind = match lower.as_str() {
            "i" => GateKind::I,
            "cnot" => GateKind::CX,
            "phase" => GateKind::P,
            "cphase" => GateKind::CP,
            other => return Self::ALL.into_iter().find(|g| g.name() == other),
        };
        Some(kind)
    }

    /// Number of qubits this gate acts on.
    #[inline]
    pub fn arity(self) -> GateArity {
        match self {
            GateKind::I
            | GateKind::X
            | GateKind::Y
            | GateKind::Z
            | GateKind::H
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::Tdg
            | GateKind::SX
            | GateKind::SXdg
            | GateKind::Rx
            | GateKind::Ry
            | GateKind::Rz
            | GateKind::P => GateArity::Single,

            GateKind::CX
            | GateKind::CY
            | GateKind::CZ
            | GateKind::CH
            | GateKind::Swap
            | GateKind::ISwap
            | GateKind::CRx
            | GateKind::CRy
            | GateKind::CRz
            | GateKind::CP
            | GateKind::RXX
            | GateKind::RYY
            | GateKind::RZZ => GateArity::Two,
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> u32 {
        self.arity().num_qubits()
    }

    /// Check if this gate takes a rotation angle.
    pub fn is_parameterized(self) -> bool {
        matches!(
            self,
            GateKind::Rx
                | GateKind::Ry
                | GateKind::Rz
                | GateKind::P
                | GateKind::CRx
                | GateKind::CRy
                | GateKind::CRz
                | GateKind::CP
                | GateKind::RXX
                | GateKind::RYY
                | GateKind::RZZ
        )
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GateKind::from_name(s).ok_or_else(|| IrError::UnknownGate(s.to_string()))
    }
}

impl TryFrom<String> for GateKind {
    type Error = IrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GateKind> for String {
    fn from(kind: GateKind) -> Self {
        kind.name().to_string()
    }
}
