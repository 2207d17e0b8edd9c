//! Read-only circuit statistics.

use std::collections::BTreeMap;

use qcgen_ir::Circuit;
use serde::{Deserialize, Serialize};

/// Summary of a generated circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitAnalysis {
    /// Number of qubits.
    pub num_qubits: u32,
    /// Total number of gate placements (measurements excluded).
    pub total_gates: usize,
    /// Single-qubit placements.
    pub single_qubit_gates: usize,
    /// Two-qubit placements.
    pub two_qubit_gates: usize,
    /// Number of layers holding at least one gate.
    pub depth: usize,
    /// Number of layers, empty ones included.
    pub num_layers: usize,
    /// Gate name to occurrence count.
    pub gate_distribution: BTreeMap<String, usize>,
    /// Two-qubit placements in each layer.
    pub two_qubit_gates_per_layer: Vec<usize>,
}

impl CircuitAnalysis {
    /// Analyze a circuit.
    pub fn of(circuit: &Circuit) -> Self {
        let mut gate_distribution = BTreeMap::new();
        let mut two_qubit_gates = 0;
        for (_, placement) in circuit.placements() {
            *gate_distribution
                .entry(placement.name().to_string())
                .or_insert(0) += 1;
            if placement.is_two_qubit() {
                two_qubit_gates += 1;
            }
        }
        let total_gates = circuit.num_gates();

        Self {
            num_qubits: circuit.num_qubits(),
            total_gates,
            single_qubit_gates: total_gates - two_qubit_gates,
            two_qubit_gates,
            depth: circuit.layers().iter().filter(|l| !l.is_empty()).count(),
            num_layers: circuit.num_layers(),
            gate_distribution,
            two_qubit_gates_per_layer: circuit.layers().iter().map(|l| l.num_two_qubit()).collect(),
        }
    }

    /// Fraction of placements that are two-qubit gates.
    pub fn two_qubit_fraction(&self) -> f64 {
        if self.total_gates == 0 {
            0.0
        } else {
            self.two_qubit_gates as f64 / self.total_gates as f64
        }
    }
}
