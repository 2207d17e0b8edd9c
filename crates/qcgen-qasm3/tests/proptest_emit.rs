//! Property-based tests for QASM emission.
//!
//! Emission is a pure function of the circuit: it is deterministic and
//! produces one statement per placement.

use proptest::prelude::*;
use qcgen_ir::{Circuit, GateKind, GatePlacement, Layer, QubitId};
use qcgen_qasm3::{emit, emit_qasm2};

/// Generate a random simple circuit for property testing.
///
/// Generates circuits with:
/// - 2-5 qubits
/// - 1-6 layers, each trying up to 4 placements from a basic gate set
fn arb_simple_circuit() -> impl Strategy<Value = Circuit> {
    (2_u32..=5).prop_flat_map(|num_qubits| {
        (
            Just(num_qubits),
            prop::collection::vec(prop::collection::vec(arb_gate_op(num_qubits), 0..=4), 1..=6),
        )
            .prop_map(|(nq, layers)| {
                let mut circuit = Circuit::new("test", nq);
                for ops in layers {
                    let mut layer = Layer::new();
                    for op in ops {
                        // Conflicting placements are simply dropped.
                        let _ = layer.push(op);
                    }
                    let _ = circuit.push_layer(layer);
                }
                circuit
            })
    })
}

fn arb_gate_op(num_qubits: u32) -> impl Strategy<Value = GatePlacement> {
    prop_oneof![
        (0..num_qubits).prop_map(|q| GatePlacement::single(GateKind::H, QubitId(q))),
        (0..num_qubits).prop_map(|q| GatePlacement::single(GateKind::X, QubitId(q))),
        (0..num_qubits, 0.0..6.28_f64).prop_map(|(q, a)| {
            GatePlacement::rotation(GateKind::Ry, a, [QubitId(q)]).expect("finite angle")
        }),
        (0..num_qubits, 0..num_qubits)
            .prop_filter("Control and target must differ", |(c, t)| c != t)
            .prop_map(|(c, t)| GatePlacement::two(GateKind::CX, QubitId(c), QubitId(t))),
    ]
}

fn count_gate_statements(qasm: &str) -> usize {
    qasm.lines()
        .filter(|l| {
            let l = l.trim_start();
            ["h ", "x ", "ry(", "cx "].iter().any(|p| l.starts_with(p))
        })
        .count()
}

proptest! {
    /// Test that QASM generation is deterministic.
    #[test]
    fn test_qasm_generation_is_deterministic(circuit in arb_simple_circuit()) {
        let qasm1 = emit(&circuit).expect("First conversion failed");
        let qasm2 = emit(&circuit).expect("Second conversion failed");
        prop_assert_eq!(qasm1, qasm2, "QASM generation is not deterministic");
    }

    /// Every placement becomes exactly one statement in both dialects.
    #[test]
    fn test_one_statement_per_placement(circuit in arb_simple_circuit()) {
        let qasm3 = emit(&circuit).expect("QASM3 emission failed");
        let qasm2 = emit_qasm2(&circuit).expect("QASM2 emission failed");
        prop_assert_eq!(count_gate_statements(&qasm3), circuit.num_gates());
        prop_assert_eq!(count_gate_statements(&qasm2), circuit.num_gates());
        let declaration = format!("qubit[{}] q;", circuit.num_qubits());
        prop_assert!(qasm3.contains(&declaration));
    }
}
