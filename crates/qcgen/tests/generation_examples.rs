//! End-to-end scenarios: config text in, QASM and structured data out.

use qcgen::{
    BasisGates, BugInjector, BugKind, CircuitConfig, CircuitExport, CircuitGenerator,
    DatasetConfig, EmitOptions, ExportConfig, GenError, QasmVersion, Strategy, dataset_to_json,
    from_json, to_json, to_structured_data,
};
use serde_json::json;

#[test]
fn test_three_qubit_random_seed_42() {
    let config = CircuitConfig::new(3, 5).with_seed(42);
    let first = CircuitGenerator::new(config.clone()).unwrap().generate().unwrap();
    let second = CircuitGenerator::new(config).unwrap().generate().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.num_layers(), 5);
    assert_eq!(
        first.to_universal_format().unwrap(),
        second.to_universal_format().unwrap()
    );
}

/// Fixed output for seed 42. A change here means seeded circuits differ
/// from earlier releases.
#[test]
fn test_random_seed_42_snapshot() {
    let config = CircuitConfig::new(3, 5).with_seed(42);
    let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();

    let expected = json!({
        "name": "random_circuit",
        "num_qubits": 3,
        "depth": 5,
        "measured": true,
        "layers": [
            [
                {"gate": "x", "qubits": [2]},
                {"gate": "x", "qubits": [1]},
                {"gate": "z", "qubits": [0]}
            ],
            [
                {"gate": "y", "qubits": [1]},
                {"gate": "x", "qubits": [0]},
                {"gate": "x", "qubits": [2]}
            ],
            [{"gate": "h", "qubits": [1]}, {"gate": "x", "qubits": [0]}],
            [{"gate": "z", "qubits": [0]}, {"gate": "h", "qubits": [1]}],
            [{"gate": "h", "qubits": [0]}, {"gate": "z", "qubits": [1]}]
        ]
    });
    assert_eq!(to_structured_data(&circuit), expected);
}

#[test]
fn test_entangling_seed_42_snapshot() {
    let config = CircuitConfig::new(4, 3)
        .with_strategy(Strategy::Entangling)
        .with_seed(42);
    let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();

    let expected = json!([
        [{"gate": "cz", "qubits": [2, 0]}, {"gate": "cx", "qubits": [1, 3]}],
        [{"gate": "cz", "qubits": [1, 0]}, {"gate": "cz", "qubits": [3, 2]}],
        [{"gate": "cx", "qubits": [1, 0]}, {"gate": "cx", "qubits": [3, 2]}]
    ]);
    assert_eq!(to_structured_data(&circuit)["layers"], expected);
}

#[test]
fn test_four_qubit_entangling_has_two_pairs_per_layer() {
    let config = CircuitConfig::new(4, 10).with_strategy(Strategy::Entangling);
    let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();
    let analysis = CircuitGenerator::analyze(&circuit);
    assert_eq!(analysis.two_qubit_gates_per_layer, vec![2; 10]);
    assert_eq!(analysis.single_qubit_gates, 0);
}

#[test]
fn test_pair_strategies_reject_empty_connectivity() {
    for strategy in ["layered", "entangling"] {
        let yaml = format!("num_qubits: 4\ndepth: 3\nstrategy: {strategy}\nconnectivity: []\n");
        let err = CircuitConfig::from_yaml_str(&yaml).unwrap_err();
        assert!(matches!(err, GenError::InvalidConfiguration(_)), "{err}");
    }
}

#[test]
fn test_config_file_to_qasm() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("brickwork.yaml");
    std::fs::write(
        &path,
        "num_qubits: 4\n\
         depth: 4\n\
         strategy: layered\n\
         single_qubit_gates: [sx, rz]\n\
         two_qubit_gates: [iswap]\n\
         connectivity: [[0, 1], [1, 2], [2, 3]]\n\
         seed: 3\n\
         name: brickwork\n",
    )
    .unwrap();

    let config = CircuitConfig::from_file(&path).unwrap();
    let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();
    assert_eq!(circuit.name(), "brickwork");

    let qasm3 = circuit.to_universal_format().unwrap();
    assert!(qasm3.contains("gate iswap a, b"));
    assert!(qasm3.contains("qubit[4] q;"));
    assert!(qasm3.contains("iswap q[0], q[1];"));
    assert!(qasm3.contains("iswap q[2], q[3];"));
    assert!(qasm3.contains("iswap q[1], q[2];"));
    assert!(qasm3.trim_end().ends_with("c = measure q;"));

    let options = EmitOptions {
        version: QasmVersion::V2,
        ..EmitOptions::default()
    };
    let qasm2 = circuit.to_universal_format_with(&options).unwrap();
    assert!(qasm2.contains("qreg q[4];"));
    assert!(qasm2.contains("measure q -> c;"));

    let ibm = EmitOptions::default().with_basis(BasisGates::ibm());
    assert!(matches!(
        circuit.to_universal_format_with(&ibm),
        Err(GenError::UnsupportedGate { .. })
    ));
}

#[test]
fn test_json_roundtrip_of_generated_circuit() {
    let config = CircuitConfig::new(5, 12)
        .with_strategy(Strategy::Weighted)
        .with_gates(["h", "x", "rx", "ry", "rz"], ["cx", "cz", "crx"])
        .with_seed(2024);
    let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();

    let text = to_json(&circuit, &ExportConfig::default()).unwrap();
    assert_eq!(from_json(&text).unwrap(), circuit);
}

#[test]
fn test_bugs_on_generated_circuit() {
    let config = CircuitConfig::new(4, 5).with_seed(42);
    let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();

    let mut injector = BugInjector::new(42);
    let (buggy, log) = injector
        .inject(&circuit, &[BugKind::GateDeletion], 4)
        .unwrap();
    assert_eq!(log.len(), 4);
    assert_eq!(buggy.num_layers(), circuit.num_layers());
    assert_eq!(buggy.num_gates() + 4, circuit.num_gates());
    assert!(buggy.to_universal_format().is_ok());

    let log_json = serde_json::to_value(&log).unwrap();
    assert_eq!(log_json[0]["type"], "gate_deletion");

    let (_, log) = injector
        .inject(&buggy, &[BugKind::GateInsertion, BugKind::SwapControlTarget], 4)
        .unwrap();
    assert!(log.len() <= 4);
}

#[test]
fn test_labeled_dataset() {
    let config = CircuitConfig::new(5, 8)
        .with_strategy(Strategy::Layered)
        .with_seed(2025);
    let generator = CircuitGenerator::new(config).unwrap();
    let dataset = DatasetConfig::new(20).with_bug_ratio(0.5);

    let entries = generator.generate_dataset(&dataset).unwrap();
    assert_eq!(entries.len(), 20);
    assert_eq!(entries, generator.generate_dataset(&dataset).unwrap());
    for entry in &entries {
        assert_eq!(entry.has_bugs, !entry.bugs.is_empty());
        assert_eq!(entry.circuit.num_layers(), 8);
    }

    let text = dataset_to_json(&entries, &ExportConfig::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value.as_array().map(Vec::len), Some(20));
    assert_eq!(value[19]["id"], "circuit_019");
}
