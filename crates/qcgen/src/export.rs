//! Export Module: universal-format text and structured data.
//!
//! The structured form is a JSON value that keeps the layer structure:
//!
//! ```json
//! {
//!   "name": "random_circuit",
//!   "num_qubits": 2,
//!   "depth": 2,
//!   "measured": true,
//!   "layers": [
//!     [{"gate": "h", "qubits": [0]}, {"gate": "rz", "qubits": [1], "param": 0.25}],
//!     [{"gate": "cx", "qubits": [0, 1]}]
//!   ]
//! }
//! ```

use qcgen_ir::{Circuit, GateKind, GatePlacement, IrError, Layer, QubitId};
use qcgen_qasm3::EmitOptions;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{GenError, GenResult};

/// Export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Whether to pretty-print JSON output.
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StructuredCircuit {
    name: String,
    num_qubits: u32,
    depth: usize,
    #[serde(default)]
    measured: bool,
    layers: Vec<Vec<StructuredGate>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StructuredGate {
    gate: String,
    qubits: Vec<u32>,
    #[serde(default)]
    param: Option<f64>,
}

/// Convert a circuit into its structured representation.
pub fn to_structured_data(circuit: &Circuit) -> Value {
    let layers: Vec<Value> = circuit
        .layers()
        .iter()
        .map(|layer| Value::Array(layer.iter().map(placement_value).collect()))
        .collect();

    json!({
        "name": circuit.name(),
        "num_qubits": circuit.num_qubits(),
        "depth": circuit.num_layers(),
        "measured": circuit.is_measured(),
        "layers": layers,
    })
}

fn placement_value(placement: &GatePlacement) -> Value {
    let qubits: Vec<u32> = placement.qubits().iter().map(|q| q.0).collect();
    match placement.angle() {
        Some(param) => json!({ "gate": placement.name(), "qubits": qubits, "param": param }),
        None => json!({ "gate": placement.name(), "qubits": qubits }),
    }
}

/// Rebuild a circuit from its structured representation.
///
/// Every placement and layer is checked, so malformed data never produces
/// a circuit that breaks the layer invariant.
pub fn from_structured_data(value: &Value) -> GenResult<Circuit> {
    let data = StructuredCircuit::deserialize(value).map_err(|e| invalid_data(e.to_string()))?;

    if data.depth != data.layers.len() {
        return Err(invalid_data(format!(
            "depth is {} but {} layers are present",
            data.depth,
            data.layers.len()
        )));
    }

    let mut circuit = Circuit::new(data.name, data.num_qubits);
    for (index, gates) in data.layers.into_iter().enumerate() {
        let mut layer = Layer::new();
        for gate in gates {
            let kind = GateKind::from_name(&gate.gate)
                .ok_or_else(|| invalid_data(format!("unknown gate '{}'", gate.gate)))?;
            let placement = GatePlacement::new(kind, gate.qubits.into_iter().map(QubitId), gate.param)
                .map_err(|e| layer_error(index, &e))?;
            layer.push(placement).map_err(|e| layer_error(index, &e))?;
        }
        circuit.push_layer(layer).map_err(|e| layer_error(index, &e))?;
    }
    circuit.set_measured(data.measured);
    Ok(circuit)
}

/// Export a circuit's structured representation as a JSON string.
pub fn to_json(circuit: &Circuit, config: &ExportConfig) -> GenResult<String> {
    let value = to_structured_data(circuit);
    if config.pretty {
        serde_json::to_string_pretty(&value).map_err(GenError::from)
    } else {
        serde_json::to_string(&value).map_err(GenError::from)
    }
}

/// Parse a JSON string produced by [`to_json`].
pub fn from_json(text: &str) -> GenResult<Circuit> {
    let value: Value = serde_json::from_str(text).map_err(|e| invalid_data(e.to_string()))?;
    from_structured_data(&value)
}

fn invalid_data(msg: impl Into<String>) -> GenError {
    GenError::InvalidData(msg.into())
}

fn layer_error(index: usize, e: &IrError) -> GenError {
    invalid_data(format!("layer {index}: {e}"))
}

/// Export methods on [`Circuit`].
pub trait CircuitExport {
    /// Render as `OpenQASM` 3.0.
    fn to_universal_format(&self) -> GenResult<String>;

    /// Render as `OpenQASM` with explicit options (version, target basis).
    fn to_universal_format_with(&self, options: &EmitOptions) -> GenResult<String>;

    /// Convert to the structured JSON representation.
    fn to_structured_data(&self) -> Value;
}

impl CircuitExport for Circuit {
    fn to_universal_format(&self) -> GenResult<String> {
        Ok(qcgen_qasm3::emit(self)?)
    }

    fn to_universal_format_with(&self, options: &EmitOptions) -> GenResult<String> {
        Ok(qcgen_qasm3::emit_with(self, options)?)
    }

    fn to_structured_data(&self) -> Value {
        to_structured_data(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcgen_ir::BasisGates;

    fn sample() -> Circuit {
        let mut circuit = Circuit::new("sample", 2);
        circuit
            .push_layer(
                Layer::from_placements([
                    GatePlacement::single(GateKind::H, QubitId(0)),
                    GatePlacement::rotation(GateKind::Rz, 0.123_456_789_012_345, [QubitId(1)])
                        .unwrap(),
                ])
                .unwrap(),
            )
            .unwrap()
            .push_layer(
                Layer::from_placements([GatePlacement::two(GateKind::CX, QubitId(1), QubitId(0))])
                    .unwrap(),
            )
            .unwrap();
        circuit.measure_all();
        circuit
    }

    #[test]
    fn test_structured_shape() {
        let value = to_structured_data(&sample());
        assert_eq!(value["name"], "sample");
        assert_eq!(value["num_qubits"], 2);
        assert_eq!(value["depth"], 2);
        assert_eq!(value["measured"], true);
        assert_eq!(value["layers"][0][0], json!({"gate": "h", "qubits": [0]}));
        assert_eq!(value["layers"][1][0], json!({"gate": "cx", "qubits": [1, 0]}));
        assert!(value["layers"][0][0].get("param").is_none());
        assert_eq!(value["layers"][0][1]["param"], 0.123_456_789_012_345);
    }

    #[test]
    fn test_structured_roundtrip_is_exact() {
        let circuit = sample();
        let back = from_structured_data(&to_structured_data(&circuit)).unwrap();
        assert_eq!(back, circuit);

        let text = to_json(&circuit, &ExportConfig { pretty: false }).unwrap();
        assert_eq!(from_json(&text).unwrap(), circuit);
    }

    #[test]
    fn test_import_rejects_bad_data() {
        let cases = [
            json!({"name": "c", "num_qubits": 2, "depth": 1, "layers": [[{"gate": "foo", "qubits": [0]}]]}),
            json!({"name": "c", "num_qubits": 2, "depth": 1, "layers": [[{"gate": "cx", "qubits": [0]}]]}),
            json!({"name": "c", "num_qubits": 2, "depth": 1, "layers": [[{"gate": "rx", "qubits": [0]}]]}),
            json!({"name": "c", "num_qubits": 2, "depth": 1, "layers": [[{"gate": "h", "qubits": [0], "param": 1.0}]]}),
            json!({"name": "c", "num_qubits": 2, "depth": 1, "layers": [[{"gate": "h", "qubits": [2]}]]}),
            json!({"name": "c", "num_qubits": 2, "depth": 1, "layers": [[{"gate": "h", "qubits": [0]}, {"gate": "x", "qubits": [0]}]]}),
            json!({"name": "c", "num_qubits": 2, "depth": 2, "layers": [[]]}),
            json!({"name": "c", "num_qubits": 2, "layers": []}),
        ];
        for case in cases {
            let err = from_structured_data(&case).unwrap_err();
            assert!(matches!(err, GenError::InvalidData(_)), "{case}: {err}");
        }
    }

    #[test]
    fn test_pretty_json() {
        let text = to_json(&sample(), &ExportConfig::default()).unwrap();
        assert!(text.contains('\n'));
        assert!(text.contains("\"gate\": \"cx\""));
    }

    #[test]
    fn test_circuit_export_trait() {
        let circuit = sample();
        let qasm = circuit.to_universal_format().unwrap();
        assert!(qasm.starts_with("OPENQASM 3.0;"));
        assert!(qasm.contains("cx q[1], q[0];"));
        assert_eq!(circuit.to_structured_data()["depth"], 2);

        let options = EmitOptions::default().with_basis(BasisGates::ibm());
        assert!(matches!(
            circuit.to_universal_format_with(&options),
            Err(GenError::UnsupportedGate { .. })
        ));
    }
}
