//! QASM emitter for serializing circuits.

use std::collections::BTreeSet;

use qcgen_ir::{BasisGates, Circuit, GateKind, GatePlacement, QubitId};

use crate::error::{EmitError, EmitResult};

/// `OpenQASM` language version to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QasmVersion {
    /// `OPENQASM 2.0` with `qelib1.inc`.
    V2,
    /// `OPENQASM 3.0` with `stdgates.inc`.
    #[default]
    V3,
}

impl QasmVersion {
    /// Gates declared by the version's standard include file.
    fn standard_gates(self) -> BasisGates {
        match self {
            QasmVersion::V2 => BasisGates::openqasm2(),
            QasmVersion::V3 => BasisGates::openqasm3(),
        }
    }
}

/// Options controlling emission.
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    /// Language version.
    pub version: QasmVersion,
    /// Restrict the output to these gates; anything else is rejected.
    pub basis: Option<BasisGates>,
    /// Emit `barrier q;` between layers to keep the layer structure visible.
    pub layer_barriers: bool,
}

impl EmitOptions {
    /// Options for `OpenQASM` 2.0 output.
    pub fn qasm2() -> Self {
        Self {
            version: QasmVersion::V2,
            ..Self::default()
        }
    }

    /// Reject gates outside `basis`.
    #[must_use]
    pub fn with_basis(mut self, basis: BasisGates) -> Self {
        self.basis = Some(basis);
        self
    }

    /// Separate layers with barriers.
    #[must_use]
    pub fn with_layer_barriers(mut self, enabled: bool) -> Self {
        self.layer_barriers = enabled;
        self
    }
}

/// Emit a circuit as `OpenQASM` 3.0 source code.
pub fn emit(circuit: &Circuit) -> EmitResult<String> {
    emit_with(circuit, &EmitOptions::default())
}

/// Emit a circuit as `OpenQASM` 2.0 source code.
///
/// Register declarations use the QASM2 style (`qreg q[n];` / `creg c[n];`)
/// and measurements use `measure q -> c;`.
pub fn emit_qasm2(circuit: &Circuit) -> EmitResult<String> {
    emit_with(circuit, &EmitOptions::qasm2())
}

/// Emit a circuit with explicit options.
pub fn emit_with(circuit: &Circuit, options: &EmitOptions) -> EmitResult<String> {
    let mut emitter = Emitter::new(options);
    emitter.emit_circuit(circuit)?;
    Ok(emitter.output)
}

/// Inline definition for a gate missing from a standard include.
fn gate_definition(gate: GateKind) -> Option<&'static str> {
    let def = match gate {
        GateKind::SXdg => "gate sxdg a { s a; h a; s a; }",
        GateKind::ISwap => "gate iswap a, b { s a; s b; h a; cx a, b; cx b, a; h b; }",
        GateKind::RXX => {
            "gate rxx(theta) a, b { h a; h b; cx a, b; rz(theta) b; cx a, b; h a; h b; }"
        }
        GateKind::RYY => {
            "gate ryy(theta) a, b { rx(pi/2) a; rx(pi/2) b; cx a, b; rz(theta) b; cx a, b; rx(-pi/2) a; rx(-pi/2) b; }"
        }
        GateKind::RZZ => "gate rzz(theta) a, b { cx a, b; rz(theta) b; cx a, b; }",
        _ => return None,
    };
    Some(def)
}

/// Format an angle literal, using `pi` fractions where they are exact.
fn format_angle(v: f64) -> String {
    let pi = std::f64::consts::PI;
    if (v - pi).abs() < 1e-10 {
        "pi".into()
    } else if (v - pi / 2.0).abs() < 1e-10 {
        "pi/2".into()
    } else if (v - pi / 4.0).abs() < 1e-10 {
        "pi/4".into()
    } else if (v + pi / 2.0).abs() < 1e-10 {
        "-pi/2".into()
    } else if (v + pi / 4.0).abs() < 1e-10 {
        "-pi/4".into()
    } else {
        format!("{v:.6}")
    }
}

struct Emitter<'a> {
    options: &'a EmitOptions,
    output: String,
}

impl<'a> Emitter<'a> {
    fn new(options: &'a EmitOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    fn emit_circuit(&mut self, circuit: &Circuit) -> EmitResult<()> {
        let definitions = self.check_gates(circuit)?;

        // Header
        match self.options.version {
            QasmVersion::V2 => {
                self.writeln("OPENQASM 2.0;");
                self.writeln("include \"qelib1.inc\";");
            }
            QasmVersion::V3 => {
                self.writeln("OPENQASM 3.0;");
                self.writeln("include \"stdgates.inc\";");
            }
        }
        self.writeln("");

        if !definitions.is_empty() {
            for def in definitions {
                self.writeln(def);
            }
            self.writeln("");
        }

        // Register declarations
        let num_qubits = circuit.num_qubits();
        match self.options.version {
            QasmVersion::V2 => {
                self.writeln(&format!("qreg q[{num_qubits}];"));
                if circuit.is_measured() {
                    self.writeln(&format!("creg c[{num_qubits}];"));
                }
            }
            QasmVersion::V3 => {
                self.writeln(&format!("qubit[{num_qubits}] q;"));
                if circuit.is_measured() {
                    self.writeln(&format!("bit[{num_qubits}] c;"));
                }
            }
        }
        self.writeln("");

        // Layers
        let last = circuit.num_layers().saturating_sub(1);
        for (i, layer) in circuit.layers().iter().enumerate() {
            for placement in layer.iter() {
                self.emit_placement(placement);
            }
            if self.options.layer_barriers && i < last {
                self.writeln("barrier q;");
            }
        }

        if circuit.is_measured() {
            match self.options.version {
                QasmVersion::V2 => self.writeln("measure q -> c;"),
                QasmVersion::V3 => self.writeln("c = measure q;"),
            }
        }

        Ok(())
    }

    /// Check every gate against the target and collect the inline
    /// definitions the output needs, in vocabulary order.
    fn check_gates(&self, circuit: &Circuit) -> EmitResult<Vec<&'static str>> {
        let used: BTreeSet<GateKind> = circuit.placements().map(|(_, p)| p.gate()).collect();
        let standard = self.options.version.standard_gates();

        let mut definitions = vec![];
        for gate in used {
            if let Some(basis) = &self.options.basis {
                if !basis.supports(gate) {
                    return Err(EmitError::UnsupportedGate {
                        gate: gate.name().to_string(),
                        target: basis.name().to_string(),
                    });
                }
            }
            if !standard.supports(gate) {
                let def = gate_definition(gate).ok_or_else(|| EmitError::UnsupportedGate {
                    gate: gate.name().to_string(),
                    target: standard.name().to_string(),
                })?;
                definitions.push(def);
            }
        }
        Ok(definitions)
    }

    fn emit_placement(&mut self, placement: &GatePlacement) {
        let name = placement.name();
        let qubits = emit_qubits(placement.qubits());
        match placement.angle() {
            Some(angle) => self.writeln(&format!("{name}({}) {qubits};", format_angle(angle))),
            None => self.writeln(&format!("{name} {qubits};")),
        }
    }

    fn writeln(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push('\n');
    }
}

fn emit_qubits(qubits: &[QubitId]) -> String {
    qubits
        .iter()
        .map(|q| format!("q[{}]", q.0))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcgen_ir::Layer;
    use std::f64::consts::PI;

    fn circuit_of(num_qubits: u32, layers: Vec<Vec<GatePlacement>>) -> Circuit {
        let mut circuit = Circuit::new("test", num_qubits);
        for placements in layers {
            circuit
                .push_layer(Layer::from_placements(placements).unwrap())
                .unwrap();
        }
        circuit
    }

    fn bell() -> Circuit {
        let mut circuit = circuit_of(
            2,
            vec![
                vec![GatePlacement::single(GateKind::H, QubitId(0))],
                vec![GatePlacement::two(GateKind::CX, QubitId(0), QubitId(1))],
            ],
        );
        circuit.measure_all();
        circuit
    }

    #[test]
    fn test_emit_bell_state() {
        let qasm = emit(&bell()).unwrap();
        assert_eq!(
            qasm,
            "OPENQASM 3.0;\n\
             include \"stdgates.inc\";\n\
             \n\
             qubit[2] q;\n\
             bit[2] c;\n\
             \n\
             h q[0];\n\
             cx q[0], q[1];\n\
             c = measure q;\n"
        );
    }

    #[test]
    fn test_emit_parameterized() {
        let circuit = circuit_of(
            2,
            vec![vec![
                GatePlacement::rotation(GateKind::Rx, PI / 2.0, [QubitId(0)]).unwrap(),
                GatePlacement::rotation(GateKind::Rz, 1.234_567_89, [QubitId(1)]).unwrap(),
            ]],
        );
        let qasm = emit(&circuit).unwrap();
        assert!(qasm.contains("rx(pi/2) q[0];"));
        assert!(qasm.contains("rz(1.234568) q[1];"));
        assert!(!qasm.contains("bit["));
        assert!(!qasm.contains("measure"));
    }

    #[test]
    fn test_emit_qasm2_bell_state() {
        let qasm = emit_qasm2(&bell()).unwrap();

        assert!(qasm.contains("OPENQASM 2.0;"));
        assert!(qasm.contains("include \"qelib1.inc\";"));
        assert!(qasm.contains("qreg q[2];"));
        assert!(qasm.contains("creg c[2];"));
        assert!(qasm.contains("h q[0];"));
        assert!(qasm.contains("cx q[0], q[1];"));
        assert!(qasm.contains("measure q -> c;"));
        // No QASM3-specific syntax
        assert!(!qasm.contains("qubit["));
        assert!(!qasm.contains("bit["));
        assert!(!qasm.contains("= measure"));
    }

    #[test]
    fn test_inline_definitions_follow_the_include() {
        let circuit = circuit_of(
            4,
            vec![vec![
                GatePlacement::two(GateKind::ISwap, QubitId(0), QubitId(1)),
                GatePlacement::rotation(GateKind::RZZ, PI / 4.0, [QubitId(2), QubitId(3)]).unwrap(),
            ]],
        );

        let qasm3 = emit(&circuit).unwrap();
        assert!(qasm3.contains("gate iswap a, b"));
        assert!(qasm3.contains("gate rzz(theta) a, b"));
        assert!(qasm3.contains("rzz(pi/4) q[2], q[3];"));

        // qelib1.inc already declares rzz.
        let qasm2 = emit_qasm2(&circuit).unwrap();
        assert!(qasm2.contains("gate iswap a, b"));
        assert!(!qasm2.contains("gate rzz"));

        // Definitions come before the register declarations.
        let def = qasm3.find("gate iswap").unwrap();
        let decl = qasm3.find("qubit[4] q;").unwrap();
        assert!(def < decl);
    }

    #[test]
    fn test_basis_rejects_unknown_gate() {
        let options = EmitOptions::default().with_basis(BasisGates::ibm());
        let err = emit_with(&bell(), &options).unwrap_err();
        assert_eq!(
            err,
            EmitError::UnsupportedGate {
                gate: "h".into(),
                target: "ibm".into(),
            }
        );

        let circuit = circuit_of(
            2,
            vec![vec![
                GatePlacement::single(GateKind::SX, QubitId(0)),
                GatePlacement::single(GateKind::X, QubitId(1)),
            ]],
        );
        assert!(emit_with(&circuit, &options).is_ok());
    }

    #[test]
    fn test_layer_barriers() {
        let options = EmitOptions::default().with_layer_barriers(true);
        let qasm = emit_with(&bell(), &options).unwrap();
        assert_eq!(qasm.matches("barrier q;").count(), 1);
        let h = qasm.find("h q[0];").unwrap();
        let barrier = qasm.find("barrier q;").unwrap();
        let cx = qasm.find("cx q[0], q[1];").unwrap();
        assert!(h < barrier && barrier < cx);
    }

    #[test]
    fn test_format_angle() {
        assert_eq!(format_angle(PI), "pi");
        assert_eq!(format_angle(-PI / 4.0), "-pi/4");
        assert_eq!(format_angle(0.5), "0.500000");
    }
}
