//! `OpenQASM` Emitter for qcgen
//!
//! This crate serializes layered qcgen circuits into `OpenQASM` 3.0 (the
//! default) or `OpenQASM` 2.0 text.
//!
//! # Supported Features
//!
//! | Feature | `OpenQASM` 3.0 | `OpenQASM` 2.0 |
//! |---------|----------------|----------------|
//! | Version declaration | `OPENQASM 3.0;` | `OPENQASM 2.0;` |
//! | Standard include | `include "stdgates.inc";` | `include "qelib1.inc";` |
//! | Qubit declarations | `qubit[5] q;` | `qreg q[5];` |
//! | Classical bits | `bit[5] c;` | `creg c[5];` |
//! | Parameterized gates | `rx(pi/4) q[0];` | `rx(pi/4) q[0];` |
//! | Measurements | `c = measure q;` | `measure q -> c;` |
//! | Layer barriers | `barrier q;` | `barrier q;` |
//!
//! Gates that the standard include does not declare (for example `iswap` or
//! `rzz` in 3.0) are emitted with an inline `gate` definition so the output
//! is self-contained.
//!
//! # Example: Emitting QASM
//!
//! ```rust
//! use qcgen_ir::{Circuit, GateKind, GatePlacement, Layer, QubitId};
//! use qcgen_qasm3::emit;
//!
//! let mut circuit = Circuit::new("bell", 2);
//! circuit
//!     .push_layer(Layer::from_placements([GatePlacement::single(GateKind::H, QubitId(0))]).unwrap())
//!     .unwrap()
//!     .push_layer(
//!         Layer::from_placements([GatePlacement::two(GateKind::CX, QubitId(0), QubitId(1))]).unwrap(),
//!     )
//!     .unwrap();
//! circuit.measure_all();
//!
//! let qasm = emit(&circuit).unwrap();
//! assert!(qasm.contains("OPENQASM 3.0;"));
//! assert!(qasm.contains("h q[0];"));
//! assert!(qasm.contains("cx q[0], q[1];"));
//! assert!(qasm.contains("c = measure q;"));
//! ```
//!
//! # Example: Restricting to a Device Basis
//!
//! ```rust
//! use qcgen_ir::{BasisGates, Circuit, GateKind, GatePlacement, Layer, QubitId};
//! use qcgen_qasm3::{emit_with, EmitError, EmitOptions};
//!
//! let mut circuit = Circuit::new("h_only", 1);
//! circuit
//!     .push_layer(Layer::from_placements([GatePlacement::single(GateKind::H, QubitId(0))]).unwrap())
//!     .unwrap();
//!
//! let options = EmitOptions::default().with_basis(BasisGates::ibm());
//! let err = emit_with(&circuit, &options).unwrap_err();
//! assert!(matches!(err, EmitError::UnsupportedGate { .. }));
//! ```

mod emitter;
mod error;

pub use emitter::{EmitOptions, QasmVersion, emit, emit_qasm2, emit_with};
pub use error::{EmitError, EmitResult};
