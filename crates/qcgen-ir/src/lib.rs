//! qcgen Circuit Representation
//!
//! This crate provides the data structures the qcgen generator places gates
//! into. A circuit is a fixed number of qubits and an ordered list of layers;
//! every layer holds gate placements that never share a qubit.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a qubit by index
//! - **Gates**: [`GateKind`] is the recognized gate vocabulary
//! - **Placements**: [`GatePlacement`] binds a gate to its qubits and angle
//! - **Layers**: [`Layer`] enforces the one-operation-per-qubit rule
//! - **Circuit**: [`Circuit`] is the container returned by the generator
//! - **Connectivity**: [`Connectivity`] lists the qubit pairs two-qubit gates may use
//! - **Basis**: [`BasisGates`] names the gates a target accepts
//!
//! # Example: Building a Layered Circuit
//!
//! ```rust
//! use qcgen_ir::{Circuit, GateKind, GatePlacement, Layer, QubitId};
//!
//! let mut circuit = Circuit::new("bell", 2);
//!
//! let mut first = Layer::new();
//! first.push(GatePlacement::single(GateKind::H, QubitId(0))).unwrap();
//! circuit.push_layer(first).unwrap();
//!
//! let mut second = Layer::new();
//! second
//!     .push(GatePlacement::two(GateKind::CX, QubitId(0), QubitId(1)))
//!     .unwrap();
//! circuit.push_layer(second).unwrap();
//!
//! assert_eq!(circuit.num_layers(), 2);
//! assert_eq!(circuit.num_gates(), 2);
//! ```
//!
//! # Example: Parameterized Placement
//!
//! ```rust
//! use qcgen_ir::{GateKind, GatePlacement, QubitId};
//! use std::f64::consts::PI;
//!
//! let rx = GatePlacement::rotation(GateKind::Rx, PI / 2.0, [QubitId(0)]).unwrap();
//! assert_eq!(rx.angle(), Some(PI / 2.0));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Parameterized |
//! |------|--------|---------------|
//! | `id`, `h`, `x`, `y`, `z` | 1 | no |
//! | `s`, `sdg`, `t`, `tdg`, `sx`, `sxdg` | 1 | no |
//! | `rx`, `ry`, `rz`, `p` | 1 | yes |
//! | `cx`, `cy`, `cz`, `ch`, `swap`, `iswap` | 2 | no |
//! | `crx`, `cry`, `crz`, `cp`, `rxx`, `ryy`, `rzz` | 2 | yes |

pub mod basis;
pub mod circuit;
pub mod connectivity;
pub mod error;
pub mod gate;
pub mod placement;
pub mod qubit;

pub use basis::BasisGates;
pub use circuit::{Circuit, Layer};
pub use connectivity::Connectivity;
pub use error::{IrError, IrResult};
pub use gate::{GateArity, GateKind};
pub use placement::GatePlacement;
pub use qubit::QubitId;
