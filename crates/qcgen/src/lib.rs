//! Synthetic Quantum Circuit Generator
//!
//! This crate generates layered quantum circuits for testing, benchmarking
//! and teaching. A [`CircuitConfig`] fixes the circuit size, the gate
//! vocabulary, the connectivity and a [`Strategy`]; a [`CircuitGenerator`]
//! turns it into a [`Circuit`](qcgen_ir::Circuit) in which no qubit carries two
//! operations in the same layer and every two-qubit gate sits on a connected
//! pair.
//!
//! # Strategies
//!
//! | Strategy | Layer contents |
//! |----------|----------------|
//! | `random` | Each free qubit idles, starts a two-qubit gate with a free neighbour, or gets a single-qubit gate |
//! | `weighted` | As `random`, with gates drawn from a weight table |
//! | `layered` | Single-qubit layers alternating with brickwork two-qubit layers |
//! | `entangling` | A maximal set of disjoint two-qubit gates in every layer |
//!
//! # Example: Generating and Exporting
//!
//! ```rust
//! use qcgen::{CircuitConfig, CircuitExport, CircuitGenerator, Strategy};
//!
//! let config = CircuitConfig::new(4, 10)
//!     .with_strategy(Strategy::Entangling)
//!     .with_seed(42);
//! let generator = CircuitGenerator::new(config).unwrap();
//! let circuit = generator.generate().unwrap();
//!
//! let analysis = CircuitGenerator::analyze(&circuit);
//! assert_eq!(analysis.num_layers, 10);
//! assert!(analysis.two_qubit_gates_per_layer.iter().all(|&n| n == 2));
//!
//! let qasm = circuit.to_universal_format().unwrap();
//! assert!(qasm.starts_with("OPENQASM 3.0;"));
//!
//! let data = circuit.to_structured_data();
//! assert_eq!(data["num_qubits"], 4);
//! ```
//!
//! # Example: Labeled Datasets
//!
//! ```rust
//! use qcgen::{CircuitConfig, CircuitGenerator, DatasetConfig};
//!
//! let generator = CircuitGenerator::new(CircuitConfig::new(4, 6).with_seed(1)).unwrap();
//! let entries = generator
//!     .generate_dataset(&DatasetConfig::new(10).with_bug_ratio(0.5))
//!     .unwrap();
//! assert_eq!(entries.len(), 10);
//! assert_eq!(entries[0].id, "circuit_000");
//! ```
//!
//! # Example: Loading a Configuration
//!
//! ```rust
//! use qcgen::{CircuitConfig, CircuitGenerator};
//!
//! let config = CircuitConfig::from_yaml_str(
//!     "num_qubits: 3\ndepth: 5\nstrategy: layered\nconnectivity: [[0, 1], [1, 2]]\nseed: 7\n",
//! )
//! .unwrap();
//! let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();
//! assert_eq!(circuit.num_layers(), 5);
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod generator;
pub mod mutate;
mod strategy;
pub mod weights;

pub use analysis::CircuitAnalysis;
pub use config::{CircuitConfig, IdlePolicy, Strategy};
pub use dataset::{DatasetConfig, DatasetEntry, dataset_to_json};
pub use error::{GenError, GenResult};
pub use export::{CircuitExport, ExportConfig, from_json, from_structured_data, to_json, to_structured_data};
pub use generator::CircuitGenerator;
pub use mutate::{BugInjector, BugKind, InjectedBug};
pub use weights::WeightTable;

pub use qcgen_ir::{BasisGates, Circuit, Connectivity, GateKind, GatePlacement, Layer, QubitId};
pub use qcgen_qasm3::{EmitOptions, QasmVersion};
