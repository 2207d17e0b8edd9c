//! The circuit generator.

use qcgen_ir::{Circuit, Connectivity, GateKind};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument};

use crate::analysis::CircuitAnalysis;
use crate::config::CircuitConfig;
use crate::error::GenResult;
use crate::strategy::{self, Context};
use crate::weights::WeightTable;

/// Generates circuits from a validated [`CircuitConfig`].
///
/// Construction resolves gate names and connectivity once; every call to
/// [`generate`](Self::generate) builds a fresh circuit. With a fixed seed,
/// repeated calls return identical circuits.
#[derive(Debug, Clone)]
pub struct CircuitGenerator {
    config: CircuitConfig,
    single: Vec<GateKind>,
    two: Vec<GateKind>,
    connectivity: Connectivity,
    weights: Option<WeightTable>,
}

impl CircuitGenerator {
    /// Validate `config` and prepare a generator for it.
    pub fn new(config: CircuitConfig) -> GenResult<Self> {
        let resolved = config.resolve()?;

        Ok(Self {
            config,
            single: resolved.single,
            two: resolved.two,
            connectivity: resolved.connectivity,
            weights: resolved.weights,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &CircuitConfig {
        &self.config
    }

    /// Get the resolved connectivity.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// The configured seed, or a fresh one from OS entropy.
    pub(crate) fn base_seed(&self) -> u64 {
        self.config
            .seed
            .unwrap_or_else(|| ChaCha8Rng::from_entropy().next_u64())
    }

    /// Generate a circuit.
    pub fn generate(&self) -> GenResult<Circuit> {
        self.generate_with_seed(self.base_seed())
    }

    /// Generate a circuit from an explicit seed, ignoring the configured one.
    #[instrument(skip(self), fields(strategy = ?self.config.strategy, num_qubits = self.config.num_qubits, depth = self.config.depth))]
    pub fn generate_with_seed(&self, seed: u64) -> GenResult<Circuit> {
        info!(seed, "Generating circuit");

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let ctx = Context {
            num_qubits: self.config.num_qubits,
            single: &self.single,
            two: &self.two,
            connectivity: &self.connectivity,
            weights: self.weights.as_ref(),
            two_qubit_probability: self.config.two_qubit_probability,
            idle_probability: self.config.idle_probability,
            idle_policy: self.config.idle_policy,
        };

        let mut circuit = Circuit::new(self.config.name.clone(), self.config.num_qubits);
        for index in 0..self.config.depth {
            let layer = strategy::build_layer(self.config.strategy, &ctx, index, &mut rng)?;
            debug!(
                layer = index,
                gates = layer.len(),
                two_qubit = layer.num_two_qubit(),
                "Built layer"
            );
            circuit.push_layer(layer)?;
        }
        if self.config.measure {
            circuit.measure_all();
        }

        info!(
            seed,
            gates = circuit.num_gates(),
            layers = circuit.num_layers(),
            "Circuit generated"
        );
        Ok(circuit)
    }

    /// Generate `count` circuits.
    ///
    /// Circuit `i` uses the `i`-th seed drawn from a generator seeded with
    /// the base seed, so a seeded batch is reproducible and any member can
    /// be regenerated alone with [`generate_with_seed`](Self::generate_with_seed).
    pub fn generate_many(&self, count: usize) -> GenResult<Vec<Circuit>> {
        let mut seeds = seed_stream(self.base_seed());
        (0..count)
            .map(|_| self.generate_with_seed(seeds.next_u64()))
            .collect()
    }

    /// Summarize a circuit.
    pub fn analyze(circuit: &Circuit) -> CircuitAnalysis {
        CircuitAnalysis::of(circuit)
    }
}

/// Source of per-circuit seeds for a batch.
pub(crate) fn seed_stream(base_seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(base_seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{IdlePolicy, Strategy};
    use crate::error::GenError;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let config = CircuitConfig::new(3, 5).with_seed(42);
        let generator = CircuitGenerator::new(config.clone()).unwrap();
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        let c = CircuitGenerator::new(config).unwrap().generate().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.num_layers(), 5);
        assert_eq!(a.num_qubits(), 3);
        assert_eq!(a.name(), "random_circuit");
        assert!(a.is_measured());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = CircuitGenerator::new(CircuitConfig::new(6, 10).with_seed(1))
            .unwrap()
            .generate()
            .unwrap();
        let b = CircuitGenerator::new(CircuitConfig::new(6, 10).with_seed(2))
            .unwrap()
            .generate()
            .unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unseeded_generation_still_valid() {
        let circuit = CircuitGenerator::new(CircuitConfig::new(4, 3))
            .unwrap()
            .generate()
            .unwrap();
        assert_eq!(circuit.num_layers(), 3);
    }

    #[test]
    fn test_entangling_four_qubits() {
        let config = CircuitConfig::new(4, 10)
            .with_strategy(Strategy::Entangling)
            .with_seed(5);
        let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();
        assert_eq!(circuit.num_layers(), 10);
        for layer in circuit.layers() {
            assert_eq!(layer.num_two_qubit(), 2);
            assert_eq!(layer.len(), 2);
        }
    }

    #[test]
    fn test_layered_alternates() {
        let config = CircuitConfig::new(4, 6)
            .with_strategy(Strategy::Layered)
            .with_seed(3);
        let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();
        for (i, layer) in circuit.layers().iter().enumerate() {
            if i % 2 == 0 {
                assert_eq!(layer.len(), 4);
                assert_eq!(layer.num_two_qubit(), 0);
            } else {
                assert_eq!(layer.num_two_qubit(), 2);
            }
        }
    }

    #[test]
    fn test_odd_qubit_policies() {
        let base = CircuitConfig::new(5, 4)
            .with_strategy(Strategy::Entangling)
            .with_seed(12);

        let idle = CircuitGenerator::new(base.clone()).unwrap().generate().unwrap();
        for layer in idle.layers() {
            assert_eq!(layer.num_two_qubit(), 2);
            assert_eq!(layer.len(), 2);
        }

        let fill = CircuitGenerator::new(base.with_idle_policy(IdlePolicy::Fill))
            .unwrap()
            .generate()
            .unwrap();
        for layer in fill.layers() {
            assert_eq!(layer.num_two_qubit(), 2);
            assert_eq!(layer.len(), 3);
        }
    }

    #[test]
    fn test_empty_connectivity_rejected_for_pair_strategies() {
        for strategy in [Strategy::Layered, Strategy::Entangling] {
            let config = CircuitConfig::new(4, 4)
                .with_strategy(strategy)
                .with_connectivity([]);
            assert!(matches!(
                CircuitGenerator::new(config),
                Err(GenError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_random_without_edges_only_single_qubit() {
        let mut config = CircuitConfig::new(4, 8).with_seed(9).with_connectivity([]);
        config.two_qubit_probability = 1.0;
        let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();
        assert_eq!(CircuitGenerator::analyze(&circuit).two_qubit_gates, 0);
    }

    #[test]
    fn test_measure_flag() {
        let mut config = CircuitConfig::new(2, 2).with_seed(0);
        config.measure = false;
        let circuit = CircuitGenerator::new(config).unwrap().generate().unwrap();
        assert!(!circuit.is_measured());
    }

    #[test]
    fn test_generate_many_is_seeded() {
        let generator = CircuitGenerator::new(CircuitConfig::new(4, 6).with_seed(77)).unwrap();
        let batch = generator.generate_many(5).unwrap();
        assert_eq!(batch.len(), 5);
        assert_eq!(batch, generator.generate_many(5).unwrap());
        assert_ne!(batch[0], batch[1]);

        let mut seeds = seed_stream(77);
        seeds.next_u64();
        let second = generator.generate_with_seed(seeds.next_u64()).unwrap();
        assert_eq!(batch[1], second);

        assert!(generator.generate_many(0).unwrap().is_empty());
    }

    #[test]
    fn test_explicit_seed_overrides_config() {
        let generator = CircuitGenerator::new(CircuitConfig::new(3, 4).with_seed(1)).unwrap();
        let other = CircuitGenerator::new(CircuitConfig::new(3, 4).with_seed(2)).unwrap();
        assert_eq!(generator.generate_with_seed(2).unwrap(), other.generate().unwrap());
    }
}
