//! Gate weight table for the weighted strategy.

use std::collections::BTreeMap;

use qcgen_ir::GateKind;
use rand::distributions::WeightedIndex;
use rand::Rng;

use crate::config::parse_gate;
use crate::error::{GenError, GenResult};

/// Default weight of a gate when the configuration does not override it.
///
/// Single-qubit gates carry more total weight than two-qubit gates.
pub fn default_weight(gate: GateKind) -> f64 {
    match gate {
        GateKind::H => 0.30,
        GateKind::X => 0.20,
        GateKind::Y | GateKind::Z | GateKind::S | GateKind::T => 0.10,
        GateKind::Rx => 0.05,
        GateKind::Ry => 0.03,
        GateKind::Rz => 0.02,
        GateKind::CX => 0.20,
        GateKind::CZ => 0.15,
        GateKind::Swap => 0.10,
        GateKind::ISwap => 0.05,
        _ => 0.05,
    }
}

/// Resolved weights over a configured vocabulary.
#[derive(Debug, Clone)]
pub struct WeightTable {
    /// Single-qubit gates followed by two-qubit gates.
    gates: Vec<GateKind>,
    weights: Vec<f64>,
    combined: WeightedIndex<f64>,
    /// `None` when no single-qubit gate has positive weight.
    single: Option<(Vec<GateKind>, WeightedIndex<f64>)>,
}

impl WeightTable {
    /// Build the table for the given vocabularies.
    ///
    /// Overrides may name gates outside the vocabulary; those entries have
    /// no effect. Unknown names, negative or non-finite weights, and a zero
    /// total are rejected.
    pub fn resolve(
        single: &[GateKind],
        two: &[GateKind],
        overrides: Option<&BTreeMap<String, f64>>,
    ) -> GenResult<Self> {
        let mut custom = BTreeMap::new();
        if let Some(overrides) = overrides {
            for (name, &weight) in overrides {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(GenError::InvalidConfiguration(format!(
                        "weight for '{name}' must be a finite non-negative number, got {weight}"
                    )));
                }
                custom.insert(parse_gate(name)?, weight);
            }
        }
        let weight_of = |g: GateKind| custom.get(&g).copied().unwrap_or_else(|| default_weight(g));

        let gates: Vec<GateKind> = single.iter().chain(two).copied().collect();
        let weights: Vec<f64> = gates.iter().map(|&g| weight_of(g)).collect();
        let combined = WeightedIndex::new(&weights).map_err(|_| {
            GenError::InvalidConfiguration("total gate weight must be positive".into())
        })?;

        let single_weights: Vec<f64> = single.iter().map(|&g| weight_of(g)).collect();
        let single = WeightedIndex::new(&single_weights)
            .ok()
            .map(|dist| (single.to_vec(), dist));

        Ok(Self {
            gates,
            weights,
            combined,
            single,
        })
    }

    /// Draw a gate from the combined vocabulary.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> GateKind {
        self.gates[rng.sample(&self.combined)]
    }

    /// Draw a single-qubit gate, if any has positive weight.
    pub fn draw_single<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<GateKind> {
        self.single
            .as_ref()
            .map(|(gates, dist)| gates[rng.sample(dist)])
    }

    /// Weight assigned to a vocabulary gate.
    pub fn weight(&self, gate: GateKind) -> Option<f64> {
        self.gates
            .iter()
            .position(|&g| g == gate)
            .map(|i| self.weights[i])
    }
}
