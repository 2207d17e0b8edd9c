//! Labeled datasets of generated circuits.
//!
//! A dataset is a seeded batch from one [`CircuitGenerator`]. A share of the
//! circuits, set by `bug_ratio`, gets a few mutations from a [`BugInjector`]
//! and carries the injection log as its label.

use qcgen_ir::Circuit;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::error::{GenError, GenResult};
use crate::export::{ExportConfig, to_structured_data};
use crate::generator::{CircuitGenerator, seed_stream};
use crate::mutate::{BugInjector, BugKind, InjectedBug};

/// Stream of the batch generator used for bug decisions, apart from the
/// circuit seeds.
const LABEL_STREAM: u64 = 1;

/// Dataset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Number of circuits.
    pub num_circuits: usize,
    /// Probability that a circuit receives bugs.
    #[serde(default)]
    pub bug_ratio: f64,
    /// Upper bound on injection attempts per buggy circuit (at least one).
    #[serde(default = "default_max_bugs")]
    pub max_bugs: u32,
    /// Mutation kinds to draw from; all kinds when empty.
    #[serde(default)]
    pub bug_kinds: Vec<BugKind>,
}

fn default_max_bugs() -> u32 {
    3
}

impl DatasetConfig {
    /// A bug-free dataset of `num_circuits` circuits.
    pub fn new(num_circuits: usize) -> Self {
        Self {
            num_circuits,
            bug_ratio: 0.0,
            max_bugs: default_max_bugs(),
            bug_kinds: vec![],
        }
    }

    /// Set the share of circuits that receive bugs.
    #[must_use]
    pub fn with_bug_ratio(mut self, bug_ratio: f64) -> Self {
        self.bug_ratio = bug_ratio;
        self
    }

    /// Restrict the mutation kinds.
    #[must_use]
    pub fn with_bug_kinds(mut self, kinds: impl IntoIterator<Item = BugKind>) -> Self {
        self.bug_kinds = kinds.into_iter().collect();
        self
    }

    /// Validate dataset settings.
    pub fn validate(&self) -> GenResult<()> {
        if !(0.0..=1.0).contains(&self.bug_ratio) {
            return Err(GenError::InvalidConfiguration(format!(
                "bug_ratio must be in [0, 1], got {}",
                self.bug_ratio
            )));
        }
        if self.bug_ratio > 0.0 && self.max_bugs == 0 {
            return Err(GenError::InvalidConfiguration(
                "max_bugs must be positive when bug_ratio is set".into(),
            ));
        }
        Ok(())
    }
}

/// One labeled circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    /// `circuit_000`, `circuit_001`, ...
    pub id: String,
    /// Seed the circuit was generated from.
    pub seed: u64,
    pub circuit: Circuit,
    /// Whether at least one mutation was applied.
    pub has_bugs: bool,
    pub bugs: Vec<InjectedBug>,
}

impl DatasetEntry {
    /// Structured form: the entry labels plus the circuit's structured data.
    pub fn to_structured_data(&self) -> GenResult<Value> {
        Ok(json!({
            "id": self.id,
            "seed": self.seed,
            "has_bugs": self.has_bugs,
            "injected_bugs": serde_json::to_value(&self.bugs)?,
            "circuit": to_structured_data(&self.circuit),
        }))
    }
}

/// Serialize a dataset as a JSON array.
pub fn dataset_to_json(entries: &[DatasetEntry], config: &ExportConfig) -> GenResult<String> {
    let values = entries
        .iter()
        .map(DatasetEntry::to_structured_data)
        .collect::<GenResult<Vec<_>>>()?;
    let value = Value::Array(values);
    let text = if config.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(text)
}

impl CircuitGenerator {
    /// Generate a labeled dataset.
    ///
    /// Circuits match [`generate_many`](Self::generate_many) with the same
    /// count. Bug decisions come from a separate stream of the same base
    /// seed, so a seeded dataset is reproducible.
    #[instrument(skip(self, dataset), fields(num_circuits = dataset.num_circuits, bug_ratio = dataset.bug_ratio))]
    pub fn generate_dataset(&self, dataset: &DatasetConfig) -> GenResult<Vec<DatasetEntry>> {
        dataset.validate()?;

        let base_seed = self.base_seed();
        let mut seeds = seed_stream(base_seed);
        let mut labels = seed_stream(base_seed);
        labels.set_stream(LABEL_STREAM);

        let mut entries = Vec::with_capacity(dataset.num_circuits);
        for i in 0..dataset.num_circuits {
            let seed = seeds.next_u64();
            let mut circuit = self.generate_with_seed(seed)?;
            let mut bugs = vec![];

            if labels.gen_bool(dataset.bug_ratio) {
                let attempts = labels.gen_range(1..=dataset.max_bugs);
                let mut injector = BugInjector::new(labels.next_u64());
                let (mutated, log) =
                    injector.inject(&circuit, &dataset.bug_kinds, attempts as usize)?;
                debug!(circuit = i, attempts, applied = log.len(), "Injected bugs");
                circuit = mutated;
                bugs = log;
            }

            entries.push(DatasetEntry {
                id: format!("circuit_{i:03}"),
                seed,
                circuit,
                has_bugs: !bugs.is_empty(),
                bugs,
            });
        }

        let buggy = entries.iter().filter(|e| e.has_bugs).count();
        info!(base_seed, circuits = entries.len(), buggy, "Dataset generated");
        Ok(entries)
    }
}
