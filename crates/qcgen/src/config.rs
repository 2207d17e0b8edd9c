//! Generator configuration.
//!
//! A [`CircuitConfig`] can be built in code, or loaded from YAML or JSON:
//!
//! ```yaml
//! num_qubits: 5
//! depth: 8
//! strategy: layered
//! single_qubit_gates: [h, rx, t]
//! two_qubit_gates: [cz]
//! connectivity: [[0, 1], [1, 2], [2, 3], [3, 4]]
//! seed: 7
//! ```
//!
//! Every field except `num_qubits` and `depth` has a default.

use std::collections::BTreeMap;
use std::path::Path;

use qcgen_ir::{Connectivity, GateArity, GateKind};
use serde::{Deserialize, Serialize};

use crate::error::{GenError, GenResult};
use crate::weights::WeightTable;

/// Gate placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniform choice of gates, qubits and pairs.
    #[default]
    Random,
    /// Gates drawn from a non-uniform weight table.
    Weighted,
    /// Alternating single-qubit and two-qubit layers.
    Layered,
    /// Every layer carries a maximal set of disjoint two-qubit gates.
    Entangling,
}

impl Strategy {
    /// Check if every layer (or every other layer) is a two-qubit layer.
    pub fn needs_pairs(self) -> bool {
        matches!(self, Strategy::Layered | Strategy::Entangling)
    }
}

/// What happens to qubits left unmatched in a two-qubit layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdlePolicy {
    /// Leave them without an operation.
    #[default]
    Idle,
    /// Give each a uniformly chosen single-qubit gate.
    Fill,
}

/// Complete generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Number of qubits.
    pub num_qubits: u32,

    /// Number of layers.
    pub depth: u32,

    /// Placement strategy.
    #[serde(default)]
    pub strategy: Strategy,

    /// Single-qubit gate vocabulary.
    #[serde(default = "default_single_qubit_gates")]
    pub single_qubit_gates: Vec<String>,

    /// Two-qubit gate vocabulary.
    #[serde(default = "default_two_qubit_gates")]
    pub two_qubit_gates: Vec<String>,

    /// Allowed qubit pairs for two-qubit gates. `None` means all-to-all.
    #[serde(default)]
    pub connectivity: Option<Vec<(u32, u32)>>,

    /// Seed for reproducible generation. `None` draws one from entropy.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Measure every qubit after the last layer.
    #[serde(default = "default_true")]
    pub measure: bool,

    /// Probability that a free qubit starts a two-qubit gate (random strategy).
    #[serde(default = "default_two_qubit_probability")]
    pub two_qubit_probability: f64,

    /// Probability that a free qubit stays idle (random and weighted strategies).
    #[serde(default = "default_idle_probability")]
    pub idle_probability: f64,

    /// Gate-name to weight overrides for the weighted strategy.
    #[serde(default)]
    pub weights: Option<BTreeMap<String, f64>>,

    /// Treatment of qubits left unmatched in two-qubit layers.
    #[serde(default)]
    pub idle_policy: IdlePolicy,

    /// Name given to generated circuits.
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_single_qubit_gates() -> Vec<String> {
    ["h", "x", "y", "z"].map(String::from).to_vec()
}

fn default_two_qubit_gates() -> Vec<String> {
    ["cx", "cz"].map(String::from).to_vec()
}

fn default_true() -> bool {
    true
}

fn default_two_qubit_probability() -> f64 {
    0.3
}

fn default_idle_probability() -> f64 {
    0.1
}

fn default_name() -> String {
    "random_circuit".into()
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            num_qubits: 2,
            depth: 1,
            strategy: Strategy::default(),
            single_qubit_gates: default_single_qubit_gates(),
            two_qubit_gates: default_two_qubit_gates(),
            connectivity: None,
            seed: None,
            measure: true,
            two_qubit_probability: default_two_qubit_probability(),
            idle_probability: default_idle_probability(),
            weights: None,
            idle_policy: IdlePolicy::default(),
            name: default_name(),
        }
    }
}

impl CircuitConfig {
    /// Create a configuration with default settings for the given size.
    pub fn new(num_qubits: u32, depth: u32) -> Self {
        Self {
            num_qubits,
            depth,
            ..Self::default()
        }
    }

    /// Set the strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Restrict two-qubit gates to the given pairs.
    #[must_use]
    pub fn with_connectivity(mut self, pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        self.connectivity = Some(pairs.into_iter().collect());
        self
    }

    /// Replace both gate vocabularies.
    #[must_use]
    pub fn with_gates(
        mut self,
        single: impl IntoIterator<Item = impl Into<String>>,
        two: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.single_qubit_gates = single.into_iter().map(Into::into).collect();
        self.two_qubit_gates = two.into_iter().map(Into::into).collect();
        self
    }

    /// Set the leftover-qubit policy.
    #[must_use]
    pub fn with_idle_policy(mut self, policy: IdlePolicy) -> Self {
        self.idle_policy = policy;
        self
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml_str(text: &str) -> GenResult<Self> {
        let config: Self = serde_yaml_ng::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON string.
    pub fn from_json_str(text: &str) -> GenResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file.
    ///
    /// `.json` files are read as JSON, anything else as YAML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> GenResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| GenError::Io(format!("Failed to read {}: {e}", path.display())))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> GenResult<()> {
        self.resolve().map(|_| ())
    }

    /// Validate and resolve everything generation needs, in one pass.
    pub(crate) fn resolve(&self) -> GenResult<Resolved> {
        if self.num_qubits == 0 {
            return Err(invalid("num_qubits must be positive"));
        }
        if self.depth == 0 {
            return Err(invalid("depth must be positive"));
        }

        check_probability("two_qubit_probability", self.two_qubit_probability)?;
        check_probability("idle_probability", self.idle_probability)?;

        let single = self.single_qubit_kinds()?;
        let two = self.two_qubit_kinds()?;
        if single.is_empty() && two.is_empty() {
            return Err(invalid("at least one gate vocabulary must be non-empty"));
        }

        let connectivity = self.resolve_connectivity()?;

        match self.strategy {
            Strategy::Layered if single.is_empty() => {
                return Err(invalid("layered strategy needs single-qubit gates"));
            }
            s if s.needs_pairs() && two.is_empty() => {
                return Err(invalid(format!(
                    "{s:?} strategy needs two-qubit gates"
                )));
            }
            s if s.needs_pairs() && connectivity.is_empty() => {
                return Err(invalid(format!(
                    "{s:?} strategy needs at least one connected qubit pair"
                )));
            }
            _ => {}
        }

        let weights = if self.strategy == Strategy::Weighted {
            Some(WeightTable::resolve(&single, &two, self.weights.as_ref())?)
        } else {
            if let Some(weights) = &self.weights {
                // Still reject names nobody could ever match.
                for name in weights.keys() {
                    parse_gate(name)?;
                }
            }
            None
        };

        Ok(Resolved {
            single,
            two,
            connectivity,
            weights,
        })
    }

    /// Resolve the single-qubit vocabulary.
    fn single_qubit_kinds(&self) -> GenResult<Vec<GateKind>> {
        resolve_vocabulary(&self.single_qubit_gates, GateArity::Single)
    }

    /// Resolve the two-qubit vocabulary.
    fn two_qubit_kinds(&self) -> GenResult<Vec<GateKind>> {
        resolve_vocabulary(&self.two_qubit_gates, GateArity::Two)
    }

    /// Build the connectivity graph, all-to-all when none is configured.
    fn resolve_connectivity(&self) -> GenResult<Connectivity> {
        match &self.connectivity {
            Some(pairs) => Ok(Connectivity::from_edges(
                self.num_qubits,
                pairs.iter().copied(),
            )?),
            None => Ok(Connectivity::full(self.num_qubits)),
        }
    }
}

/// Gate vocabularies, connectivity and weights resolved from a valid config.
#[derive(Debug)]
pub(crate) struct Resolved {
    pub single: Vec<GateKind>,
    pub two: Vec<GateKind>,
    pub connectivity: Connectivity,
    pub weights: Option<WeightTable>,
}

fn invalid(msg: impl Into<String>) -> GenError {
    GenError::InvalidConfiguration(msg.into())
}

fn check_probability(field: &str, value: f64) -> GenResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(format!("{field} must be in [0, 1], got {value}")))
    }
}

pub(crate) fn parse_gate(name: &str) -> GenResult<GateKind> {
    GateKind::from_name(name).ok_or_else(|| invalid(format!("unrecognized gate name '{name}'")))
}

/// Parse names, check their arity and drop repeats while keeping order.
fn resolve_vocabulary(names: &[String], arity: GateArity) -> GenResult<Vec<GateKind>> {
    let mut kinds = Vec::with_capacity(names.len());
    for name in names {
        let kind = parse_gate(name)?;
        if kind.arity() != arity {
            return Err(invalid(format!(
                "gate '{name}' acts on {} qubit(s) but is listed with {}-qubit gates",
                kind.num_qubits(),
                arity.num_qubits()
            )));
        }
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
