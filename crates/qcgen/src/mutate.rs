//! Bug injection: controlled mutations of generated circuits.
//!
//! A [`BugInjector`] applies small, logged edits that model programming
//! mistakes: a wrong gate, a perturbed angle, a dropped or extra gate, or
//! reversed control and target. Every edit keeps the layer invariant, so the
//! mutated circuit is still a valid [`Circuit`]. Edits may ignore the
//! connectivity the circuit was generated with.

use qcgen_ir::{Circuit, GateKind, GatePlacement, Layer, QubitId};
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GenResult;

/// Kind of mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BugKind {
    /// Swap `h` with `x`, or `cx` with `cz`.
    GateReplacement,
    /// Shift a rotation angle by up to 0.5 rad.
    AnglePerturbation,
    /// Remove a gate.
    GateDeletion,
    /// Add an `h` or `cx` on free qubits.
    GateInsertion,
    /// Reverse the operands of a `cx` or `cz`.
    SwapControlTarget,
}

impl BugKind {
    /// Every mutation kind.
    pub const ALL: [BugKind; 5] = [
        BugKind::GateReplacement,
        BugKind::AnglePerturbation,
        BugKind::GateDeletion,
        BugKind::GateInsertion,
        BugKind::SwapControlTarget,
    ];
}

/// Record of one applied mutation.
///
/// `layer` and `index` locate the placement in the mutated circuit (for a
/// deletion, where it used to be).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InjectedBug {
    /// A gate was swapped for a different gate on the same qubits.
    GateReplacement {
        layer: usize,
        index: usize,
        /// Gate before the edit.
        old_gate: GateKind,
        /// Gate after the edit.
        new_gate: GateKind,
    },
    /// A rotation angle was shifted.
    AnglePerturbation {
        layer: usize,
        index: usize,
        gate: GateKind,
        /// Angle before the edit, in radians.
        old_angle: f64,
        /// Angle after the edit, in radians.
        new_angle: f64,
        /// Shift applied to `old_angle`.
        delta: f64,
    },
    /// A placement was removed.
    GateDeletion {
        layer: usize,
        index: usize,
        /// The removed gate.
        gate: GateKind,
        /// Qubits the removed gate acted on.
        qubits: Vec<QubitId>,
    },
    /// A placement was appended to a layer on qubits it left free.
    GateInsertion {
        layer: usize,
        index: usize,
        /// The inserted gate.
        gate: GateKind,
        /// Qubits of the inserted gate, control first.
        qubits: Vec<QubitId>,
    },
    /// The operands of a controlled gate were reversed.
    SwapControlTarget {
        layer: usize,
        index: usize,
        gate: GateKind,
        /// Operands before the edit, control first.
        old_qubits: Vec<QubitId>,
        /// Operands after the edit, control first.
        new_qubits: Vec<QubitId>,
    },
}

impl InjectedBug {
    /// The kind of mutation this records.
    pub fn kind(&self) -> BugKind {
        match self {
            InjectedBug::GateReplacement { .. } => BugKind::GateReplacement,
            InjectedBug::AnglePerturbation { .. } => BugKind::AnglePerturbation,
            InjectedBug::GateDeletion { .. } => BugKind::GateDeletion,
            InjectedBug::GateInsertion { .. } => BugKind::GateInsertion,
            InjectedBug::SwapControlTarget { .. } => BugKind::SwapControlTarget,
        }
    }

    /// Layer the mutation touched.
    pub fn layer(&self) -> usize {
        match self {
            InjectedBug::GateReplacement { layer, .. }
            | InjectedBug::AnglePerturbation { layer, .. }
            | InjectedBug::GateDeletion { layer, .. }
            | InjectedBug::GateInsertion { layer, .. }
            | InjectedBug::SwapControlTarget { layer, .. } => *layer,
        }
    }
}

/// Seeded source of circuit mutations.
#[derive(Debug, Clone)]
pub struct BugInjector {
    rng: ChaCha8Rng,
}

type Layers = Vec<Vec<GatePlacement>>;

impl BugInjector {
    /// Create an injector with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Attempt `num_bugs` mutations on a copy of `circuit`.
    ///
    /// Each attempt picks a kind uniformly from `kinds` (all kinds when
    /// empty). Attempts with nothing to act on are skipped and not logged,
    /// so the log may be shorter than `num_bugs`.
    pub fn inject(
        &mut self,
        circuit: &Circuit,
        kinds: &[BugKind],
        num_bugs: usize,
    ) -> GenResult<(Circuit, Vec<InjectedBug>)> {
        let all = BugKind::ALL;
        let kinds = if kinds.is_empty() { &all[..] } else { kinds };
        let mut layers: Layers = circuit
            .layers()
            .iter()
            .map(|l| l.placements().to_vec())
            .collect();

        let mut log = vec![];
        for _ in 0..num_bugs {
            let Some(kind) = kinds.choose(&mut self.rng).copied() else {
                break;
            };
            let bug = match kind {
                BugKind::GateReplacement => self.replace_gate(&mut layers)?,
                BugKind::AnglePerturbation => self.perturb_angle(&mut layers)?,
                BugKind::GateDeletion => self.delete_gate(&mut layers),
                BugKind::GateInsertion => self.insert_gate(&mut layers, circuit.num_qubits())?,
                BugKind::SwapControlTarget => self.swap_control_target(&mut layers)?,
            };
            match bug {
                Some(bug) => {
                    debug!(?bug, "Injected bug");
                    log.push(bug);
                }
                None => debug!(?kind, "No eligible placement; skipped"),
            }
        }

        let rebuilt = layers
            .into_iter()
            .map(Layer::from_placements)
            .collect::<Result<Vec<_>, _>>()?;
        let mutated = circuit.with_layers(rebuilt)?;
        info!(requested = num_bugs, applied = log.len(), "Bug injection finished");
        Ok((mutated, log))
    }

    /// Uniformly choose a placement satisfying `eligible`.
    fn choose_placement(
        &mut self,
        layers: &Layers,
        eligible: impl Fn(&GatePlacement) -> bool,
    ) -> Option<(usize, usize)> {
        let eligible = &eligible;
        let candidates: Vec<(usize, usize)> = layers
            .iter()
            .enumerate()
            .flat_map(move |(l, placements)| {
                placements
                    .iter()
                    .enumerate()
                    .filter(move |(_, p)| eligible(p))
                    .map(move |(i, _)| (l, i))
            })
            .collect();
        candidates.choose(&mut self.rng).copied()
    }

    fn replace_gate(&mut self, layers: &mut Layers) -> GenResult<Option<InjectedBug>> {
        let Some((layer, index)) = self.choose_placement(layers, |_| true) else {
            return Ok(None);
        };
        let old = &layers[layer][index];
        let old_gate = old.gate();
        let new_gate = match old_gate {
            GateKind::H => GateKind::X,
            GateKind::X => GateKind::H,
            GateKind::CX => GateKind::CZ,
            GateKind::CZ => GateKind::CX,
            _ => return Ok(None),
        };
        let replacement = GatePlacement::new(new_gate, old.qubits().to_vec(), None)?;
        layers[layer][index] = replacement;
        Ok(Some(InjectedBug::GateReplacement {
            layer,
            index,
            old_gate,
            new_gate,
        }))
    }

    fn perturb_angle(&mut self, layers: &mut Layers) -> GenResult<Option<InjectedBug>> {
        let Some((layer, index)) = self.choose_placement(layers, |p| p.angle().is_some()) else {
            return Ok(None);
        };
        let old = &layers[layer][index];
        let gate = old.gate();
        let old_angle = old.angle().unwrap_or_default();
        let delta = self.rng.gen_range(-0.5..=0.5);
        let new_angle = old_angle + delta;
        let replacement = GatePlacement::new(gate, old.qubits().to_vec(), Some(new_angle))?;
        layers[layer][index] = replacement;
        Ok(Some(InjectedBug::AnglePerturbation {
            layer,
            index,
            gate,
            old_angle,
            new_angle,
            delta,
        }))
    }

    fn delete_gate(&mut self, layers: &mut Layers) -> Option<InjectedBug> {
        let (layer, index) = self.choose_placement(layers, |_| true)?;
        let removed = layers[layer].remove(index);
        Some(InjectedBug::GateDeletion {
            layer,
            index,
            gate: removed.gate(),
            qubits: removed.qubits().to_vec(),
        })
    }

    fn insert_gate(
        &mut self,
        layers: &mut Layers,
        num_qubits: u32,
    ) -> GenResult<Option<InjectedBug>> {
        let Some(layer) = (0..layers.len()).choose(&mut self.rng) else {
            return Ok(None);
        };
        let free: Vec<u32> = (0..num_qubits)
            .filter(|&q| !layers[layer].iter().any(|p| p.acts_on(QubitId(q))))
            .collect();

        let use_two_qubit = free.len() >= 2 && self.rng.gen_bool(0.5);
        let placement = if use_two_qubit {
            let pair = free
                .choose_multiple(&mut self.rng, 2)
                .map(|&q| QubitId(q));
            GatePlacement::new(GateKind::CX, pair, None)?
        } else {
            let Some(q) = free.choose(&mut self.rng).copied() else {
                return Ok(None);
            };
            GatePlacement::new(GateKind::H, [QubitId(q)], None)?
        };

        let index = layers[layer].len();
        let bug = InjectedBug::GateInsertion {
            layer,
            index,
            gate: placement.gate(),
            qubits: placement.qubits().to_vec(),
        };
        layers[layer].push(placement);
        Ok(Some(bug))
    }

    fn swap_control_target(&mut self, layers: &mut Layers) -> GenResult<Option<InjectedBug>> {
        let Some((layer, index)) =
            self.choose_placement(layers, |p| matches!(p.gate(), GateKind::CX | GateKind::CZ))
        else {
            return Ok(None);
        };
        let old = &layers[layer][index];
        let gate = old.gate();
        let old_qubits = old.qubits().to_vec();
        let new_qubits: Vec<QubitId> = old_qubits.iter().rev().copied().collect();
        layers[layer][index] = GatePlacement::new(gate, new_qubits.clone(), None)?;
        Ok(Some(InjectedBug::SwapControlTarget {
            layer,
            index,
            gate,
            old_qubits,
            new_qubits,
        }))
    }
}
