//! Layer construction for each placement strategy.
//!
//! Each strategy builds one [`Layer`] at a time from a shared [`Context`]
//! and the generator's seeded [`ChaCha8Rng`], whose output stream is fixed
//! across platforms and `rand` releases.

mod entangling;
mod layered;
mod random;
mod weighted;

use std::f64::consts::TAU;

use qcgen_ir::{Connectivity, GateKind, GatePlacement, Layer, QubitId};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::config::{IdlePolicy, Strategy};
use crate::error::GenResult;
use crate::weights::WeightTable;

/// Resolved inputs shared by every layer of one generation run.
#[derive(Debug)]
pub(crate) struct Context<'a> {
    pub num_qubits: u32,
    pub single: &'a [GateKind],
    pub two: &'a [GateKind],
    pub connectivity: &'a Connectivity,
    pub weights: Option<&'a WeightTable>,
    pub two_qubit_probability: f64,
    pub idle_probability: f64,
    pub idle_policy: IdlePolicy,
}

/// Build layer `index` with the given strategy.
pub(crate) fn build_layer(
    strategy: Strategy,
    ctx: &Context<'_>,
    index: u32,
    rng: &mut ChaCha8Rng,
) -> GenResult<Layer> {
    match strategy {
        Strategy::Random => random::build_layer(ctx, rng),
        Strategy::Weighted => weighted::build_layer(ctx, rng),
        Strategy::Layered => layered::build_layer(ctx, index, rng),
        Strategy::Entangling => entangling::build_layer(ctx, index, rng),
    }
}

/// Shuffled qubit visiting order.
pub(crate) fn shuffled_qubits(rng: &mut ChaCha8Rng, num_qubits: u32) -> Vec<u32> {
    let mut order: Vec<u32> = (0..num_qubits).collect();
    order.shuffle(rng);
    order
}

/// Bind a gate to qubits, sampling an angle in `[0, 2*pi)` when it takes one.
pub(crate) fn make_placement(
    rng: &mut ChaCha8Rng,
    gate: GateKind,
    qubits: &[u32],
) -> GenResult<GatePlacement> {
    let angle = gate.is_parameterized().then(|| rng.gen_range(0.0..TAU));
    let qubits = qubits.iter().copied().map(QubitId);
    Ok(GatePlacement::new(gate, qubits, angle)?)
}

/// A layer under construction with O(1) qubit occupancy checks.
#[derive(Debug)]
pub(crate) struct LayerBuilder {
    layer: Layer,
    busy: Vec<bool>,
}

impl LayerBuilder {
    pub fn new(num_qubits: u32) -> Self {
        Self {
            layer: Layer::new(),
            busy: vec![false; num_qubits as usize],
        }
    }

    #[inline]
    pub fn is_free(&self, qubit: u32) -> bool {
        !self.busy[qubit as usize]
    }

    pub fn place(&mut self, placement: GatePlacement) -> GenResult<()> {
        let qubits: Vec<usize> = placement.qubits().iter().map(|q| q.index()).collect();
        self.layer.push(placement)?;
        for q in qubits {
            self.busy[q] = true;
        }
        Ok(())
    }

    /// Place `gate` on `qubits`, sampling an angle if needed.
    pub fn place_gate(&mut self, rng: &mut ChaCha8Rng, gate: GateKind, qubits: &[u32]) -> GenResult<()> {
        let placement = make_placement(rng, gate, qubits)?;
        self.place(placement)
    }

    /// Free neighbours of `qubit`, ascending.
    pub fn free_neighbors(&self, connectivity: &Connectivity, qubit: u32) -> Vec<u32> {
        connectivity
            .neighbors(qubit)
            .filter(|&n| self.is_free(n))
            .collect()
    }

    /// Free qubits, ascending.
    pub fn free_qubits(&self) -> Vec<u32> {
        (0..self.busy.len())
            .filter(|&q| !self.busy[q])
            .map(|q| q as u32)
            .collect()
    }

    /// Give the unmatched qubits of a two-qubit layer a single-qubit gate
    /// under [`IdlePolicy::Fill`].
    pub fn apply_idle_policy(&mut self, ctx: &Context<'_>, rng: &mut ChaCha8Rng) -> GenResult<()> {
        if ctx.idle_policy == IdlePolicy::Fill {
            for q in self.free_qubits() {
                if let Some(&gate) = ctx.single.choose(rng) {
                    self.place_gate(rng, gate, &[q])?;
                }
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Layer {
        self.layer
    }
}

/// Log a two-qubit layer that connectivity left empty or sparse.
pub(crate) fn warn_if_sparse(index: u32, pairs: usize, num_qubits: u32) {
    let max_pairs = (num_qubits / 2) as usize;
    if pairs == 0 {
        tracing::warn!(layer = index, "No legal qubit pair left; two-qubit layer is empty");
    } else if pairs < max_pairs {
        tracing::warn!(
            layer = index,
            pairs,
            max_pairs,
            "Connectivity limits the two-qubit layer"
        );
    }
}
