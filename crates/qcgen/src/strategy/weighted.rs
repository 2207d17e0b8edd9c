//! Placement with gates drawn from a weight table.

use qcgen_ir::{GateArity, Layer};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use super::{Context, LayerBuilder, shuffled_qubits};
use crate::error::{GenError, GenResult};

pub(crate) fn build_layer(ctx: &Context<'_>, rng: &mut ChaCha8Rng) -> GenResult<Layer> {
    let weights = ctx.weights.ok_or_else(|| {
        GenError::InvalidConfiguration("weighted strategy has no weight table".into())
    })?;
    let mut builder = LayerBuilder::new(ctx.num_qubits);

    for qubit in shuffled_qubits(rng, ctx.num_qubits) {
        if !builder.is_free(qubit) || rng.gen_bool(ctx.idle_probability) {
            continue;
        }

        let gate = weights.draw(rng);
        match gate.arity() {
            GateArity::Single => builder.place_gate(rng, gate, &[qubit])?,
            GateArity::Two => {
                let neighbors = builder.free_neighbors(ctx.connectivity, qubit);
                if let Some(target) = neighbors.choose(rng).copied() {
                    builder.place_gate(rng, gate, &[qubit, target])?;
                } else if let Some(fallback) = weights.draw_single(rng) {
                    builder.place_gate(rng, fallback, &[qubit])?;
                }
            }
        }
    }

    Ok(builder.finish())
}
