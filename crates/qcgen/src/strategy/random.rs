//! Uniform random placement.

use qcgen_ir::Layer;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use super::{Context, LayerBuilder, shuffled_qubits};
use crate::error::GenResult;

pub(crate) fn build_layer(ctx: &Context<'_>, rng: &mut ChaCha8Rng) -> GenResult<Layer> {
    let mut builder = LayerBuilder::new(ctx.num_qubits);

    for qubit in shuffled_qubits(rng, ctx.num_qubits) {
        if !builder.is_free(qubit) {
            continue;
        }
        if rng.gen_bool(ctx.idle_probability) {
            continue;
        }

        if !ctx.two.is_empty() && rng.gen_bool(ctx.two_qubit_probability) {
            let neighbors = builder.free_neighbors(ctx.connectivity, qubit);
            if let Some(target) = neighbors.choose(rng).copied() {
                if let Some(gate) = ctx.two.choose(rng).copied() {
                    builder.place_gate(rng, gate, &[qubit, target])?;
                    continue;
                }
            }
        }

        if let Some(gate) = ctx.single.choose(rng).copied() {
            builder.place_gate(rng, gate, &[qubit])?;
        }
    }

    Ok(builder.finish())
}
