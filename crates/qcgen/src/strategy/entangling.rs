//! Maximal layers of disjoint two-qubit gates.

use qcgen_ir::Layer;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use super::{Context, LayerBuilder, shuffled_qubits, warn_if_sparse};
use crate::error::GenResult;

/// Greedy matching: repeatedly take the free qubit with the fewest free
/// neighbours and pair it with its free neighbour of fewest free neighbours.
/// Ties go to the earlier qubit in a seeded shuffle.
pub(crate) fn build_layer(ctx: &Context<'_>, index: u32, rng: &mut ChaCha8Rng) -> GenResult<Layer> {
    let mut builder = LayerBuilder::new(ctx.num_qubits);
    let order = shuffled_qubits(rng, ctx.num_qubits);
    let mut rank = vec![0_usize; order.len()];
    for (r, &q) in order.iter().enumerate() {
        rank[q as usize] = r;
    }

    // Free neighbours per qubit, kept current as pairs are placed.
    let mut free_degree: Vec<usize> = (0..ctx.num_qubits)
        .map(|q| ctx.connectivity.degree(q))
        .collect();

    let mut pairs = 0;
    loop {
        let first = order
            .iter()
            .copied()
            .filter(|&q| builder.is_free(q) && free_degree[q as usize] > 0)
            .min_by_key(|&q| (free_degree[q as usize], rank[q as usize]));
        let Some(a) = first else {
            break;
        };

        let second = ctx
            .connectivity
            .neighbors(a)
            .filter(|&q| builder.is_free(q))
            .min_by_key(|&q| (free_degree[q as usize], rank[q as usize]));
        let Some(b) = second else {
            break;
        };

        let Some(gate) = ctx.two.choose(rng).copied() else {
            break;
        };
        let (control, target) = if rng.gen_bool(0.5) { (a, b) } else { (b, a) };
        builder.place_gate(rng, gate, &[control, target])?;
        for n in ctx.connectivity.neighbors(a).chain(ctx.connectivity.neighbors(b)) {
            free_degree[n as usize] = free_degree[n as usize].saturating_sub(1);
        }
        pairs += 1;
    }
    warn_if_sparse(index, pairs, ctx.num_qubits);

    builder.apply_idle_policy(ctx, rng)?;
    Ok(builder.finish())
}
