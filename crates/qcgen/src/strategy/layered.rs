//! Alternating single-qubit and two-qubit layers.
//!
//! Even layers put a single-qubit gate on every qubit. Odd layers form a
//! brickwork: edges whose lower endpoint has the parity of the two-qubit
//! layer count are matched first, then the remaining edges fill any gaps.

use qcgen_ir::Layer;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use super::{Context, LayerBuilder, warn_if_sparse};
use crate::error::GenResult;

pub(crate) fn build_layer(ctx: &Context<'_>, index: u32, rng: &mut ChaCha8Rng) -> GenResult<Layer> {
    let mut builder = LayerBuilder::new(ctx.num_qubits);

    if index % 2 == 0 {
        for qubit in 0..ctx.num_qubits {
            if let Some(gate) = ctx.single.choose(rng).copied() {
                builder.place_gate(rng, gate, &[qubit])?;
            }
        }
        return Ok(builder.finish());
    }

    let parity = (index / 2) % 2;
    let edges = ctx.connectivity.edges();
    let preferred = edges.iter().filter(|(a, _)| a % 2 == parity);
    let rest = edges.iter().filter(|(a, _)| a % 2 != parity);

    let mut pairs = 0;
    for &(control, target) in preferred.chain(rest) {
        if !(builder.is_free(control) && builder.is_free(target)) {
            continue;
        }
        if let Some(gate) = ctx.two.choose(rng).copied() {
            builder.place_gate(rng, gate, &[control, target])?;
            pairs += 1;
        }
    }
    warn_if_sparse(index, pairs, ctx.num_qubits);

    builder.apply_idle_policy(ctx, rng)?;
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdlePolicy;
    use qcgen_ir::{Connectivity, GateKind, QubitId};
    use rand::SeedableRng;

    fn context<'a>(connectivity: &'a Connectivity, idle_policy: IdlePolicy) -> Context<'a> {
        Context {
            num_qubits: connectivity.num_qubits(),
            single: &[GateKind::H, GateKind::T],
            two: &[GateKind::CX],
            connectivity,
            weights: None,
            two_qubit_probability: 0.3,
            idle_probability: 0.1,
            idle_policy,
        }
    }

    fn pairs(layer: &Layer) -> Vec<(u32, u32)> {
        layer
            .iter()
            .map(|p| (p.qubits()[0].0, p.qubits()[1].0))
            .collect()
    }

    #[test]
    fn test_single_qubit_layer_covers_every_qubit() {
        let connectivity = Connectivity::linear(5);
        let ctx = context(&connectivity, IdlePolicy::Idle);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let layer = build_layer(&ctx, 0, &mut rng).unwrap();
        assert_eq!(layer.len(), 5);
        assert_eq!(layer.num_two_qubit(), 0);
    }

    #[test]
    fn test_brickwork_alternates() {
        let connectivity = Connectivity::linear(5);
        let ctx = context(&connectivity, IdlePolicy::Idle);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let first = build_layer(&ctx, 1, &mut rng).unwrap();
        assert_eq!(pairs(&first), vec![(0, 1), (2, 3)]);

        let second = build_layer(&ctx, 3, &mut rng).unwrap();
        assert_eq!(pairs(&second), vec![(1, 2), (3, 4)]);
    }

    #[test]
    fn test_idle_policy_for_odd_qubit() {
        let connectivity = Connectivity::full(3);
        let mut rng = ChaCha8Rng::seed_from_u64(6);

        let idle = build_layer(&context(&connectivity, IdlePolicy::Idle), 1, &mut rng).unwrap();
        assert_eq!(idle.len(), 1);
        assert!(!idle.is_busy(QubitId(2)));

        let fill = build_layer(&context(&connectivity, IdlePolicy::Fill), 1, &mut rng).unwrap();
        assert_eq!(fill.len(), 2);
        assert_eq!(fill.num_two_qubit(), 1);
        assert!(fill.is_busy(QubitId(2)));
    }
}
