//! Qubit connectivity for two-qubit gate placement.
//!
//! A [`Connectivity`] lists the qubit pairs that may carry a two-qubit gate,
//! modelling the coupling graph of a device. Edges are undirected: a gate may
//! act on `(a, b)` or `(b, a)` whenever either orientation was declared.
//!
//! ```
//! use qcgen_ir::Connectivity;
//!
//! let line = Connectivity::linear(4);
//! assert!(line.is_connected(1, 2));
//! assert!(line.is_connected(2, 1));
//! assert!(!line.is_connected(0, 3));
//!
//! let full = Connectivity::full(4);
//! assert_eq!(full.num_edges(), 6);
//! ```

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{IrError, IrResult};

/// Undirected coupling graph over a fixed number of qubits.
#[derive(Debug, Clone, Serialize)]
pub struct Connectivity {
    /// Number of qubits.
    num_qubits: u32,
    /// Connected pairs, stored with the lower index first and sorted.
    edges: Vec<(u32, u32)>,
    /// Adjacency list for fast lookup, neighbours in ascending order.
    #[serde(skip)]
    adjacency: FxHashMap<u32, Vec<u32>>,
}

impl Connectivity {
    /// Create a connectivity with no edges.
    pub fn new(num_qubits: u32) -> Self {
        Self {
            num_qubits,
            edges: vec![],
            adjacency: FxHashMap::default(),
        }
    }

    /// Build a connectivity from explicit pairs.
    ///
    /// Reversed and repeated pairs collapse to one edge. Self-loops and
    /// indices outside the register are rejected.
    pub fn from_edges(
        num_qubits: u32,
        pairs: impl IntoIterator<Item = (u32, u32)>,
    ) -> IrResult<Self> {
        let mut map = Self::new(num_qubits);
        for (q1, q2) in pairs {
            map.add_edge(q1, q2)?;
        }
        Ok(map)
    }

    /// Add an edge between two qubits (bidirectional).
    ///
    /// Duplicate edges (including reversed pairs) are silently ignored.
    pub fn add_edge(&mut self, q1: u32, q2: u32) -> IrResult<()> {
        if q1 == q2 || q1 >= self.num_qubits || q2 >= self.num_qubits {
            return Err(IrError::InvalidEdge(q1, q2, self.num_qubits));
        }
        let edge = (q1.min(q2), q1.max(q2));
        if let Err(pos) = self.edges.binary_search(&edge) {
            self.edges.insert(pos, edge);
            insert_sorted(self.adjacency.entry(q1).or_default(), q2);
            insert_sorted(self.adjacency.entry(q2).or_default(), q1);
        }
        Ok(())
    }

    /// Create a fully connected (all-to-all) map.
    pub fn full(n: u32) -> Self {
        Self::build(n, (0..n).flat_map(|i| ((i + 1)..n).map(move |j| (i, j))))
    }

    /// Create a linear coupling map (0-1-2-3-...).
    pub fn linear(n: u32) -> Self {
        Self::build(n, (0..n.saturating_sub(1)).map(|i| (i, i + 1)))
    }

    /// Create a ring: a linear chain whose ends are joined.
    pub fn ring(n: u32) -> Self {
        let closing = (n > 2).then(|| (0, n - 1));
        Self::build(
            n,
            (0..n.saturating_sub(1)).map(|i| (i, i + 1)).chain(closing),
        )
    }

    /// Create a star topology (qubit 0 connected to all others).
    pub fn star(n: u32) -> Self {
        Self::build(n, (1..n).map(|i| (0, i)))
    }

    /// Factory helper for pairs that are valid by construction.
    fn build(n: u32, pairs: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut map = Self::new(n);
        for (q1, q2) in pairs {
            // Generated pairs are always distinct and in range.
            let _ = map.add_edge(q1, q2);
        }
        map
    }

    /// Check if two qubits are directly connected, in either orientation.
    #[inline]
    pub fn is_connected(&self, q1: u32, q2: u32) -> bool {
        self.adjacency
            .get(&q1)
            .is_some_and(|neighbors| neighbors.binary_search(&q2).is_ok())
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Get the edges, lower index first, in ascending order.
    pub fn edges(&self) -> &[(u32, u32)] {
        &self.edges
    }

    /// Number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Check if no two-qubit gate can be placed at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Get neighbours of a qubit in ascending order.
    pub fn neighbors(&self, qubit: u32) -> impl Iterator<Item = u32> + '_ {
        self.adjacency
            .get(&qubit)
            .map(|v| v.iter().copied())
            .into_iter()
            .flatten()
    }

    /// Number of neighbours of a qubit.
    pub fn degree(&self, qubit: u32) -> usize {
        self.adjacency.get(&qubit).map_or(0, Vec::len)
    }
}

fn insert_sorted(list: &mut Vec<u32>, value: u32) {
    if let Err(pos) = list.binary_search(&value) {
        list.insert(pos, value);
    }
}
