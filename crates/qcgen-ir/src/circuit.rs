//! Layered circuit container.

use serde::Serialize;

use crate::error::{IrError, IrResult};
use crate::placement::GatePlacement;
use crate::qubit::QubitId;

/// One time step of a circuit.
///
/// A layer never holds two placements that share a qubit.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Layer {
    placements: Vec<GatePlacement>,
}

impl Layer {
    /// Create an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from placements, checking each one in order.
    pub fn from_placements(placements: impl IntoIterator<Item = GatePlacement>) -> IrResult<Self> {
        let mut layer = Self::new();
        for placement in placements {
            layer.push(placement)?;
        }
        Ok(layer)
    }

    /// Add a placement.
    ///
    /// Fails if the placement itself is malformed or touches a qubit that
    /// already carries an operation in this layer.
    pub fn push(&mut self, placement: GatePlacement) -> IrResult<&mut Self> {
        placement.validate()?;
        if let Some(&qubit) = placement.qubits().iter().find(|&&q| self.is_busy(q)) {
            return Err(IrError::QubitReuse {
                qubit,
                gate_name: Some(placement.name().to_string()),
            });
        }
        self.placements.push(placement);
        Ok(self)
    }

    /// Check if `qubit` already carries an operation in this layer.
    pub fn is_busy(&self, qubit: QubitId) -> bool {
        self.placements.iter().any(|p| p.acts_on(qubit))
    }

    /// Placements in insertion order.
    pub fn placements(&self) -> &[GatePlacement] {
        &self.placements
    }

    /// Consume the layer and return its placements.
    pub fn into_placements(self) -> Vec<GatePlacement> {
        self.placements
    }

    /// Number of placements.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Check if the layer has no placements.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Number of two-qubit placements.
    pub fn num_two_qubit(&self) -> usize {
        self.placements.iter().filter(|p| p.is_two_qubit()).count()
    }

    /// Iterate over placements.
    pub fn iter(&self) -> impl Iterator<Item = &GatePlacement> + '_ {
        self.placements.iter()
    }
}

/// A quantum circuit organised as a sequence of layers.
///
/// The circuit owns its width; every layer pushed into it is checked against
/// that width, so a constructed circuit always satisfies the layer invariant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Number of qubits.
    num_qubits: u32,
    /// Layers in execution order.
    layers: Vec<Layer>,
    /// Whether all qubits are measured after the last layer.
    measured: bool,
}

impl Circuit {
    /// Create a circuit with the given width and no layers.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            layers: vec![],
            measured: false,
        }
    }

    /// Append a layer.
    pub fn push_layer(&mut self, layer: Layer) -> IrResult<&mut Self> {
        for placement in layer.iter() {
            if let Some(&qubit) = placement
                .qubits()
                .iter()
                .find(|q| q.0 >= self.num_qubits)
            {
                return Err(IrError::QubitOutOfRange {
                    qubit,
                    num_qubits: self.num_qubits,
                    gate_name: Some(placement.name().to_string()),
                });
            }
        }
        self.layers.push(layer);
        Ok(self)
    }

    /// Mark every qubit as measured at the end of the circuit.
    pub fn measure_all(&mut self) -> &mut Self {
        self.measured = true;
        self
    }

    /// Set or clear the final measurement.
    pub fn set_measured(&mut self, measured: bool) -> &mut Self {
        self.measured = measured;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// Number of layers, including empty ones.
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Get the layers.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Get one layer.
    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Check if the circuit ends with a measurement of every qubit.
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Total number of gate placements.
    pub fn num_gates(&self) -> usize {
        self.layers.iter().map(Layer::len).sum()
    }

    /// Iterate over placements in layer order, paired with their layer index.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &GatePlacement)> + '_ {
        self.layers
            .iter()
            .enumerate()
            .flat_map(|(i, layer)| layer.iter().map(move |p| (i, p)))
    }

    /// Create a copy with the same name, width and measurement but new layers.
    pub fn with_layers(&self, layers: impl IntoIterator<Item = Layer>) -> IrResult<Self> {
        let mut circuit = Self::new(self.name.clone(), self.num_qubits);
        circuit.measured = self.measured;
        for layer in layers {
            circuit.push_layer(layer)?;
        }
        Ok(circuit)
    }
}
