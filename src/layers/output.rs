use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;
use crate::layers::dense::{DenseLayer, Init};
use crate::layers::layer::Layer;
use crate::math::Matrix;

/// Wiring policy between the output layer and its predecessor.
///
/// `FullConnected` is the default. The sparse policies connect output unit
/// `j` to a small window of predecessor units (`{2j, 2j+1}` for pairs,
/// `{3j, 3j+1, 3j+2}` for triples, modulo the fan-in); the window is fixed
/// at connect time and re-applied after the layer's own backward update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionType {
    #[default]
    FullConnected,
    PairConnected,
    TripleConnected,
}

impl ConnectionType {
    fn window(&self) -> Option<usize> {
        match self {
            ConnectionType::FullConnected => None,
            ConnectionType::PairConnected => Some(2),
            ConnectionType::TripleConnected => Some(3),
        }
    }

    /// 0/1 wiring mask of shape (rows, cols), or `None` when dense.
    pub(crate) fn mask(&self, rows: usize, cols: usize) -> Option<Matrix> {
        let window = self.window()?;
        let mut mask = Matrix::zeros(rows, cols);
        for j in 0..rows {
            for t in 0..window {
                mask.data[j][(window * j + t) % cols] = 1.0;
            }
        }
        Some(mask)
    }
}

/// Last stage of the chain: a dense layer with a configurable wiring policy.
#[derive(Debug)]
pub struct OutputLayer {
    dense: DenseLayer,
    connection: ConnectionType,
    mask: Option<Matrix>,
}

impl OutputLayer {
    pub fn new(node_number: usize) -> OutputLayer {
        OutputLayer {
            dense: DenseLayer::new(node_number),
            connection: ConnectionType::default(),
            mask: None,
        }
    }

    pub fn with_connection(mut self, connection: ConnectionType) -> OutputLayer {
        self.connection = connection;
        self
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> OutputLayer {
        self.dense = self.dense.with_activation(activation);
        self
    }

    pub fn with_init(mut self, init: Init) -> OutputLayer {
        self.dense = self.dense.with_init(init);
        self
    }

    pub fn connection(&self) -> ConnectionType {
        self.connection
    }

    fn apply_mask(&mut self) {
        if let Some(mask) = &self.mask {
            if let Some((weights, _)) = self.dense.params_mut() {
                *weights = weights.hadamard(mask);
            }
        }
    }
}

impl Layer for OutputLayer {
    fn node_number(&self) -> usize {
        self.dense.node_number()
    }

    fn connect_to_layer(&mut self, previous: &dyn Layer, rng: &mut dyn RngCore) {
        self.dense.connect_to_layer(previous, rng);
        self.mask = self
            .connection
            .mask(self.dense.node_number(), previous.node_number());
        self.apply_mask();
    }

    fn calculate(&mut self, input: &Matrix) -> Matrix {
        self.dense.calculate(input)
    }

    fn backward(&mut self, gradient: &Matrix, learning_rate: f64) -> Matrix {
        let upstream = self.dense.backward(gradient, learning_rate);
        self.apply_mask();
        upstream
    }

    fn train_function(&self, values: &Matrix) -> Matrix {
        self.dense.train_function(values)
    }

    fn nodes(&self) -> &Matrix {
        self.dense.nodes()
    }

    fn deltas(&self) -> &Matrix {
        self.dense.deltas()
    }

    fn set_deltas(&mut self, deltas: Matrix) {
        self.dense.set_deltas(deltas);
    }

    fn weights(&self) -> Option<&Matrix> {
        self.dense.weights()
    }

    fn bias(&self) -> Option<&Matrix> {
        self.dense.bias()
    }

    fn params_mut(&mut self) -> Option<(&mut Matrix, &mut Matrix)> {
        self.dense.params_mut()
    }

    fn save_data(&self) -> bool {
        self.dense.save_data()
    }

    fn set_save_data(&mut self, enabled: bool) {
        self.dense.set_save_data(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::input::InputLayer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn connected(connection: ConnectionType, out_dim: usize, in_dim: usize) -> OutputLayer {
        let mut rng = StdRng::seed_from_u64(11);
        let mut layer = OutputLayer::new(out_dim).with_connection(connection);
        layer.connect_to_layer(&InputLayer::new(in_dim), &mut rng);
        layer
    }

    #[test]
    fn full_connection_leaves_weights_dense() {
        let layer = connected(ConnectionType::FullConnected, 3, 4);
        let w = layer.weights().unwrap();
        assert!(w.data.iter().flatten().all(|&v| v != 0.0));
    }

    #[test]
    fn pair_connection_wires_two_inputs_per_unit() {
        let layer = connected(ConnectionType::PairConnected, 2, 4);
        let w = layer.weights().unwrap();
        for j in 0..2 {
            let live: Vec<usize> = (0..4).filter(|&p| w.data[j][p] != 0.0).collect();
            assert_eq!(live, vec![2 * j, 2 * j + 1]);
        }
    }

    #[test]
    fn backward_preserves_wiring() {
        let mut layer = connected(ConnectionType::TripleConnected, 2, 6);
        layer.set_save_data(true);
        layer.calculate(&Matrix::column(&[0.5; 6]));
        layer.backward(&Matrix::column(&[0.3, -0.2]), 0.1);

        let w = layer.weights().unwrap();
        for j in 0..2 {
            for p in 0..6 {
                let wired = (3 * j..3 * j + 3).contains(&p);
                assert_eq!(w.data[j][p] != 0.0, wired, "unit {j} input {p}");
            }
        }
    }
}
