use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::activation::ActivationFunction;
use crate::layers::layer::Layer;
use crate::math::Matrix;

/// Weight initialization strategy, applied when a layer is connected to its
/// predecessor (the first moment its fan-in is known).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Init {
    #[default]
    Xavier,
    He,
    Uniform,
}

impl Init {
    pub fn matrix(&self, rows: usize, cols: usize, rng: &mut dyn RngCore) -> Matrix {
        match self {
            Init::Xavier => Matrix::xavier(rows, cols, rng),
            Init::He => Matrix::he(rows, cols, rng),
            Init::Uniform => Matrix::uniform(rows, cols, rng),
        }
    }
}

/// Fully connected hidden layer.
///
/// Until `connect_to_layer` runs, the weight matrix is empty; connecting
/// fixes its shape to (node_number, predecessor node_number). The bias
/// column exists from construction and starts at zero.
#[derive(Debug)]
pub struct DenseLayer {
    node_number: usize,
    weights: Matrix,
    bias: Matrix,
    nodes: Matrix,
    input: Matrix,
    deltas: Matrix,
    activation: ActivationFunction,
    init: Init,
    save_data: bool,
}

impl DenseLayer {
    pub fn new(node_number: usize) -> DenseLayer {
        DenseLayer {
            node_number,
            weights: Matrix::default(),
            bias: Matrix::zeros(node_number, 1),
            nodes: Matrix::default(),
            input: Matrix::default(),
            deltas: Matrix::default(),
            activation: ActivationFunction::default(),
            init: Init::default(),
            save_data: false,
        }
    }

    pub fn with_activation(mut self, activation: ActivationFunction) -> DenseLayer {
        self.activation = activation;
        self
    }

    pub fn with_init(mut self, init: Init) -> DenseLayer {
        self.init = init;
        self
    }

    pub fn activation(&self) -> ActivationFunction {
        self.activation
    }
}

impl Layer for DenseLayer {
    fn node_number(&self) -> usize {
        self.node_number
    }

    fn connect_to_layer(&mut self, previous: &dyn Layer, rng: &mut dyn RngCore) {
        self.weights = self
            .init
            .matrix(self.node_number, previous.node_number(), rng);
    }

    fn calculate(&mut self, input: &Matrix) -> Matrix {
        let act = self.activation;
        let z = self.weights.clone() * input.clone() + self.bias.clone();
        let a = z.map(|x| act.function(x));
        if self.save_data {
            self.input = input.clone();
            self.nodes = a.clone();
        }
        a
    }

    fn backward(&mut self, gradient: &Matrix, learning_rate: f64) -> Matrix {
        // dz = dL/da ⊙ f'(a), on the activations cached by `calculate`
        let dz = gradient.hadamard(&self.train_function(&self.nodes));
        let d_weights = dz.clone() * self.input.transpose();
        let d_input = self.weights.transpose() * dz.clone();

        self.weights = self.weights.clone() - d_weights.map(|x| x * learning_rate);
        self.bias = self.bias.clone() - dz.map(|x| x * learning_rate);

        d_input
    }

    fn train_function(&self, values: &Matrix) -> Matrix {
        let act = self.activation;
        values.map(|v| act.derivative(v))
    }

    fn nodes(&self) -> &Matrix {
        &self.nodes
    }

    fn deltas(&self) -> &Matrix {
        &self.deltas
    }

    fn set_deltas(&mut self, deltas: Matrix) {
        self.deltas = deltas;
    }

    fn weights(&self) -> Option<&Matrix> {
        Some(&self.weights)
    }

    fn bias(&self) -> Option<&Matrix> {
        Some(&self.bias)
    }

    fn params_mut(&mut self) -> Option<(&mut Matrix, &mut Matrix)> {
        Some((&mut self.weights, &mut self.bias))
    }

    fn save_data(&self) -> bool {
        self.save_data
    }

    fn set_save_data(&mut self, enabled: bool) {
        self.save_data = enabled;
        if !enabled {
            self.nodes = Matrix::default();
            self.input = Matrix::default();
            self.deltas = Matrix::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::input::InputLayer;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn connected(out_dim: usize, in_dim: usize, seed: u64) -> DenseLayer {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut layer = DenseLayer::new(out_dim);
        layer.connect_to_layer(&InputLayer::new(in_dim), &mut rng);
        layer
    }

    #[test]
    fn connecting_fixes_shapes() {
        let layer = connected(5, 10, 0);
        let w = layer.weights().unwrap();
        assert_eq!((w.rows, w.cols), (5, 10));
        let b = layer.bias().unwrap();
        assert_eq!((b.rows, b.cols), (5, 1));
    }

    #[test]
    fn bias_shape_before_connecting() {
        let layer = DenseLayer::new(10);
        assert_eq!((layer.bias().unwrap().rows, layer.bias().unwrap().cols), (10, 1));
    }

    #[test]
    fn forward_computes_sigmoid_of_affine() {
        let mut layer = connected(1, 2, 3);
        {
            let (w, b) = layer.params_mut().unwrap();
            w.data[0] = vec![1.0, -1.0];
            b.data[0][0] = 0.5;
        }
        let out = layer.calculate(&Matrix::column(&[2.0, 1.0]));
        // z = 2 - 1 + 0.5 = 1.5
        let expected = 1.0 / (1.0 + (-1.5f64).exp());
        assert_relative_eq!(out.data[0][0], expected, epsilon = 1e-12);
    }

    #[test]
    fn backward_matches_numeric_gradients() {
        let mut layer = connected(2, 3, 7);
        layer.set_save_data(true);

        let x = Matrix::column(&[0.3, -0.7, 0.2]);
        let target = [0.1, 0.9];
        let lr = 1e-3;

        let loss = |layer: &mut DenseLayer| -> f64 {
            let out = layer.calculate(&x).column_data();
            out.iter()
                .zip(target.iter())
                .map(|(p, t)| (p - t) * (p - t))
                .sum::<f64>()
                / target.len() as f64
        };

        let out = layer.calculate(&x).column_data();
        let seed: Vec<f64> = out
            .iter()
            .zip(target.iter())
            .map(|(p, t)| 2.0 * (p - t) / target.len() as f64)
            .collect();

        let w_before = layer.weights().unwrap().clone();
        let b_before = layer.bias().unwrap().clone();
        layer.backward(&Matrix::column(&seed), lr);
        let w_after = layer.weights().unwrap().clone();

        // put the layer back at the original point so every numeric
        // difference below is evaluated there
        {
            let (w, b) = layer.params_mut().unwrap();
            *w = w_before.clone();
            *b = b_before;
        }

        let eps = 1e-6;
        for i in 0..w_before.rows {
            for j in 0..w_before.cols {
                // recover the analytic gradient from the applied update
                let analytic = (w_before.data[i][j] - w_after.data[i][j]) / lr;

                let (w, _) = layer.params_mut().unwrap();
                w.data[i][j] = w_before.data[i][j] + eps;
                let plus = loss(&mut layer);
                let (w, _) = layer.params_mut().unwrap();
                w.data[i][j] = w_before.data[i][j] - eps;
                let minus = loss(&mut layer);
                let (w, _) = layer.params_mut().unwrap();
                w.data[i][j] = w_before.data[i][j];

                let numeric = (plus - minus) / (2.0 * eps);
                assert_relative_eq!(analytic, numeric, epsilon = 1e-4, max_relative = 1e-2);
            }
        }
    }

    #[test]
    fn disabling_save_data_clears_caches() {
        let mut layer = connected(2, 2, 1);
        layer.set_save_data(true);
        layer.calculate(&Matrix::column(&[1.0, 1.0]));
        assert_eq!(layer.nodes().rows, 2);

        layer.set_save_data(false);
        assert_eq!(layer.nodes().rows, 0);
    }
}
