use crate::layers::layer::Layer;
use crate::math::Matrix;

/// First stage of every chain: passes its input through unchanged and, in
/// caching mode, retains it as `nodes` for the delta-sweep update rule.
#[derive(Debug, Default)]
pub struct InputLayer {
    node_number: usize,
    nodes: Matrix,
    deltas: Matrix,
    save_data: bool,
}

impl InputLayer {
    pub fn new(node_number: usize) -> InputLayer {
        InputLayer {
            node_number,
            ..InputLayer::default()
        }
    }
}

impl Layer for InputLayer {
    fn node_number(&self) -> usize {
        self.node_number
    }

    fn calculate(&mut self, input: &Matrix) -> Matrix {
        assert_eq!(
            input.rows, self.node_number,
            "input has {} rows, layer expects {}",
            input.rows, self.node_number
        );
        if self.save_data {
            self.nodes = input.clone();
        }
        input.clone()
    }

    fn backward(&mut self, gradient: &Matrix, _learning_rate: f64) -> Matrix {
        gradient.clone()
    }

    fn train_function(&self, values: &Matrix) -> Matrix {
        values.map(|_| 1.0)
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

    fn save_data(&self) -> bool {
        self.save_data
    }

    fn set_save_data(&mut self, enabled: bool) {
        self.save_data = enabled;
        if !enabled {
            self.nodes = Matrix::default();
            self.deltas = Matrix::default();
        }
    }
}
