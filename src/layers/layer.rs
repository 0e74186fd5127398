use rand::RngCore;

use crate::math::Matrix;

/// The capability contract every stage of the network pipeline satisfies.
///
/// A layer owns its parameters and its transient per-sample state. The
/// forward engine drives `calculate`; the two training engines consume the
/// rest: the delta-sweep engine reads and writes parameters through the
/// accessors, while the gradient-descent engine treats the layer as an
/// opaque differentiable unit via `backward`.
pub trait Layer: std::fmt::Debug {
    /// Output dimensionality of this layer.
    fn node_number(&self) -> usize;

    /// Wires this layer to its predecessor. This is the point at which the
    /// weight matrix shape becomes fixed, so initialization happens here;
    /// `rng` makes seeded construction deterministic.
    fn connect_to_layer(&mut self, _previous: &dyn Layer, _rng: &mut dyn RngCore) {}

    /// Consumes the previous layer's output column and produces this
    /// layer's. Caches intermediate state only while `save_data` is set.
    fn calculate(&mut self, input: &Matrix) -> Matrix;

    /// Updates this layer's parameters from the upstream gradient and
    /// returns the gradient with respect to its own input.
    fn backward(&mut self, gradient: &Matrix, learning_rate: f64) -> Matrix;

    /// Element-wise derivative of this layer's activation, evaluated at the
    /// given activation values.
    fn train_function(&self, values: &Matrix) -> Matrix;

    /// Last cached activation column. Meaningful only while `save_data` is
    /// enabled and a forward pass has run.
    fn nodes(&self) -> &Matrix;

    /// Per-node error column written by the delta-sweep engine.
    fn deltas(&self) -> &Matrix;

    fn set_deltas(&mut self, deltas: Matrix);

    /// Weight matrix, shape (node_number, predecessor node_number).
    /// `None` for layers without trainable parameters.
    fn weights(&self) -> Option<&Matrix> {
        None
    }

    /// Bias column, shape (node_number, 1).
    fn bias(&self) -> Option<&Matrix> {
        None
    }

    /// Simultaneous mutable access to (weights, bias) for in-place updates.
    fn params_mut(&mut self) -> Option<(&mut Matrix, &mut Matrix)> {
        None
    }

    fn save_data(&self) -> bool;

    /// Toggles state caching. Disabling clears any cached state so a later
    /// inference call cannot reuse it.
    fn set_save_data(&mut self, enabled: bool);
}
