use crate::layers::Layer;
use crate::loss::MseLoss;
use crate::math::Matrix;
use crate::network::network::{propagate, Network};
use crate::progress::Position;
use crate::train::options::TrainOptions;

/// Gradient-descent training engine.
///
/// Treats layers as opaque differentiable units: per sample, one train-mode
/// forward pass (no finalize), the MSE loss gradient seeded against the raw
/// output, then each layer's `backward` in reverse chain order. Every
/// `backward` updates its own parameters and hands back the gradient with
/// respect to its input; this engine never touches a weight matrix.
pub(crate) fn run(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    options: &TrainOptions,
) {
    let mut rng = options.shuffle.rng();
    let (layers, epoch_logger, batch_logger) = network.train_parts();
    let sample_count = inputs.len();

    for _ in epoch_logger.wrap(0..options.epochs, Position::Outer) {
        let order = crate::train::epoch_order(sample_count, &mut rng);

        for i in batch_logger.wrap(0..sample_count, Position::Inner) {
            let idx = order[i];
            let output = propagate(layers, &Matrix::column(&inputs[idx]));

            let mut gradient = MseLoss::gradient(&output, &Matrix::column(&targets[idx]));
            for layer in layers.iter_mut().rev() {
                gradient = layer.backward(&gradient, options.learning_rate);
            }
        }
    }
}
