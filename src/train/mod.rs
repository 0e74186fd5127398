pub mod algorithm;
pub mod backprop;
pub mod gradient;
pub mod options;

pub use algorithm::Algorithm;
pub use options::{Shuffle, TrainOptions};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::network::network::Network;

/// Dispatches one training run to the engine selected in the options.
pub(crate) fn run(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    options: &TrainOptions,
) {
    match options.algorithm {
        Algorithm::GradientDescent => gradient::run(network, inputs, targets, options),
        Algorithm::Backpropagation => backprop::run(network, inputs, targets, options),
    }
}

/// Fresh permutation of sample indices for one epoch.
pub(crate) fn epoch_order(sample_count: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sample_count).collect();
    order.shuffle(rng);
    order
}
