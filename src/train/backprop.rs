use crate::layers::Layer;
use crate::math::Matrix;
use crate::network::network::{propagate, Network};
use crate::progress::{sample_correct, Position};
use crate::train::options::TrainOptions;

/// Delta-sweep training engine.
///
/// Per epoch: a fresh sample permutation, then one forward pass and one
/// `iterate` call per sample. Running accuracy over the samples seen so far
/// in the epoch is pushed into the batch logger's accuracy slot.
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

        let mut correct = 0usize;
        batch_logger.clear_accuracy();

        for i in batch_logger.wrap(0..sample_count, Position::Inner) {
            let idx = order[i];
            let predicted = propagate(layers, &Matrix::column(&inputs[idx])).column_data();
            iterate(layers, &predicted, &targets[idx], options.learning_rate);

            if sample_correct(&targets[idx], &predicted) {
                correct += 1;
            }
            batch_logger.set_accuracy(correct as f64 / (i + 1) as f64);
        }
    }
}

/// One delta-sweep step over the whole chain.
///
/// First sweep, output layer down to the first trainable layer, writes each
/// layer's `deltas`:
/// - output: `(predicted − target) ⊙ tf(predicted)`
/// - hidden `i`: `deltas[j] = Σ_k w_{i+1}[k][j] · deltas_{i+1}[k] · gate[k]`
///
/// Second sweep applies `w[j] -= lr · deltas[j] · prev.nodes` and
/// `bias -= lr · deltas`, front to back.
pub(crate) fn iterate(
    layers: &mut [Box<dyn Layer>],
    predicted: &[f64],
    target: &[f64],
    learning_rate: f64,
) {
    let count = layers.len();
    let predicted_col = Matrix::column(predicted);

    for i in (1..count).rev() {
        if i + 1 == count {
            let diff = predicted_col.clone() - Matrix::column(target);
            let deltas = diff.hadamard(&layers[i].train_function(&predicted_col));
            layers[i].set_deltas(deltas);
        } else {
            let deltas = {
                let current = &layers[i];
                let next = &layers[i + 1];
                let Some(next_weights) = next.weights() else {
                    continue;
                };
                let next_deltas = next.deltas().column_data();
                // The gate is this layer's activation derivative evaluated
                // at the *next* layer's cached activations. Historical
                // behavior; training dynamics depend on it staying this way.
                let gate = current.train_function(next.nodes()).column_data();

                let mut values = vec![0.0; current.node_number()];
                for (j, value) in values.iter_mut().enumerate() {
                    *value = (0..next.node_number())
                        .map(|k| next_weights.data[k][j] * next_deltas[k] * gate[k])
                        .sum();
                }
                Matrix::column(&values)
            };
            layers[i].set_deltas(deltas);
        }
    }

    for i in 1..count {
        if layers[i].weights().is_none() {
            continue;
        }
        let deltas = layers[i].deltas().column_data();
        let (previous, current) = layers.split_at_mut(i);
        let prev_nodes = previous[i - 1].nodes().column_data();
        let Some((weights, bias)) = current[0].params_mut() else {
            continue;
        };

        for j in 0..weights.rows {
            for (p, prev_node) in prev_nodes.iter().enumerate() {
                weights.data[j][p] -= learning_rate * deltas[j] * prev_node;
            }
            bias.data[j][0] -= learning_rate * deltas[j];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{LoggingLevel, Network};
    use approx::assert_relative_eq;

    /// 1-1-1 sigmoid chain with hand-picked parameters.
    fn tiny_network() -> Network {
        let mut network =
            Network::build_with_seed(vec![1.into(), 1.into(), 1.into()], LoggingLevel::Off, 2)
                .unwrap();
        {
            let (w, b) = network.layers[1].params_mut().unwrap();
            w.data[0][0] = 0.5;
            b.data[0][0] = 0.0;
        }
        {
            let (w, b) = network.layers[2].params_mut().unwrap();
            w.data[0][0] = 1.2;
            b.data[0][0] = 0.0;
        }
        network
    }

    fn sigma_prime(a: f64) -> f64 {
        a * (1.0 - a)
    }

    #[test]
    fn hidden_gate_uses_the_next_layers_activations() {
        let mut network = tiny_network();
        network.set_save_data(true);
        let predicted = network.predict_raw(&[1.0]);
        let p = predicted[0];

        let w2 = network.layers[2].weights().unwrap().data[0][0];
        // zero learning rate: deltas are written, parameters stay put
        iterate(&mut network.layers, &predicted, &[0.0], 0.0);

        let output_delta = network.layers[2].deltas().data[0][0];
        let hidden_delta = network.layers[1].deltas().data[0][0];

        assert_relative_eq!(output_delta, p * sigma_prime(p), epsilon = 1e-12);
        // the gate comes from the output layer's activation, not the hidden one
        assert_relative_eq!(hidden_delta, w2 * output_delta * sigma_prime(p), epsilon = 1e-12);
    }

    #[test]
    fn an_overshooting_output_is_pushed_down() {
        let mut network = tiny_network();
        network.set_save_data(true);
        let predicted = network.predict_raw(&[1.0]);
        assert!(predicted[0] > 0.0, "sigmoid output is always positive");

        let w_before = network.layers[2].weights().unwrap().data[0][0];
        let b_before = network.layers[2].bias().unwrap().data[0][0];
        assert!(network.layers[1].nodes().data[0][0] > 0.0);

        // target below the prediction: the unit's contribution must shrink
        iterate(&mut network.layers, &predicted, &[0.0], 0.1);

        assert!(network.layers[2].weights().unwrap().data[0][0] < w_before);
        assert!(network.layers[2].bias().unwrap().data[0][0] < b_before);
    }

    #[test]
    fn updates_scale_with_the_previous_layers_activation() {
        let mut network = tiny_network();
        network.set_save_data(true);
        let predicted = network.predict_raw(&[1.0]);
        let p = predicted[0];
        let hidden_node = network.layers[1].nodes().data[0][0];
        let w_before = network.layers[2].weights().unwrap().data[0][0];

        let learning_rate = 0.1;
        iterate(&mut network.layers, &predicted, &[0.0], learning_rate);

        let output_delta = p * sigma_prime(p);
        let expected = w_before - learning_rate * output_delta * hidden_node;
        assert_relative_eq!(
            network.layers[2].weights().unwrap().data[0][0],
            expected,
            epsilon = 1e-12
        );
    }
}
