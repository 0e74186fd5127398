use laminar_nn::{Algorithm, LoggingLevel, Network, Shuffle, TrainOptions};

fn xor_data() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let targets = vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]];
    (inputs, targets)
}

fn xor_network(seed: u64) -> Network {
    Network::build_with_seed(vec![2.into(), 3.into(), 1.into()], LoggingLevel::Off, seed).unwrap()
}

fn mean_absolute_error(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
) -> f64 {
    let total: f64 = inputs
        .iter()
        .zip(targets.iter())
        .map(|(input, target)| (network.predict(input)[0] - target[0]).abs())
        .sum();
    total / inputs.len() as f64
}

/// Smallest error reached over a handful of seeds. XOR training is
/// init-sensitive; the seed set keeps the check deterministic without
/// pinning the outcome to one lucky draw.
fn best_trained_mae(algorithm: Algorithm, learning_rate: f64, epochs: usize) -> f64 {
    let (inputs, targets) = xor_data();
    [7u64, 42, 4242]
        .into_iter()
        .map(|seed| {
            let mut network = xor_network(seed);
            let options = TrainOptions::new(learning_rate, epochs)
                .with_algorithm(algorithm)
                .with_shuffle(Shuffle::Seeded(seed));
            network.train(&inputs, &targets, &options);
            mean_absolute_error(&mut network, &inputs, &targets)
        })
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn untrained_network_sits_near_chance() {
    let (inputs, targets) = xor_data();
    for seed in [7u64, 42, 4242] {
        let mut network = xor_network(seed);
        let baseline = mean_absolute_error(&mut network, &inputs, &targets);
        assert!(
            baseline > 0.2,
            "seed {seed}: untrained error {baseline} suspiciously low"
        );
    }
}

#[test]
fn delta_sweep_engine_learns_xor() {
    let error = best_trained_mae(Algorithm::Backpropagation, 0.8, 15_000);
    assert!(error < 0.1, "trained error {error} not below 0.1");
}

#[test]
fn gradient_descent_engine_learns_xor() {
    let error = best_trained_mae(Algorithm::GradientDescent, 0.5, 10_000);
    assert!(error < 0.1, "trained error {error} not below 0.1");
}

#[test]
fn training_data_is_left_untouched() {
    let (inputs, targets) = xor_data();
    let inputs_before = inputs.clone();
    let targets_before = targets.clone();

    let mut network = xor_network(1);
    network.train(&inputs, &targets, &TrainOptions::new(0.5, 20));

    assert_eq!(inputs, inputs_before);
    assert_eq!(targets, targets_before);
}
