use laminar_nn::{LoggingLevel, MseLoss, Network, Shuffle, TrainOptions};

// Progress output goes through `tracing`; run with RUST_LOG=info (epochs)
// or RUST_LOG=debug (epochs + batches) to see it.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut network = Network::build_with_seed(
        vec![2.into(), 3.into(), 1.into()],
        LoggingLevel::Epochs,
        42,
    )
    .expect("valid layer spec");

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let targets = vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]];

    println!("before: mse = {:.6}", mse(&mut network, &inputs, &targets));

    let options = TrainOptions::new(0.5, 10_000).with_shuffle(Shuffle::Seeded(42));
    network.train(&inputs, &targets, &options);

    println!("after:  mse = {:.6}", mse(&mut network, &inputs, &targets));
    for input in &inputs {
        println!(
            "Input: {:?} -> Output: {:.4}",
            input,
            network.predict(input)[0]
        );
    }
}

fn mse(network: &mut Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> f64 {
    let total: f64 = inputs
        .iter()
        .zip(targets.iter())
        .map(|(input, target)| MseLoss::loss(&network.predict(input), target))
        .sum();
    total / inputs.len() as f64
}
