use laminar_nn::{Algorithm, LoggingLevel, Network, Shuffle, TrainOptions};

// Same task as the `xor` demo, driven by the delta-sweep engine. The batch
// logger tracks running accuracy; RUST_LOG=debug shows it per batch.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut network =
        Network::build_with_seed(vec![2.into(), 3.into(), 1.into()], LoggingLevel::All, 42)
            .expect("valid layer spec");

    let inputs = vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ];
    let targets = vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]];

    let options = TrainOptions::new(0.8, 15_000)
        .with_algorithm(Algorithm::Backpropagation)
        .with_shuffle(Shuffle::Seeded(42));
    network.train(&inputs, &targets, &options);

    for input in &inputs {
        println!(
            "Input: {:?} -> Output: {:.4}",
            input,
            network.predict(input)[0]
        );
    }
}
