pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod progress;
pub mod train;
pub mod error;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::{ConnectionType, DenseLayer, Init, InputLayer, Layer, LayerRole, OutputLayer};
pub use network::{CacheGuard, LayerItem, LoggingLevel, Network, NetworkSpec};
pub use loss::mse::MseLoss;
pub use progress::{accuracy_score, Position, ProgressLogger};
pub use train::{Algorithm, Shuffle, TrainOptions};
pub use error::{Error, Result};
