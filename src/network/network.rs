use std::ops::{Deref, DerefMut};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::layers::Layer;
use crate::math::Matrix;
use crate::network::builder::{build_layers, LayerItem};
use crate::progress::ProgressLogger;
use crate::train::{self, TrainOptions};

/// Controls which iteration ranges are instrumented during training.
///
/// Setting the level mutates the two loggers' enabled flags:
/// `Off` disables both, `Epochs` enables only the epoch logger, `All`
/// enables both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoggingLevel {
    Off,
    #[default]
    Epochs,
    All,
}

type FinalizeFn = Box<dyn Fn(&Matrix) -> Matrix>;

/// An ordered chain of layers plus the cross-cutting training state: the
/// two progress loggers, the logging level, the network-wide `save_data`
/// flag, and an optional finalize transform applied to inference output.
///
/// The chain's length and order are fixed at construction; the layers
/// themselves stay mutable so training can update their parameters.
pub struct Network {
    pub layers: Vec<Box<dyn Layer>>,
    pub epoch_logger: ProgressLogger,
    pub batch_logger: ProgressLogger,
    logging: LoggingLevel,
    finalize: Option<FinalizeFn>,
    save_data: bool,
}

/// Sequential forward propagation over a layer chain.
pub(crate) fn propagate(layers: &mut [Box<dyn Layer>], input: &Matrix) -> Matrix {
    let mut current = input.clone();
    for layer in layers.iter_mut() {
        current = layer.calculate(&current);
    }
    current
}

impl Network {
    /// Builds a network from a layer specification, wiring consecutive
    /// layers and assigning roles by position.
    pub fn build(items: Vec<LayerItem>, logging: LoggingLevel) -> Result<Network> {
        Network::build_with_rng(items, logging, &mut rand::thread_rng())
    }

    /// Same as `build`, with deterministic weight initialization.
    pub fn build_with_seed(
        items: Vec<LayerItem>,
        logging: LoggingLevel,
        seed: u64,
    ) -> Result<Network> {
        Network::build_with_rng(items, logging, &mut StdRng::seed_from_u64(seed))
    }

    fn build_with_rng(
        items: Vec<LayerItem>,
        logging: LoggingLevel,
        rng: &mut dyn RngCore,
    ) -> Result<Network> {
        let layers = build_layers(items, rng)?;
        let mut network = Network {
            layers,
            epoch_logger: ProgressLogger::new("Epochs: "),
            batch_logger: ProgressLogger::new("Batches: "),
            logging: LoggingLevel::Off,
            finalize: None,
            save_data: false,
        };
        network.set_logging(logging);
        debug!(layers = network.layers.len(), "network built");
        Ok(network)
    }

    pub fn logging(&self) -> LoggingLevel {
        self.logging
    }

    pub fn set_logging(&mut self, level: LoggingLevel) {
        self.logging = level;
        match level {
            LoggingLevel::Off => {
                self.epoch_logger.enabled = false;
                self.batch_logger.enabled = false;
            }
            LoggingLevel::Epochs => {
                self.epoch_logger.enabled = true;
                self.batch_logger.enabled = false;
            }
            LoggingLevel::All => {
                self.epoch_logger.enabled = true;
                self.batch_logger.enabled = true;
            }
        }
    }

    pub fn save_data(&self) -> bool {
        self.save_data
    }

    /// Propagates the caching flag to every layer.
    pub fn set_save_data(&mut self, enabled: bool) {
        self.save_data = enabled;
        for layer in &mut self.layers {
            layer.set_save_data(enabled);
        }
    }

    /// Enables caching for the guard's lifetime; the prior flag value is
    /// restored on drop, on every exit path.
    pub fn enable_caching(&mut self) -> CacheGuard<'_> {
        CacheGuard::new(self)
    }

    /// Replaces the identity finalize transform applied by `predict`.
    pub fn set_finalize<F>(&mut self, finalize: F)
    where
        F: Fn(&Matrix) -> Matrix + 'static,
    {
        self.finalize = Some(Box::new(finalize));
    }

    /// Runs inference on a single sample.
    ///
    /// The input is treated as a column vector for propagation and the
    /// column shape is stripped from the result, so layers never see a
    /// bare vector.
    pub fn predict(&mut self, input: &[f64]) -> Vec<f64> {
        self.infer(input, true)
    }

    /// `predict` without the finalize transform.
    pub fn predict_raw(&mut self, input: &[f64]) -> Vec<f64> {
        self.infer(input, false)
    }

    fn infer(&mut self, input: &[f64], finalize: bool) -> Vec<f64> {
        let column = Matrix::column(input);
        let result = propagate(&mut self.layers, &column);
        let result = if finalize {
            self.apply_finalize(result)
        } else {
            result
        };
        result.column_data()
    }

    /// Train-mode propagation: the input is already column-shaped and the
    /// result keeps its column shape.
    pub fn forward(&mut self, input: &Matrix, finalize: bool) -> Matrix {
        let result = propagate(&mut self.layers, input);
        if finalize {
            self.apply_finalize(result)
        } else {
            result
        }
    }

    fn apply_finalize(&self, values: Matrix) -> Matrix {
        match &self.finalize {
            Some(finalize) => finalize(&values),
            None => values,
        }
    }

    /// Current weight matrices of every non-input layer, in chain order.
    pub fn weights(&self) -> Vec<&Matrix> {
        self.layers
            .iter()
            .skip(1)
            .filter_map(|layer| layer.weights())
            .collect()
    }

    /// Trains the network in place; the mutated weights are the sole
    /// observable effect.
    ///
    /// Caching is enabled for the whole run through a guard, so the prior
    /// flag state is restored even if a shape mismatch panics mid-epoch.
    ///
    /// # Panics
    /// Panics if `inputs` is empty or `inputs` and `targets` have
    /// different lengths.
    pub fn train(&mut self, inputs: &[Vec<f64>], targets: &[Vec<f64>], options: &TrainOptions) {
        assert!(!inputs.is_empty(), "inputs must not be empty");
        assert_eq!(
            inputs.len(),
            targets.len(),
            "inputs and targets must have equal length"
        );

        debug!(
            algorithm = ?options.algorithm,
            epochs = options.epochs,
            samples = inputs.len(),
            "training started"
        );

        let mut guard = self.enable_caching();
        train::run(&mut guard, inputs, targets, options);
    }

    /// Split borrows for the training engines: the layer chain mutably,
    /// the two loggers shared.
    pub(crate) fn train_parts(
        &mut self,
    ) -> (&mut [Box<dyn Layer>], &ProgressLogger, &ProgressLogger) {
        (
            self.layers.as_mut_slice(),
            &self.epoch_logger,
            &self.batch_logger,
        )
    }
}

/// Scoped enablement of per-layer state caching.
///
/// Restores the previous `save_data` value when dropped, including during
/// unwinding, so an aborted training run cannot leave layers holding stale
/// caches.
pub struct CacheGuard<'a> {
    network: &'a mut Network,
    previous: bool,
}

impl<'a> CacheGuard<'a> {
    fn new(network: &'a mut Network) -> CacheGuard<'a> {
        let previous = network.save_data;
        network.set_save_data(true);
        CacheGuard { network, previous }
    }
}

impl Deref for CacheGuard<'_> {
    type Target = Network;

    fn deref(&self) -> &Network {
        self.network
    }
}

impl DerefMut for CacheGuard<'_> {
    fn deref_mut(&mut self) -> &mut Network {
        self.network
    }
}

impl Drop for CacheGuard<'_> {
    fn drop(&mut self) {
        let previous = self.previous;
        self.network.set_save_data(previous);
    }
}
