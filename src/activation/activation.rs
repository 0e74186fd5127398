use serde::{Deserialize, Serialize};
use std::f64::consts::E;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    #[default]
    Sigmoid,
    #[serde(rename = "relu")]
    ReLU,
    Identity,
    Tanh,
    #[serde(rename = "leaky_relu")]
    LeakyReLU { alpha: f64 },
    Elu { alpha: f64 },
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::ReLU => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            ActivationFunction::Identity => x,
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::LeakyReLU { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * x
                }
            }
            ActivationFunction::Elu { alpha } => {
                if x > 0.0 {
                    x
                } else {
                    alpha * (E.powf(x) - 1.0)
                }
            }
        }
    }

    /// Element-wise derivative, expressed in terms of the activation value
    /// `a = function(x)` rather than the pre-activation `x`.
    ///
    /// Layers cache activations, not pre-activations, so both training
    /// engines evaluate derivatives on what is already in the cache:
    /// sigmoid becomes `a·(1−a)`, tanh `1−a²`, and so on. Every variant in
    /// this enum has a derivative recoverable from `a` alone.
    pub fn derivative(&self, a: f64) -> f64 {
        match self {
            ActivationFunction::Sigmoid => a * (1.0 - a),
            ActivationFunction::ReLU => {
                if a > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Tanh => 1.0 - a * a,
            ActivationFunction::LeakyReLU { alpha } => {
                if a > 0.0 {
                    1.0
                } else {
                    *alpha
                }
            }
            // For negative inputs a = α(e^x − 1), so α·e^x = a + α.
            ActivationFunction::Elu { alpha } => {
                if a > 0.0 {
                    1.0
                } else {
                    a + alpha
                }
            }
        }
    }
}
