use std::str::FromStr;

use crate::error::Error;

/// Which training engine a run uses.
///
/// `GradientDescent` seeds the MSE loss gradient and delegates every update
/// to the layers' own `backward` operations. `Backpropagation` is the
/// delta-sweep engine that drives updates through the layer accessors
/// directly. There is no fallback: an unrecognized name is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    #[default]
    GradientDescent,
    Backpropagation,
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Algorithm, Error> {
        match name {
            "gradient_descent" => Ok(Algorithm::GradientDescent),
            "back_propagation" | "backpropagation" => Ok(Algorithm::Backpropagation),
            other => Err(Error::UnknownAlgorithm(other.to_owned())),
        }
    }
}
