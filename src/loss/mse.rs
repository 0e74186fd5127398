use crate::math::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Scalar MSE: mean((predicted - expected)²)
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
            / n
    }

    /// Column gradient of the mean: 2·(predicted - expected) / n
    pub fn gradient(predicted: &Matrix, expected: &Matrix) -> Matrix {
        let n = predicted.rows as f64;
        (predicted.clone() - expected.clone()).map(|d| 2.0 * d / n)
    }
}
