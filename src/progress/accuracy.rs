/// Fraction of samples predicted correctly.
///
/// Single-output samples count as correct within 0.5 of the target;
/// multi-output samples use argmax agreement.
pub fn accuracy_score(targets: &[Vec<f64>], results: &[Vec<f64>]) -> f64 {
    assert_eq!(
        targets.len(),
        results.len(),
        "targets and results must have equal length"
    );
    if targets.is_empty() {
        return 0.0;
    }
    let correct = targets
        .iter()
        .zip(results.iter())
        .filter(|(target, result)| sample_correct(target, result))
        .count();
    correct as f64 / targets.len() as f64
}

/// Whether a single prediction counts as correct against its target.
pub fn sample_correct(target: &[f64], result: &[f64]) -> bool {
    if target.len() == 1 {
        (target[0] - result[0]).abs() < 0.5
    } else {
        argmax(target) == argmax(result)
    }
}

/// Index of the maximum element in a slice.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_outputs_use_threshold() {
        assert!(sample_correct(&[1.0], &[0.6]));
        assert!(!sample_correct(&[1.0], &[0.4]));
    }

    #[test]
    fn vector_outputs_use_argmax() {
        assert!(sample_correct(&[0.0, 1.0, 0.0], &[0.1, 0.7, 0.2]));
        assert!(!sample_correct(&[0.0, 1.0, 0.0], &[0.8, 0.1, 0.1]));
    }

    #[test]
    fn score_is_the_correct_fraction() {
        let targets = vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]];
        let results = vec![vec![0.9], vec![0.1], vec![0.2], vec![0.3]];
        assert_eq!(accuracy_score(&targets, &results), 0.75);
    }

    #[test]
    fn empty_sets_score_zero() {
        assert_eq!(accuracy_score(&[], &[]), 0.0);
    }
}
