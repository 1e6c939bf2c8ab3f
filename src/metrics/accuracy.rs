/// The proportion of examples where `prediction == truth`.
/// Returns `0.0` for empty inputs.
pub fn accuracy(truth: &[i64], prediction: &[i64]) -> f64 {
    let n_sample = truth.len().min(prediction.len());
    if n_sample == 0 { return 0.0; }

    let n_correct = truth.iter()
        .zip(prediction)
        .filter(|(y, p)| y == p)
        .count();
    n_correct as f64 / n_sample as f64
}


/// `1 - accuracy(truth, prediction)`.
#[inline]
pub fn misclassification_rate(truth: &[i64], prediction: &[i64]) -> f64 {
    1.0 - accuracy(truth, prediction)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_matches() {
        let truth = [0, 1, 1, 0, 1];
        let prediction = [0, 1, 0, 0, 0];
        assert_eq!(accuracy(&truth, &prediction), 0.6);
        assert!((misclassification_rate(&truth, &prediction) - 0.4).abs() < 1e-12);
    }


    #[test]
    fn empty_input() {
        assert_eq!(accuracy(&[], &[]), 0.0);
    }
}
