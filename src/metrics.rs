//! The files in `metrics/` directory define the fit metrics
//! printed in a tree summary.

/// Defines the accuracy and the misclassification rate.
pub mod accuracy;

/// Defines the confusion matrix.
pub mod confusion_matrix;

/// Defines the per-class precision / recall / F1 report.
pub mod classification_report;

/// Defines the descriptive statistics of a sequence.
pub mod describe;


pub use accuracy::{accuracy, misclassification_rate};
pub use confusion_matrix::ConfusionMatrix;
pub use classification_report::{ClassMetrics, ClassificationReport};
pub use describe::Describe;

use crate::{Result, SummaryError};


/// Convert real-valued labels into integer class labels.
/// A non-finite entry is a `SummaryError::Data`.
pub(crate) fn to_labels(ys: &[f64]) -> Result<Vec<i64>> {
    ys.iter()
        .enumerate()
        .map(|(row, &y)| {
            if y.is_finite() {
                Ok(y.round() as i64)
            } else {
                Err(SummaryError::Data(
                    format!("row {row} has the non-finite label {y}")
                ))
            }
        })
        .collect()
}


/// Returns the sorted distinct labels appearing in `truth` or `prediction`.
pub(crate) fn union_labels(truth: &[i64], prediction: &[i64]) -> Vec<i64> {
    let mut labels = truth.iter()
        .chain(prediction)
        .copied()
        .collect::<Vec<_>>();
    labels.sort_unstable();
    labels.dedup();
    labels
}
