use serde::{Serialize, Deserialize};
use std::fmt;

use super::ConfusionMatrix;

const LABEL_WIDTH: usize = 12;
const WIDTH: usize = 10;


/// Precision, recall, F1 score and support of a single class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// The class label.
    pub label: i64,
    /// `tp / (tp + fp)`, `0` when nothing is predicted as this class.
    pub precision: f64,
    /// `tp / (tp + fn)`, `0` when the class does not occur.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1_score: f64,
    /// Number of rows whose actual label is this class.
    pub support: usize,
}


/// Per-class metrics together with the accuracy and
/// the macro / support-weighted averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// One entry per label, in ascending label order.
    pub classes: Vec<ClassMetrics>,
    /// Fraction of correctly predicted rows.
    pub accuracy: f64,
    /// Unweighted mean of the per-class metrics.
    pub macro_avg: (f64, f64, f64),
    /// Support-weighted mean of the per-class metrics.
    pub weighted_avg: (f64, f64, f64),
    /// Number of rows.
    pub support: usize,
    /// Number of decimals used when rendering.
    pub digits: usize,
}


#[inline]
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}


impl ClassificationReport {
    /// Build the report of `prediction` against `truth`.
    pub fn new(truth: &[i64], prediction: &[i64]) -> Self {
        let matrix = ConfusionMatrix::new(truth, prediction);
        Self::from_confusion_matrix(&matrix)
    }


    /// Build the report from an already counted confusion matrix.
    pub fn from_confusion_matrix(matrix: &ConfusionMatrix) -> Self {
        let classes = matrix.labels()
            .iter()
            .enumerate()
            .map(|(k, &label)| {
                let (tp, fp, fn_) = matrix.outcomes(k);
                let precision = ratio(tp, tp + fp);
                let recall = ratio(tp, tp + fn_);
                let f1_score = if precision + recall > 0.0 {
                    2.0 * precision * recall / (precision + recall)
                } else {
                    0.0
                };
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1_score,
                    support: tp + fn_,
                }
            })
            .collect::<Vec<_>>();

        let support = matrix.total();
        let n_correct = (0..classes.len())
            .map(|k| matrix.counts()[k][k])
            .sum::<usize>();
        let accuracy = ratio(n_correct, support);

        let n_classes = classes.len().max(1) as f64;
        let macro_avg = classes.iter()
            .fold((0.0, 0.0, 0.0), |(p, r, f), c| {
                (p + c.precision, r + c.recall, f + c.f1_score)
            });
        let macro_avg = (
            macro_avg.0 / n_classes,
            macro_avg.1 / n_classes,
            macro_avg.2 / n_classes,
        );

        let total = support.max(1) as f64;
        let weighted_avg = classes.iter()
            .fold((0.0, 0.0, 0.0), |(p, r, f), c| {
                let w = c.support as f64;
                (p + w * c.precision, r + w * c.recall, f + w * c.f1_score)
            });
        let weighted_avg = (
            weighted_avg.0 / total,
            weighted_avg.1 / total,
            weighted_avg.2 / total,
        );

        Self {
            classes,
            accuracy,
            macro_avg,
            weighted_avg,
            support,
            digits: 2,
        }
    }


    /// Set the number of decimals used when rendering.
    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }
}


impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.digits;
        writeln!(
            f,
            "{:>LABEL_WIDTH$}{:>WIDTH$}{:>WIDTH$}{:>WIDTH$}{:>WIDTH$}",
            "", "precision", "recall", "f1-score", "support",
        )?;
        writeln!(f)?;

        for c in &self.classes {
            writeln!(
                f,
                "{:>LABEL_WIDTH$}{:>WIDTH$.d$}{:>WIDTH$.d$}{:>WIDTH$.d$}{:>WIDTH$}",
                c.label, c.precision, c.recall, c.f1_score, c.support,
            )?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{:>LABEL_WIDTH$}{:>WIDTH$}{:>WIDTH$}{:>WIDTH$.d$}{:>WIDTH$}",
            "accuracy", "", "", self.accuracy, self.support,
        )?;
        for (name, (p, r, f1)) in [
            ("macro avg", self.macro_avg),
            ("weighted avg", self.weighted_avg),
        ] {
            writeln!(
                f,
                "{:>LABEL_WIDTH$}{:>WIDTH$.d$}{:>WIDTH$.d$}{:>WIDTH$.d$}{:>WIDTH$}",
                name, p, r, f1, self.support,
            )?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn per_class_and_averages() {
        // 0: tp = 2, fp = 1, fn = 1
        // 1: tp = 3, fp = 1, fn = 1
        let truth = [0, 0, 0, 1, 1, 1, 1];
        let prediction = [0, 0, 1, 1, 1, 1, 0];
        let report = ClassificationReport::new(&truth, &prediction);

        assert_eq!(report.classes.len(), 2);
        let c0 = &report.classes[0];
        assert_abs_diff_eq!(c0.precision, 2.0 / 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c0.recall, 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(c0.support, 3);

        let c1 = &report.classes[1];
        assert_abs_diff_eq!(c1.precision, 0.75, epsilon = 1e-12);
        assert_abs_diff_eq!(c1.f1_score, 0.75, epsilon = 1e-12);
        assert_eq!(c1.support, 4);

        assert_abs_diff_eq!(report.accuracy, 5.0 / 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            report.macro_avg.0, (2.0 / 3.0 + 0.75) / 2.0, epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            report.weighted_avg.1, (3.0 * 2.0 / 3.0 + 4.0 * 0.75) / 7.0,
            epsilon = 1e-12
        );
    }


    #[test]
    fn never_predicted_class_scores_zero() {
        let report = ClassificationReport::new(&[0, 1, 1], &[1, 1, 1]);
        assert_eq!(report.classes[0].precision, 0.0);
        assert_eq!(report.classes[0].recall, 0.0);
        assert_eq!(report.classes[0].f1_score, 0.0);
    }


    #[test]
    fn renders_sklearn_like_rows() {
        let report = ClassificationReport::new(&[0, 1, 1, 0], &[0, 1, 0, 0])
            .digits(3);
        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("accuracy"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("0.750"));
    }
}
