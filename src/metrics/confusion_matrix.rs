use serde::{Serialize, Deserialize};
use std::fmt;

use super::union_labels;

const WIDTH: usize = 8;


/// A table of actual (rows) versus predicted (columns) class counts.
/// Labels are the sorted union of the actual and predicted labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<i64>,
    counts: Vec<Vec<usize>>,
}


impl ConfusionMatrix {
    /// Count every `(truth[i], prediction[i])` pair.
    pub fn new(truth: &[i64], prediction: &[i64]) -> Self {
        let labels = union_labels(truth, prediction);
        let n_labels = labels.len();
        let mut counts = vec![vec![0_usize; n_labels]; n_labels];

        let position = |y: &i64| labels.binary_search(y).ok();
        truth.iter()
            .zip(prediction)
            .for_each(|(y, p)| {
                if let (Some(i), Some(j)) = (position(y), position(p)) {
                    counts[i][j] += 1;
                }
            });

        Self { labels, counts }
    }


    /// Returns the labels in row/column order.
    pub fn labels(&self) -> &[i64] {
        &self.labels[..]
    }


    /// Returns the number of rows labelled `actual` and predicted
    /// as `predicted`.
    pub fn get(&self, actual: i64, predicted: i64) -> usize {
        let i = self.labels.binary_search(&actual);
        let j = self.labels.binary_search(&predicted);
        match (i, j) {
            (Ok(i), Ok(j)) => self.counts[i][j],
            _ => 0,
        }
    }


    /// Returns the rows of the matrix.
    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts[..]
    }


    /// Returns the total number of counted rows.
    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }


    /// Returns `(true positive, false positive, false negative)` of
    /// the label at position `k`.
    pub(crate) fn outcomes(&self, k: usize) -> (usize, usize, usize) {
        let tp = self.counts[k][k];
        let fp = self.counts.iter().map(|row| row[k]).sum::<usize>() - tp;
        let fn_ = self.counts[k].iter().sum::<usize>() - tp;
        (tp, fp, fn_)
    }
}


impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>WIDTH$}", "")?;
        for label in &self.labels {
            write!(f, "{:>WIDTH$}", format!("pred {label}"))?;
        }
        writeln!(f)?;

        for (label, row) in self.labels.iter().zip(&self.counts) {
            write!(f, "{:>WIDTH$}", format!("true {label}"))?;
            for count in row {
                write!(f, "{count:>WIDTH$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
