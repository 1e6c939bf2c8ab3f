//! The read-only interface a fitted tree exposes to this crate.
//!
//! The tree model, its training routine and its array representation live
//! outside of this crate. Implementing `FittedTree` for a model lets
//! [`walk`](crate::tree::walk) and [`TreeSummary`](crate::TreeSummary)
//! consume it.
use serde::{Serialize, Deserialize};
use std::fmt;

use crate::{Result, Sample};


/// Whether a fitted tree predicts discrete classes or continuous values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeKind {
    /// The tree predicts a class label.
    Classifier,
    /// The tree predicts a real value.
    Regressor,
}


impl TreeKind {
    /// Returns `true` for `TreeKind::Classifier`.
    #[inline]
    pub fn is_classifier(&self) -> bool {
        matches!(self, Self::Classifier)
    }


    /// The first line of a summary.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Classifier => "Classification tree:",
            Self::Regressor => "Regression tree:",
        }
    }
}


impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classifier => write!(f, "classifier"),
            Self::Regressor => write!(f, "regressor"),
        }
    }
}


/// A trait that defines the view of a fitted binary tree.
///
/// Node `i` is described by `children_left()[i]`, `children_right()[i]`,
/// `impurity(i)` and `value(i)`.
/// A node whose two child indices are equal (conventionally `-1`)
/// is a terminal node.
pub trait FittedTree {
    /// Returns the kind of this tree.
    fn kind(&self) -> TreeKind;


    /// Checks the model's own arrays before the tree is walked.
    /// Returns `SummaryError::Structure` if they are inconsistent.
    fn check_arrays(&self) -> Result<()> {
        Ok(())
    }


    /// Returns the number of nodes.
    fn node_count(&self) -> usize;


    /// Returns the left child index of every node.
    fn children_left(&self) -> &[i64];


    /// Returns the right child index of every node.
    fn children_right(&self) -> &[i64];


    /// Returns the impurity vector of `node`.
    fn impurity(&self, node: usize) -> &[f64];


    /// Returns the value vector of `node`.
    fn value(&self, node: usize) -> &[f64];


    /// Returns the number of terminal nodes.
    fn n_leaves(&self) -> usize;


    /// Returns the importance of each feature, in column order.
    fn feature_importances(&self) -> Vec<f64>;


    /// Returns the class labels known to the model.
    /// Regressors return an empty slice.
    fn classes(&self) -> &[i64];


    /// Predicts the target value of the i'th row of `sample`.
    /// Classifiers return the class label as `f64`.
    fn predict(&self, sample: &Sample, row: usize) -> f64;


    /// Returns the number of features the model was fitted on.
    fn n_features(&self) -> usize {
        self.feature_importances().len()
    }


    /// Predicts the target values of `sample`.
    fn predict_all(&self, sample: &Sample) -> Vec<f64> {
        let n_sample = sample.shape().0;
        (0..n_sample).map(|row| self.predict(sample, row))
            .collect::<Vec<_>>()
    }


    /// A one-line description of the model printed under the title.
    fn describe(&self) -> String {
        format!(
            "{kind} with {n_nodes} nodes",
            kind = self.kind(),
            n_nodes = self.node_count(),
        )
    }
}
