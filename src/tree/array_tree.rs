//! Defines `ArrayTree`, a fitted tree stored as flat per-node arrays.
//!
//! This is the representation most tree libraries expose after fitting:
//! node `i` splits on `feature[i]` at `threshold[i]` and sends
//! a row with `x[feature[i]] <= threshold[i]` to `children_left[i]`,
//! every other row to `children_right[i]`.
//! Terminal nodes store `-1` in both child arrays.
use serde::{Serialize, Deserialize};

use std::path::Path;
use std::fs::File;
use std::io::BufReader;

use crate::{Result, Sample, SummaryError};
use super::fitted_tree::{FittedTree, TreeKind};
use super::walker::{self, is_terminal, max_entry};


/// A fitted binary tree given by its node arrays.
/// `classes` is `Some` for classification trees and `None` for
/// regression trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayTree {
    /// Left child of each node, `-1` for leaves.
    pub children_left: Vec<i64>,
    /// Right child of each node, `-1` for leaves.
    pub children_right: Vec<i64>,
    /// Split feature (column position) of each node, negative for leaves.
    pub feature: Vec<i64>,
    /// Split threshold of each node.
    pub threshold: Vec<f64>,
    /// Impurity vector of each node.
    pub impurity: Vec<Vec<f64>>,
    /// Value vector of each node.
    /// Per-class counts for classifiers, the mean target for regressors.
    pub value: Vec<Vec<f64>>,
    /// Number of training rows that reached each node.
    pub n_node_samples: Vec<f64>,
    /// Number of features the tree was fitted on.
    pub n_features: usize,
    /// Class labels, in the order of the value vector.
    pub classes: Option<Vec<i64>>,
}


impl ArrayTree {
    /// Read an `ArrayTree` from a JSON file and validate it.
    pub fn from_json<P>(path: P) -> Result<Self>
        where P: AsRef<Path>
    {
        let file = File::open(path)?;
        let tree: Self = serde_json::from_reader(BufReader::new(file))?;
        tree.validate()?;
        Ok(tree)
    }


    /// Parse an `ArrayTree` from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tree: Self = serde_json::from_str(json)?;
        tree.validate()?;
        Ok(tree)
    }


    /// Serialize this tree to a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }


    /// Check the per-node arrays (see [`FittedTree::check_arrays`])
    /// and that the child indices form a tree.
    pub fn validate(&self) -> Result<()> {
        self.check_arrays()?;
        walker::walk(self).map(|_| ())
    }


    /// Returns `true` if `node` is terminal.
    /// A node missing from either child array counts as terminal.
    #[inline]
    fn is_leaf(&self, node: usize) -> bool {
        match (self.children_left.get(node), self.children_right.get(node)) {
            (Some(&l), Some(&r)) => is_terminal(l, r),
            _ => true,
        }
    }


    /// Returns the index of the leaf that `row` of `sample` falls into.
    /// Returns `None` if the path leaves the tree.
    pub fn leaf_of(&self, sample: &Sample, row: usize) -> Option<usize> {
        let features = sample.features();
        let mut node = 0_usize;

        // A valid path visits every node at most once.
        for _ in 0..=self.children_left.len() {
            let left = *self.children_left.get(node)?;
            let right = *self.children_right.get(node)?;
            if is_terminal(left, right) {
                return Some(node);
            }

            let feature = usize::try_from(*self.feature.get(node)?).ok()?;
            let threshold = *self.threshold.get(node)?;
            let x = features.get(feature)?[row];
            let next = if x <= threshold { left } else { right };
            node = usize::try_from(next).ok()?;
        }
        None
    }


    fn leaf_output(&self, node: usize) -> f64 {
        let value = FittedTree::value(self, node);
        match &self.classes {
            Some(classes) => {
                let best = value.iter()
                    .enumerate()
                    .fold((0, f64::MIN), |(bi, bv), (i, &v)| {
                        if v > bv { (i, v) } else { (bi, bv) }
                    })
                    .0;
                classes.get(best).map_or(f64::NAN, |&c| c as f64)
            },
            None => value.first().copied().unwrap_or(f64::NAN),
        }
    }
}


impl FittedTree for ArrayTree {
    fn kind(&self) -> TreeKind {
        if self.classes.is_some() {
            TreeKind::Classifier
        } else {
            TreeKind::Regressor
        }
    }


    /// Checks that the per-node arrays agree with each other,
    /// that every split feature exists and
    /// that the value vectors fit the class labels.
    fn check_arrays(&self) -> Result<()> {
        let n_nodes = self.children_left.len();
        let lengths = [
            ("children_right", self.children_right.len()),
            ("feature", self.feature.len()),
            ("threshold", self.threshold.len()),
            ("impurity", self.impurity.len()),
            ("value", self.value.len()),
            ("n_node_samples", self.n_node_samples.len()),
        ];
        for (name, len) in lengths {
            if len != n_nodes {
                return Err(SummaryError::Structure(format!(
                    "`{name}` has {len} entries, expected {n_nodes}"
                )));
            }
        }

        for node in 0..n_nodes {
            if self.is_leaf(node) { continue; }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= self.n_features {
                return Err(SummaryError::Structure(format!(
                    "node {node} splits on feature {feature}, \
                     but the tree has {} features",
                    self.n_features,
                )));
            }
        }

        if let Some(classes) = &self.classes {
            let width = self.value.iter().map(Vec::len).max().unwrap_or(0);
            if classes.is_empty() || width > classes.len() {
                return Err(SummaryError::Structure(format!(
                    "value vectors have {width} entries \
                     but {} classes are given",
                    classes.len(),
                )));
            }
        }
        Ok(())
    }


    fn node_count(&self) -> usize {
        self.children_left.len()
    }


    fn children_left(&self) -> &[i64] {
        &self.children_left[..]
    }


    fn children_right(&self) -> &[i64] {
        &self.children_right[..]
    }


    fn impurity(&self, node: usize) -> &[f64] {
        self.impurity.get(node).map(Vec::as_slice).unwrap_or(&[])
    }


    fn value(&self, node: usize) -> &[f64] {
        self.value.get(node).map(Vec::as_slice).unwrap_or(&[])
    }


    fn n_leaves(&self) -> usize {
        (0..self.node_count().min(self.children_right.len()))
            .filter(|&node| self.is_leaf(node))
            .count()
    }


    /// Mean decrease in impurity, normalized to sum to `1`.
    fn feature_importances(&self) -> Vec<f64> {
        let mut importances = vec![0.0; self.n_features];

        let weighted_impurity = |node: usize| {
            let w = self.n_node_samples.get(node).copied().unwrap_or(0.0);
            w * max_entry(FittedTree::impurity(self, node)).unwrap_or(0.0)
        };

        for node in 0..self.node_count() {
            if self.is_leaf(node) { continue; }
            // Nodes missing from `feature` add no importance.
            let Some(&feature) = self.feature.get(node) else { continue; };
            let (Ok(l), Ok(r), Ok(f)) = (
                usize::try_from(self.children_left[node]),
                usize::try_from(self.children_right[node]),
                usize::try_from(feature),
            ) else { continue; };
            if f >= self.n_features { continue; }

            importances[f] += weighted_impurity(node)
                - weighted_impurity(l)
                - weighted_impurity(r);
        }

        let total = importances.iter().sum::<f64>();
        if total > 0.0 {
            importances.iter_mut()
                .for_each(|imp| *imp /= total);
        }
        importances
    }


    fn classes(&self) -> &[i64] {
        self.classes.as_deref().unwrap_or(&[])
    }


    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        self.leaf_of(sample, row)
            .map_or(f64::NAN, |leaf| self.leaf_output(leaf))
    }


    fn n_features(&self) -> usize {
        self.n_features
    }


    fn describe(&self) -> String {
        format!(
            "ArrayTree({kind}, nodes = {n_nodes}, leaves = {n_leaves}, \
             features = {n_features})",
            kind = self.kind(),
            n_nodes = self.node_count(),
            n_leaves = self.n_leaves(),
            n_features = self.n_features,
        )
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    const STUMP: &str = r#"{
        "children_left":  [1, -1, -1],
        "children_right": [2, -1, -1],
        "feature":        [1, -2, -2],
        "threshold":      [2.5, -2.0, -2.0],
        "impurity":       [[0.5], [0.0], [0.0]],
        "value":          [[2.0, 2.0], [2.0, 0.0], [0.0, 2.0]],
        "n_node_samples": [4.0, 2.0, 2.0],
        "n_features":     2,
        "classes":        [0, 1]
    }"#;


    fn sample() -> Sample {
        let s1 = Series::new("a", &[0.0, 0.0, 9.0, 9.0]);
        let s2 = Series::new("b", &[1.0, 2.0, 3.0, 4.0]);
        let df = DataFrame::new(vec![s1, s2]).unwrap();
        Sample::from_features(&df).unwrap()
    }


    #[test]
    fn parses_and_predicts() {
        let tree = ArrayTree::from_json_str(STUMP).unwrap();
        assert_eq!(tree.kind(), TreeKind::Classifier);
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.predict_all(&sample()), vec![0.0, 0.0, 1.0, 1.0]);
        assert_eq!(tree.leaf_of(&sample(), 2), Some(2));
    }


    #[test]
    fn importances_follow_the_split_feature() {
        let tree = ArrayTree::from_json_str(STUMP).unwrap();
        assert_eq!(tree.feature_importances(), vec![0.0, 1.0]);
    }


    #[test]
    fn regressor_predicts_the_leaf_value() {
        let mut tree = ArrayTree::from_json_str(STUMP).unwrap();
        tree.classes = None;
        tree.value = vec![vec![1.5], vec![-0.5], vec![3.5]];
        assert_eq!(tree.kind(), TreeKind::Regressor);
        assert_eq!(tree.predict_all(&sample()), vec![-0.5, -0.5, 3.5, 3.5]);
        assert!(tree.classes().is_empty());
    }


    #[test]
    fn unknown_split_feature_is_rejected() {
        let json = STUMP.replace("\"n_features\":     2", "\"n_features\": 1");
        let err = ArrayTree::from_json_str(&json).unwrap_err();
        assert!(matches!(err, SummaryError::Structure(_)));
    }


    #[test]
    fn malformed_json_is_rejected() {
        let err = ArrayTree::from_json_str("{ \"children_left\": [").unwrap_err();
        assert!(matches!(err, SummaryError::Json(_)));
    }


    #[test]
    fn json_roundtrip() {
        let tree = ArrayTree::from_json_str(STUMP).unwrap();
        let json = tree.to_json_string().unwrap();
        assert_eq!(ArrayTree::from_json_str(&json).unwrap(), tree);
    }


    #[test]
    fn short_arrays_do_not_panic() {
        let mut tree = ArrayTree::from_json_str(STUMP).unwrap();
        tree.feature = Vec::new();
        tree.threshold = Vec::new();

        assert_eq!(tree.feature_importances(), vec![0.0, 0.0]);
        assert!(tree.predict(&sample(), 0).is_nan());
        assert!(matches!(tree.check_arrays(), Err(SummaryError::Structure(_))));
        assert!(tree.validate().is_err());
    }
}
