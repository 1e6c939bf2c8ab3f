//! Deviance of a fitted tree, computed from its terminal nodes.
use log::warn;

use crate::{NodeTable, Result, SummaryError};


/// Deviance of a classification tree:
/// `-2 Σ_c Σ_{leaf predicting c} n ln(n / N)`,
/// where `n` is the leaf's dominant-class count and `N` is
/// `n_observations`.
///
/// This uses one count per leaf instead of the per-class counts of every
/// leaf, so it is an approximation of the textbook multinomial deviance.
/// Leaves with `n = 0` contribute `0` (the limit of `n ln(n / N)`).
pub fn classification_deviance(
    nodes: &NodeTable,
    classes: &[i64],
    n_observations: usize,
) -> f64
{
    let total = n_observations as f64;

    for leaf in nodes.leaves() {
        if let Some(class) = leaf.class {
            if !classes.contains(&class) {
                warn!(
                    "leaf {} predicts class {class}, \
                     which is not one of the model classes {classes:?}",
                    leaf.index,
                );
            }
        }
    }

    let deviance = classes.iter()
        .flat_map(move |&c| {
            nodes.leaves()
                .filter(move |leaf| leaf.class == Some(c))
        })
        .filter(|leaf| leaf.n_sample > 0)
        .map(|leaf| {
            let n = leaf.n_sample as f64;
            let p_hat = n / total;
            n * p_hat.ln()
        })
        .sum::<f64>();

    -2.0 * deviance
}


/// Deviance of a regression tree: the sum of squared leaf impurities.
pub fn regression_deviance(nodes: &NodeTable) -> f64 {
    nodes.leaves()
        .map(|leaf| leaf.impurity.powi(2))
        .sum::<f64>()
}


/// `deviance / (n_observations - n_leaves)`.
///
/// Fails when the tree has at least as many leaves as observations,
/// since no residual degree of freedom is left.
pub fn residual_mean_deviance(
    deviance: f64,
    n_observations: usize,
    n_leaves: usize,
) -> Result<f64>
{
    if n_observations <= n_leaves {
        return Err(SummaryError::InvalidArgument(format!(
            "{n_observations} observations leave no residual degree \
             of freedom for {n_leaves} terminal nodes"
        )));
    }
    Ok(deviance / (n_observations - n_leaves) as f64)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::Node;
    use approx::assert_abs_diff_eq;


    fn leaf(index: usize, n_sample: usize, class: Option<i64>, impurity: f64)
        -> Node
    {
        Node {
            index,
            parent: Some(0),
            depth: 1,
            is_leaf: true,
            n_sample,
            class,
            impurity,
        }
    }


    fn root() -> Node {
        Node {
            index: 0,
            parent: None,
            depth: 0,
            is_leaf: false,
            n_sample: 0,
            class: None,
            impurity: 0.5,
        }
    }


    // Known approximation: one dominant-class count per leaf.
    #[test]
    fn classification_sums_over_classes_and_leaves() {
        let nodes = NodeTable::from(vec![
            root(),
            leaf(1, 40, Some(0), 0.0),
            leaf(2, 30, Some(1), 0.0),
        ]);
        let expected = -2.0 * (
            40.0 * (40.0_f64 / 100.0).ln() + 30.0 * (30.0_f64 / 100.0).ln()
        );
        let deviance = classification_deviance(&nodes, &[0, 1], 100);
        assert_abs_diff_eq!(deviance, expected, epsilon = 1e-9);
        assert!(deviance > 0.0);
    }


    #[test]
    fn leaves_outside_the_class_set_are_ignored() {
        let nodes = NodeTable::from(vec![
            root(),
            leaf(1, 40, Some(0), 0.0),
            leaf(2, 30, Some(1), 0.0),
        ]);
        let only_zero = classification_deviance(&nodes, &[0], 100);
        let expected = -2.0 * 40.0 * (0.4_f64).ln();
        assert_abs_diff_eq!(only_zero, expected, epsilon = 1e-9);
    }


    #[test]
    fn empty_leaf_contributes_nothing() {
        let nodes = NodeTable::from(vec![
            root(),
            leaf(1, 0, Some(0), 0.0),
            leaf(2, 100, Some(1), 0.0),
        ]);
        let deviance = classification_deviance(&nodes, &[0, 1], 100);
        assert!(deviance.is_finite());
        assert_abs_diff_eq!(deviance, 0.0, epsilon = 1e-12);
    }


    #[test]
    fn regression_squares_leaf_impurities() {
        let nodes = NodeTable::from(vec![
            root(),
            leaf(1, 0, None, 0.25),
            leaf(2, 0, None, 0.1),
        ]);
        // The root impurity is not part of the deviance.
        assert_abs_diff_eq!(regression_deviance(&nodes), 0.0725, epsilon = 1e-12);
    }


    #[test]
    fn mean_deviance_divides_by_residual_df() {
        assert_eq!(residual_mean_deviance(9.0, 100, 4).unwrap(), 9.0 / 96.0);
        let err = residual_mean_deviance(9.0, 4, 4).unwrap_err();
        assert!(matches!(err, SummaryError::InvalidArgument(_)));
    }
}
