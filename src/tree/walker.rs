//! Reconstructs the parent/depth/leaf structure of a fitted tree
//! from its flat child-index arrays.
use fixedbitset::FixedBitSet;
use log::debug;

use crate::{Result, SummaryError};
use super::fitted_tree::FittedTree;
use super::node::{Node, NodeTable};


/// Returns `true` if a node with the given child indices is terminal.
///
/// The tree arrays encode "no children" by giving both children the same
/// sentinel index (conventionally `-1`).
#[inline]
pub fn is_terminal(left: i64, right: i64) -> bool {
    left == right
}


/// Round `x` to 4 decimal places.
#[inline]
pub(crate) fn round4(x: f64) -> f64 {
    (x * 1e4).round() / 1e4
}


/// Returns the largest entry of `xs`, or `None` for an empty slice.
#[inline]
pub(crate) fn max_entry(xs: &[f64]) -> Option<f64> {
    xs.iter().copied().reduce(f64::max)
}


/// Walk `tree` from the root and return one `Node` per node index.
///
/// The traversal uses an explicit stack so that deep trees do not
/// exhaust the call stack. A parent is always recorded before its
/// children; the order among siblings is unspecified.
pub fn walk<T>(tree: &T) -> Result<NodeTable>
    where T: FittedTree + ?Sized,
{
    let n_nodes = tree.node_count();
    let left = tree.children_left();
    let right = tree.children_right();
    check_shape(n_nodes, left, right)?;

    let is_classifier = tree.kind().is_classifier();

    let mut nodes = (0..n_nodes).map(Node::unvisited)
        .collect::<Vec<_>>();
    let mut visited = FixedBitSet::with_capacity(n_nodes);

    // (node index, parent index, parent depth)
    let mut stack: Vec<(usize, Option<usize>, isize)> = vec![(0, None, -1)];

    while let Some((index, parent, parent_depth)) = stack.pop() {
        if visited.put(index) {
            return Err(SummaryError::Structure(
                format!("node {index} is reached more than once")
            ));
        }

        let depth = (parent_depth + 1) as usize;
        let node = &mut nodes[index];
        node.index = index;
        node.parent = parent;
        node.depth = depth;

        if !is_classifier {
            let impurity = max_entry(tree.impurity(index))
                .ok_or_else(|| {
                    SummaryError::Structure(
                        format!("node {index} has an empty impurity vector")
                    )
                })?;
            node.impurity = round4(impurity);
        }

        let (l, r) = (left[index], right[index]);
        if !is_terminal(l, r) {
            let l = child_index(l, index, n_nodes)?;
            let r = child_index(r, index, n_nodes)?;
            let depth = depth as isize;
            stack.push((r, Some(index), depth));
            stack.push((l, Some(index), depth));
            continue;
        }

        let value = tree.value(index);
        let largest = max_entry(value)
            .ok_or_else(|| {
                SummaryError::Structure(
                    format!("leaf {index} has an empty value vector")
                )
            })?;
        node.is_leaf = true;
        node.n_sample = largest.round().max(0.0) as usize;
        if is_classifier {
            node.class = Some(if value[0] > 0.0 { 0 } else { 1 });
        }
    }

    if visited.count_ones(..) != n_nodes {
        let orphan = (0..n_nodes).find(|&i| !visited.contains(i))
            .unwrap_or(0);
        return Err(SummaryError::Structure(
            format!("node {orphan} is not reachable from the root")
        ));
    }

    let nodes = NodeTable::from(nodes);
    debug!(
        "walked {} nodes ({} leaves, max depth {})",
        nodes.len(), nodes.n_leaves(), nodes.max_depth(),
    );
    Ok(nodes)
}


fn check_shape(n_nodes: usize, left: &[i64], right: &[i64]) -> Result<()> {
    if n_nodes == 0 {
        return Err(SummaryError::Structure("the tree has no node".into()));
    }
    if left.len() != n_nodes || right.len() != n_nodes {
        return Err(SummaryError::Structure(format!(
            "expected {n_nodes} child indices, \
             got {} left and {} right",
            left.len(), right.len(),
        )));
    }
    Ok(())
}


fn child_index(child: i64, parent: usize, n_nodes: usize) -> Result<usize> {
    usize::try_from(child).ok()
        .filter(|&c| c < n_nodes)
        .ok_or_else(|| {
            SummaryError::Structure(format!(
                "node {parent} points to child {child}, \
                 outside of 0..{n_nodes}"
            ))
        })
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ArrayTree;


    //         0
    //       /   \
    //      1     4
    //     / \
    //    2   3
    fn classifier() -> ArrayTree {
        ArrayTree {
            children_left: vec![1, 2, -1, -1, -1],
            children_right: vec![4, 3, -1, -1, -1],
            feature: vec![0, 1, -2, -2, -2],
            threshold: vec![0.5, 1.5, -2.0, -2.0, -2.0],
            impurity: vec![vec![0.5], vec![0.4], vec![0.0], vec![0.2], vec![0.1]],
            value: vec![
                vec![50.0, 50.0],
                vec![40.0, 10.0],
                vec![30.0, 0.0],
                vec![10.0, 10.0],
                vec![0.0, 40.0],
            ],
            n_node_samples: vec![100.0, 50.0, 30.0, 20.0, 50.0],
            n_features: 2,
            classes: Some(vec![0, 1]),
        }
    }


    #[test]
    fn root_and_depths() {
        let nodes = walk(&classifier()).unwrap();

        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0].parent, None);
        assert_eq!(nodes[0].parent_index(), -1);
        assert_eq!(nodes[0].depth, 0);
        assert_eq!(nodes[1].parent, Some(0));
        assert_eq!(nodes[2].parent, Some(1));
        assert_eq!(nodes[3].depth, 2);
        assert_eq!(nodes[4].depth, 1);
        assert_eq!(nodes.max_depth(), 2);
    }


    #[test]
    fn leaves_carry_class_and_count() {
        let nodes = walk(&classifier()).unwrap();

        let leaves = nodes.leaves().map(|n| n.index).collect::<Vec<_>>();
        assert_eq!(leaves, vec![2, 3, 4]);

        assert_eq!(nodes[2].n_sample, 30);
        assert_eq!(nodes[2].class, Some(0));
        // value[0] == 0 predicts the second class.
        assert_eq!(nodes[4].class, Some(1));
        assert_eq!(nodes[4].n_sample, 40);

        assert!(!nodes[0].is_leaf);
        assert_eq!(nodes[0].n_sample, 0);
        assert_eq!(nodes[0].class, None);
        assert_eq!(nodes[0].impurity, 0.0);
    }


    #[test]
    fn regression_impurity_is_rounded() {
        let mut tree = classifier();
        tree.classes = None;
        tree.impurity[3] = vec![0.123456, 0.01];

        let nodes = walk(&tree).unwrap();
        assert_eq!(nodes[3].impurity, 0.1235);
        assert_eq!(nodes[0].impurity, 0.5);
        assert!(nodes.iter().all(|n| n.class.is_none()));
    }


    #[test]
    fn single_leaf_tree() {
        let tree = ArrayTree {
            children_left: vec![-1],
            children_right: vec![-1],
            feature: vec![-2],
            threshold: vec![-2.0],
            impurity: vec![vec![0.0]],
            value: vec![vec![7.0, 3.0]],
            n_node_samples: vec![10.0],
            n_features: 2,
            classes: Some(vec![0, 1]),
        };
        let nodes = walk(&tree).unwrap();
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].is_leaf);
        assert_eq!(nodes[0].n_sample, 7);
    }


    #[test]
    fn length_mismatch_is_rejected() {
        let mut tree = classifier();
        tree.children_right.pop();
        let err = walk(&tree).unwrap_err();
        assert!(matches!(err, SummaryError::Structure(_)));
    }


    #[test]
    fn dangling_child_is_rejected() {
        let mut tree = classifier();
        tree.children_left[1] = 9;
        let err = walk(&tree).unwrap_err();
        assert!(matches!(err, SummaryError::Structure(_)));
    }


    #[test]
    fn shared_child_is_rejected() {
        let mut tree = classifier();
        // Node 4 now hangs below both 0 and 1; node 3 becomes unreachable.
        tree.children_right[1] = 4;
        let err = walk(&tree).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }


    #[test]
    fn unreachable_node_is_rejected() {
        let mut tree = classifier();
        tree.children_left.push(-1);
        tree.children_right.push(-1);
        tree.feature.push(-2);
        tree.threshold.push(-2.0);
        tree.impurity.push(vec![0.0]);
        tree.value.push(vec![1.0, 0.0]);
        tree.n_node_samples.push(1.0);

        let err = walk(&tree).unwrap_err();
        assert!(err.to_string().contains("node 5 is not reachable"));
    }


    #[test]
    fn sentinel_predicate() {
        assert!(is_terminal(-1, -1));
        assert!(!is_terminal(1, 2));
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(max_entry(&[]), None);
        assert_eq!(max_entry(&[1.0, 3.0, 2.0]), Some(3.0));
    }
}
