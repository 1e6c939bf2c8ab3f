//! Defines the node records reconstructed from a fitted tree.
use serde::{Serialize, Deserialize};

use std::ops::Index;
use std::slice::Iter;


/// One node of a fitted tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Position of this node in the tree arrays. `0` is the root.
    pub index: usize,

    /// Index of the parent node. `None` for the root only.
    pub parent: Option<usize>,

    /// Distance from the root.
    pub depth: usize,

    /// `true` iff the node has no distinct children.
    pub is_leaf: bool,

    /// The largest entry of the value vector, rounded.
    /// Populated for leaves only, `0` otherwise.
    pub n_sample: usize,

    /// The class predicted by a classification leaf (`0` or `1`).
    pub class: Option<i64>,

    /// The largest entry of the impurity vector, rounded to 4 decimals.
    /// Populated for regression trees only, `0.0` otherwise.
    pub impurity: f64,
}


impl Node {
    /// Returns a node that is not yet reached by the walker.
    pub(crate) fn unvisited(index: usize) -> Self {
        Self {
            index,
            parent: None,
            depth: 0,
            is_leaf: false,
            n_sample: 0,
            class: None,
            impurity: 0.0,
        }
    }


    /// Returns the parent index with `-1` standing for "no parent".
    #[inline]
    pub fn parent_index(&self) -> i64 {
        self.parent.map_or(-1, |p| p as i64)
    }


    /// Returns `true` if this node is the root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}


/// The nodes of a fitted tree, indexed by node index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTable {
    nodes: Vec<Node>,
}


impl From<Vec<Node>> for NodeTable {
    #[inline]
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}


impl NodeTable {
    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }


    /// Returns `true` if the table holds no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }


    /// Returns the node at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }


    /// Returns an iterator over the nodes in index order.
    pub fn iter(&self) -> Iter<'_, Node> {
        self.nodes.iter()
    }


    /// Returns an iterator over the terminal nodes.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| node.is_leaf)
    }


    /// Returns the number of terminal nodes.
    pub fn n_leaves(&self) -> usize {
        self.leaves().count()
    }


    /// Returns the depth of the deepest node.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter()
            .map(|node| node.depth)
            .max()
            .unwrap_or(0)
    }


    /// Returns the nodes as a slice.
    pub fn as_slice(&self) -> &[Node] {
        &self.nodes[..]
    }


    /// Consumes the table and returns the nodes.
    pub fn into_inner(self) -> Vec<Node> {
        self.nodes
    }
}


impl Index<usize> for NodeTable {
    type Output = Node;
    fn index(&self, idx: usize) -> &Self::Output {
        &self.nodes[idx]
    }
}


impl<'a> IntoIterator for &'a NodeTable {
    type Item = &'a Node;
    type IntoIter = Iter<'a, Node>;
    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
