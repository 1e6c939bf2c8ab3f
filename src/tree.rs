//! The files in `tree/` directory define the read-only view of a fitted
//! tree, the node records reconstructed from it, and the walker that
//! builds them.

/// Defines `FittedTree` trait.
pub mod fitted_tree;

/// Defines an array-backed fitted tree.
pub mod array_tree;

/// Defines the node records produced by the walker.
pub mod node;

/// Reconstructs the tree structure from the flat arrays.
pub mod walker;


pub use fitted_tree::{FittedTree, TreeKind};
pub use array_tree::ArrayTree;
pub use node::{Node, NodeTable};
pub use walker::{walk, is_terminal};
