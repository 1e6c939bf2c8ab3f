#![warn(missing_docs)]

//!
//! A crate that summarizes a fitted binary decision tree
//! the way statistical software summarizes tree models.
//!
//! Given the flat node arrays of a fitted tree
//! (see [`FittedTree`]) and the data it was fitted on,
//! this crate
//!
//! - reconstructs the parent / depth / leaf structure of the tree
//!     ([`walk`] returns a [`NodeTable`]),
//! - computes the fit statistics of the tree
//!     ([`FitReport`]):
//!     the variables used, the number of terminal nodes,
//!     the deviance and residual mean deviance, and
//!     - for classification trees,
//!         the misclassification rate, a classification report and
//!         (with a test sample) a confusion matrix,
//!     - for regression trees,
//!         the distribution of the residuals.
//!
//! [`TreeSummary`] ties both steps together and writes the report.
//!
//! ```no_run
//! use tree_summary::prelude::*;
//!
//! let tree = ArrayTree::from_json("/path/to/tree.json")?;
//! let train = SampleReader::new()
//!     .file("/path/to/train.csv")
//!     .has_header(true)
//!     .target_feature("class")
//!     .read()?;
//! let test = SampleReader::new()
//!     .file("/path/to/test.csv")
//!     .has_header(true)
//!     .target_feature("class")
//!     .read()?;
//!
//! let nodes = TreeSummary::new(&tree, &train)
//!     .test(&test)
//!     .print()?;
//! assert_eq!(nodes.n_leaves(), tree.n_leaves());
//! # Ok::<(), tree_summary::SummaryError>(())
//! ```

pub mod error;
pub mod sample;
pub mod tree;
pub mod metrics;
pub mod summary;

pub mod prelude;


pub use error::{Result, SummaryError};

pub use sample::{
    Feature,
    Sample,
    SampleReader,
};

pub use tree::{
    ArrayTree,
    FittedTree,
    Node,
    NodeTable,
    TreeKind,
    walk,
};

pub use summary::{
    ClassificationFit,
    FitReport,
    Overview,
    RegressionFit,
    TreeSummary,
    summarize,
};
