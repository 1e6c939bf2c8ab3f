//! Exports the standard structs and traits.
//!
pub use crate::error::{
    Result,
    SummaryError,
};


pub use crate::sample::{
    Sample,
    SampleReader,
};


pub use crate::tree::{
    // Fitted tree trait
    FittedTree,
    TreeKind,

    // Array-backed fitted tree
    ArrayTree,

    // Walked nodes
    Node,
    NodeTable,
    walk,
};


pub use crate::summary::{
    FitReport,
    TreeSummary,
    summarize,
};
