//! The files in `summary/` directory compute the fit statistics of a
//! walked tree and render them as an R-style summary.

/// Defines the deviance of classification / regression trees.
pub mod deviance;

/// Defines `FitReport`, the computed summary.
pub mod fit_report;

/// Defines `TreeSummary`, the entry point that ties everything together.
pub mod tree_summary;


pub use deviance::{
    classification_deviance,
    regression_deviance,
    residual_mean_deviance,
};
pub use fit_report::{
    FitReport,
    Overview,
    ClassificationFit,
    RegressionFit,
};
pub use tree_summary::{TreeSummary, summarize};
