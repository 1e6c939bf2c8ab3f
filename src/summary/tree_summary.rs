use log::info;
use polars::prelude::*;

use std::io::{self, Write};

use crate::{FittedTree, NodeTable, Result, Sample, SummaryError};
use crate::tree::walk;
use super::fit_report::FitReport;


/// Summarizes a fitted tree against its training (and test) data,
/// in the spirit of R's `summary(tree)`.
/// # Example
/// ```no_run
/// use tree_summary::prelude::*;
///
/// let tree = ArrayTree::from_json("/path/to/tree.json")?;
/// let train = SampleReader::new()
///     .file("/path/to/train.csv")
///     .has_header(true)
///     .target_feature("class")
///     .read()?;
///
/// let nodes = TreeSummary::new(&tree, &train)
///     .colored(true)
///     .print()?;
/// println!("{} leaves", nodes.n_leaves());
/// # Ok::<(), tree_summary::SummaryError>(())
/// ```
pub struct TreeSummary<'a, T: ?Sized> {
    model: &'a T,
    train: &'a Sample,
    test: Option<&'a Sample>,
    colored: bool,
    digits: usize,
}


impl<'a, T> TreeSummary<'a, T>
    where T: FittedTree + ?Sized,
{
    /// Construct a new instance of `TreeSummary`.
    /// `train` must hold the training labels.
    pub fn new(model: &'a T, train: &'a Sample) -> Self {
        Self {
            model,
            train,
            test: None,
            colored: false,
            digits: 2,
        }
    }


    /// Set the held-out sample.
    /// It must hold both features and labels.
    pub fn test(mut self, test: &'a Sample) -> Self {
        self.test = Some(test);
        self
    }


    /// Highlight the section headers.
    /// Default is `false.`
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }


    /// Set the number of decimals of the classification report.
    /// Default is `2.`
    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }


    fn check_arguments(&self) -> Result<()> {
        let n_features = self.model.n_features();

        if !self.train.has_target() {
            return Err(SummaryError::InvalidArgument(
                "the training sample has no target values".into()
            ));
        }
        check_width("training", self.train, n_features)?;

        if let Some(test) = self.test {
            if !test.has_target() {
                return Err(SummaryError::InvalidArgument(
                    "test features were given without test labels".into()
                ));
            }
            check_width("test", test, n_features)?;
        }
        Ok(())
    }


    /// Walk the tree and compute its fit statistics without writing.
    pub fn report(&self) -> Result<(NodeTable, FitReport)> {
        self.check_arguments()?;
        self.model.check_arrays()?;

        let nodes = walk(self.model)?;
        let mut report = FitReport::compute(
            self.model, &nodes, self.train, self.test
        )?;
        if let FitReport::Classification(fit) = &mut report {
            fit.report.digits = self.digits;
        }

        info!(
            "summarized {} ({} observations, deviance {:.4})",
            self.model.kind(),
            report.overview().n_observations,
            report.deviance(),
        );
        Ok((nodes, report))
    }


    /// Write the summary to `writer` and return the nodes.
    pub fn write_to<W>(&self, writer: &mut W) -> Result<NodeTable>
        where W: Write,
    {
        let (nodes, report) = self.report()?;
        writer.write_all(report.render(self.colored).as_bytes())?;
        writer.flush()?;
        Ok(nodes)
    }


    /// Print the summary to the standard output and return the nodes.
    pub fn print(&self) -> Result<NodeTable> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.write_to(&mut handle)
    }
}


fn check_width(name: &str, sample: &Sample, n_features: usize) -> Result<()> {
    let width = sample.shape().1;
    if width != n_features {
        return Err(SummaryError::InvalidArgument(format!(
            "the {name} sample has {width} features, \
             but the model was fitted on {n_features}"
        )));
    }
    Ok(())
}


/// Print the summary of `model` and return its nodes.
///
/// `test_x` and `test_y` must be given together;
/// passing only one of them is an `InvalidArgument` error
/// raised before anything is computed.
pub fn summarize<T>(
    model: &T,
    train_x: &DataFrame,
    train_y: &Series,
    test_x: Option<&DataFrame>,
    test_y: Option<&Series>,
) -> Result<NodeTable>
    where T: FittedTree + ?Sized,
{
    let test = match (test_x, test_y) {
        (Some(x), Some(y)) => Some(Sample::from_dataframe(x, y)?),
        (None, None) => None,
        (Some(_), None) => {
            return Err(SummaryError::InvalidArgument(
                "`test_x` was given without `test_y`".into()
            ));
        },
        (None, Some(_)) => {
            return Err(SummaryError::InvalidArgument(
                "`test_y` was given without `test_x`".into()
            ));
        },
    };

    let train = Sample::from_dataframe(train_x, train_y)?;
    let summary = TreeSummary::new(model, &train);
    match &test {
        Some(test) => summary.test(test).print(),
        None => summary.print(),
    }
}
