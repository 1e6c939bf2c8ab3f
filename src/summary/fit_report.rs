//! Defines the computed fit statistics of a tree and their text form.
use colored::Colorize;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::{FittedTree, NodeTable, Result, Sample, SummaryError, TreeKind};
use crate::metrics::{
    self,
    ClassificationReport,
    ConfusionMatrix,
    Describe,
};
use super::deviance::*;


/// The statistics shared by classification and regression summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Classifier or regressor.
    pub kind: TreeKind,
    /// One-line description of the model.
    pub description: String,
    /// Training columns with a positive feature importance.
    pub variables: Vec<String>,
    /// Number of terminal nodes.
    pub n_leaves: usize,
    /// Number of training rows.
    pub n_observations: usize,
    /// Deviance of the tree.
    pub deviance: f64,
    /// `deviance / (n_observations - n_leaves)`.
    pub residual_mean_deviance: f64,
}


/// Fit statistics of a classification tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationFit {
    /// Shared statistics.
    pub overview: Overview,
    /// `1 - accuracy` on the training data.
    pub misclassification_rate: f64,
    /// Report on the test data if given, on the training data otherwise.
    pub report: ClassificationReport,
    /// `true` if `report` was computed on the test data.
    pub on_test: bool,
    /// Confusion matrix of the test data, if given.
    pub confusion_matrix: Option<ConfusionMatrix>,
}


/// Fit statistics of a regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionFit {
    /// Shared statistics.
    pub overview: Overview,
    /// Distribution of `y - prediction`, rounded to 3 decimals.
    pub residuals: Describe,
    /// `true` if the residuals were computed on the test data.
    pub on_test: bool,
}


/// The fit report of a tree. Each variant computes its own deviance and
/// renders its own sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FitReport {
    /// Report of a classification tree.
    Classification(ClassificationFit),
    /// Report of a regression tree.
    Regression(RegressionFit),
}


/// Compute the shared part of a report and the deviance given by `deviance`.
fn overview<T, F>(
    model: &T,
    nodes: &NodeTable,
    train: &Sample,
    deviance: F,
) -> Result<Overview>
    where T: FittedTree + ?Sized,
          F: FnOnce(&NodeTable, usize) -> f64,
{
    let n_leaves = model.n_leaves();
    let n_leaf_nodes = nodes.n_leaves();
    if n_leaves != n_leaf_nodes {
        return Err(SummaryError::Structure(format!(
            "the model reports {n_leaves} terminal nodes \
             but {n_leaf_nodes} were found"
        )));
    }

    let variables = train.feature_names()
        .into_iter()
        .zip(model.feature_importances())
        .filter(|(_, importance)| *importance > 0.0)
        .map(|(name, _)| name.to_string())
        .collect::<Vec<_>>();

    let n_observations = train.shape().0;
    let deviance = deviance(nodes, n_observations);
    let residual_mean_deviance = residual_mean_deviance(
        deviance, n_observations, n_leaves
    )?;

    Ok(Overview {
        kind: model.kind(),
        description: model.describe(),
        variables,
        n_leaves,
        n_observations,
        deviance,
        residual_mean_deviance,
    })
}


/// Returns the labels of `sample`, failing if they are not given.
fn labels_of(sample: &Sample) -> Result<&[f64]> {
    sample.target()
        .ok_or_else(|| {
            SummaryError::InvalidArgument(
                "the sample has no target values".into()
            )
        })
}


impl ClassificationFit {
    /// Compute the fit statistics of a classification tree.
    pub fn compute<T>(
        model: &T,
        nodes: &NodeTable,
        train: &Sample,
        test: Option<&Sample>,
    ) -> Result<Self>
        where T: FittedTree + ?Sized,
    {
        let classes = model.classes();
        let overview = overview(model, nodes, train, |nodes, n| {
            classification_deviance(nodes, classes, n)
        })?;

        let train_truth = metrics::to_labels(labels_of(train)?)?;
        let train_pred = metrics::to_labels(&model.predict_all(train))?;
        let misclassification_rate = metrics::misclassification_rate(
            &train_truth, &train_pred
        );

        let (report, confusion_matrix) = match test {
            Some(test) => {
                let truth = metrics::to_labels(labels_of(test)?)?;
                let pred = metrics::to_labels(&model.predict_all(test))?;
                let matrix = ConfusionMatrix::new(&truth, &pred);
                let report = ClassificationReport::from_confusion_matrix(
                    &matrix
                );
                (report, Some(matrix))
            },
            None => {
                let report = ClassificationReport::new(
                    &train_truth, &train_pred
                );
                (report, None)
            },
        };

        Ok(Self {
            overview,
            misclassification_rate,
            report,
            on_test: test.is_some(),
            confusion_matrix,
        })
    }
}


impl RegressionFit {
    /// Compute the fit statistics of a regression tree.
    pub fn compute<T>(
        model: &T,
        nodes: &NodeTable,
        train: &Sample,
        test: Option<&Sample>,
    ) -> Result<Self>
        where T: FittedTree + ?Sized,
    {
        let overview = overview(model, nodes, train, |nodes, _| {
            regression_deviance(nodes)
        })?;

        let sample = test.unwrap_or(train);
        let truth = labels_of(sample)?;
        let residuals = truth.iter()
            .zip(model.predict_all(sample))
            .map(|(y, y_hat)| y - y_hat)
            .collect::<Vec<_>>();
        let residuals = Describe::new(&residuals).round(3);

        Ok(Self {
            overview,
            residuals,
            on_test: test.is_some(),
        })
    }
}


impl FitReport {
    /// Compute the report of the variant matching `model.kind()`.
    pub fn compute<T>(
        model: &T,
        nodes: &NodeTable,
        train: &Sample,
        test: Option<&Sample>,
    ) -> Result<Self>
        where T: FittedTree + ?Sized,
    {
        let report = match model.kind() {
            TreeKind::Classifier => Self::Classification(
                ClassificationFit::compute(model, nodes, train, test)?
            ),
            TreeKind::Regressor => Self::Regression(
                RegressionFit::compute(model, nodes, train, test)?
            ),
        };
        Ok(report)
    }


    /// Returns the statistics shared by both variants.
    pub fn overview(&self) -> &Overview {
        match self {
            Self::Classification(fit) => &fit.overview,
            Self::Regression(fit) => &fit.overview,
        }
    }


    /// Returns the deviance.
    #[inline]
    pub fn deviance(&self) -> f64 {
        self.overview().deviance
    }


    /// Returns the residual mean deviance.
    #[inline]
    pub fn residual_mean_deviance(&self) -> f64 {
        self.overview().residual_mean_deviance
    }


    /// Returns the number of terminal nodes.
    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.overview().n_leaves
    }


    /// Render the report.
    /// If `colored` is `true`, section headers are highlighted.
    pub fn render(&self, colored: bool) -> String {
        let mut text = self.overview().render(colored);
        match self {
            Self::Classification(fit) => fit.render_into(&mut text, colored),
            Self::Regression(fit) => fit.render_into(&mut text, colored),
        }
        text
    }
}


fn header(text: &str, colored: bool) -> String {
    if colored {
        text.bold().cyan().to_string()
    } else {
        text.to_string()
    }
}


impl Overview {
    fn render(&self, colored: bool) -> String {
        let df = self.n_observations.saturating_sub(self.n_leaves);
        format!(
            "{title}\n\
             {description}\n\
             {variables_header}\n\
             [{variables}]\n\
             Number of terminal nodes: {n_leaves}\n\
             Residual mean deviance: {mean:.4} = {deviance:.2} / {df}\n",
            title = header(self.kind.title(), colored),
            description = self.description,
            variables_header = header(
                "Variables actually used in tree construction:", colored
            ),
            variables = self.variables.join(", "),
            n_leaves = self.n_leaves,
            mean = self.residual_mean_deviance,
            deviance = self.deviance,
        )
    }
}


impl ClassificationFit {
    fn render_into(&self, text: &mut String, colored: bool) {
        text.push_str(&format!(
            "Misclassification error rate: {:.2}\n",
            self.misclassification_rate,
        ));

        let title = if self.on_test {
            "Test Error Classification Report"
        } else {
            "Training Error Classification Report"
        };
        text.push_str(&format!("\n{}\n{}", header(title, colored), self.report));

        if let Some(matrix) = &self.confusion_matrix {
            text.push_str(&format!(
                "\n{}\n{matrix}",
                header("Test Confusion Matrix", colored),
            ));
        }
    }
}


impl RegressionFit {
    fn render_into(&self, text: &mut String, colored: bool) {
        text.push_str(&format!(
            "{}\n{}",
            header("Distribution of residuals:", colored),
            self.residuals,
        ));
    }
}


impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
