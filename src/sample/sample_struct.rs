use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::HashMap;
use std::ops::Index;

use polars::prelude::*;
use rayon::prelude::*;

use crate::{Result, SummaryError};
use super::feature::Feature;


/// Struct `Sample` holds a batch sample in dense format.
/// The target column is optional so that a feature matrix without labels
/// (e.g. test features whose labels were not given) can be represented.
#[derive(Debug, Clone)]
pub struct Sample {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) features: Vec<Feature>,
    pub(super) target: Option<Vec<f64>>,
    pub(super) n_sample: usize,
    pub(super) n_feature: usize,
}


impl Sample {
    /// Convert `polars::DataFrame` and `polars::Series` into `Sample`.
    /// The given frames are not modified.
    pub fn from_dataframe(data: &DataFrame, target: &Series)
        -> Result<Self>
    {
        let mut sample = Self::from_features(data)?;
        let target = Feature::from_series(target)?.into_target();

        if target.len() != sample.n_sample {
            return Err(SummaryError::InvalidArgument(format!(
                "the target has {} rows but the features have {} rows",
                target.len(), sample.n_sample,
            )));
        }

        sample.target = Some(target);
        Ok(sample)
    }


    /// Convert `polars::DataFrame` into `Sample` without a target.
    pub fn from_features(data: &DataFrame) -> Result<Self> {
        let (n_sample, n_feature) = data.shape();

        let features = data.get_columns()
            .par_iter()
            .map(Feature::from_series)
            .collect::<Result<Vec<_>>>()?;

        let name_to_index = index_names(&features);

        let sample = Self {
            name_to_index, features, target: None, n_sample, n_feature,
        };
        Ok(sample)
    }


    /// Read a CSV format file to `Sample` type.
    /// If `has_header` is `false`, the columns are named
    /// `Feat. [1]`, `Feat. [2]`, ...
    pub fn from_csv<P>(file: P, mut has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        // Open the given `file`.
        let file = File::open(file)?;
        let mut lines = BufReader::new(file).lines();

        let mut features = Vec::new();
        if has_header {
            let line = lines.next()
                .ok_or_else(|| {
                    SummaryError::Data("the CSV file is empty".into())
                })??;
            features = line.split(',')
                .map(|name| Feature::new(name.trim()))
                .collect::<Vec<_>>();
        }
        let mut n_sample = 0_usize;

        // For each line of the file
        for (lineno, line) in lines.enumerate() {
            let line = line?;
            if line.trim().is_empty() { continue; }

            let xs = parse_row(&line, lineno)?;

            // if the headeer does not exists,
            // construct a dummy header.
            if !has_header {
                features = (1..=xs.len()).map(|i| {
                        let name = format!("Feat. [{i}]");
                        Feature::new(name)
                    })
                    .collect::<Vec<_>>();
                has_header = true;
            }

            if xs.len() != features.len() {
                return Err(SummaryError::Data(format!(
                    "row {lineno} has {} cells, expected {}",
                    xs.len(), features.len(),
                )));
            }

            for (feat, x) in features.iter_mut().zip(xs) {
                feat.append(x);
            }

            n_sample += 1;
        }

        let n_feature = features.len();
        let name_to_index = index_names(&features);

        let sample = Self {
            name_to_index, features, target: None, n_sample, n_feature,
        };

        Ok(sample)
    }


    /// Set the feature of name `target` to `self.target`.
    /// The old value assigned to `self.target` will be dropped.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        let pos = self.features.iter()
            .position(|feat| feat.name() == target)
            .ok_or_else(|| {
                SummaryError::Data(
                    format!("the target column `{target}` does not exist")
                )
            })?;


        let target = self.features.remove(pos).into_target();
        self.target = Some(target);
        self.n_feature -= 1;
        self.name_to_index = index_names(&self.features);

        Ok(self)
    }


    /// Returns the target values, if they are given.
    pub fn target(&self) -> Option<&[f64]> {
        self.target.as_deref()
    }


    /// Returns `true` if the target values are given.
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }


    /// Returns a slice of type `Feature`.
    pub fn features(&self) -> &[Feature] {
        &self.features[..]
    }


    /// Returns the feature names in column order.
    pub fn feature_names(&self) -> Vec<&str> {
        self.features.iter()
            .map(|feat| feat.name())
            .collect()
    }


    /// Returns the pair of the number of examples and
    /// the number of features
    pub fn shape(&self) -> (usize, usize) {
        (self.n_sample, self.n_feature)
    }


    /// Returns the `idx`-th instance `x`.
    pub fn at(&self, idx: usize) -> Vec<f64> {
        self.features.iter()
            .map(|feat| feat[idx])
            .collect::<Vec<f64>>()
    }


    /// Returns the feature named `name`, if it exists.
    pub fn get<S: AsRef<str>>(&self, name: S) -> Option<&Feature> {
        self.name_to_index.get(name.as_ref())
            .map(|&k| &self.features[k])
    }
}


fn index_names(features: &[Feature]) -> HashMap<String, usize> {
    features.iter()
        .enumerate()
        .map(|(i, f)| (f.name().to_string(), i))
        .collect::<HashMap<_, _>>()
}


fn parse_row(line: &str, lineno: usize) -> Result<Vec<f64>> {
    line.split(',')
        .map(|x| {
            let x = x.trim();
            x.parse::<f64>()
                .map_err(|_| {
                    SummaryError::Data(
                        format!("cannot parse `{x}` as a number (row {lineno})")
                    )
                })
        })
        .collect()
}


impl<S> Index<S> for Sample
    where S: AsRef<str>
{
    type Output = Feature;


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = self.name_to_index[name];
        &self.features[k]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> (DataFrame, Series) {
        let s1 = Series::new("x", &[10.0, 14.0, 15.0, 5.0]);
        let s2 = Series::new("y", &[5.0, 8.0, 3.0, 1.0]);
        let df = DataFrame::new(vec![s1, s2]).unwrap();
        let target = Series::new("class", &[1_i64, 1, 0, 0]);
        (df, target)
    }


    #[test]
    fn from_dataframe_keeps_column_order() {
        let (df, target) = toy();
        let sample = Sample::from_dataframe(&df, &target).unwrap();

        assert_eq!(sample.shape(), (4, 2));
        assert_eq!(sample.feature_names(), vec!["x", "y"]);
        assert_eq!(sample.target(), Some(&[1.0, 1.0, 0.0, 0.0][..]));
        assert_eq!(sample.at(1), vec![14.0, 8.0]);
        assert_eq!(sample["y"][3], 1.0);
    }


    #[test]
    fn target_length_must_match() {
        let (df, _) = toy();
        let target = Series::new("class", &[1_i64, 0]);
        let err = Sample::from_dataframe(&df, &target).unwrap_err();
        assert!(matches!(err, SummaryError::InvalidArgument(_)));
    }


    #[test]
    fn features_only_has_no_target() {
        let (df, _) = toy();
        let sample = Sample::from_features(&df).unwrap();
        assert!(!sample.has_target());
        assert!(sample.get("x").is_some());
        assert!(sample.get("z").is_none());
    }


    #[test]
    fn missing_target_column_is_an_error() {
        let (df, _) = toy();
        let err = Sample::from_features(&df).unwrap()
            .set_target("class")
            .unwrap_err();
        assert!(matches!(err, SummaryError::Data(_)));
    }
}
