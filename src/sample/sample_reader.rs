use std::path::Path;

use crate::{Result, SummaryError};
use super::sample_struct::Sample;


/// A struct that returns [`Sample`].
/// Using this struct, one can read a CSV file to [`Sample`].
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use tree_summary::SampleReader;
///
/// let filename = "/path/to/csv/file.csv";
/// let sample = SampleReader::new()
///     .file(filename)
///     .has_header(true)
///     .target_feature("class")
///     .read()?;
/// # Ok::<(), tree_summary::SummaryError>(())
/// ```
pub struct SampleReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
}


impl<P, S> SampleReader<P, S> {
    /// Construct a new instance of [`SampleReader`].
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: false,
            target: None,
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `false.`
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }
}


impl<P, S> Default for SampleReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> SampleReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for target label.
    /// If no target is set, the resulting [`Sample`] holds features only.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}



impl<P, S> SampleReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments,
    /// and returns `tree_summary::Result<Sample>`.
    /// This method consumes `self.`
    pub fn read(self) -> Result<Sample> {
        let file = self.file
            .ok_or_else(|| {
                SummaryError::InvalidArgument(
                    "the file name is not set. Use `SampleReader::file`."
                        .into()
                )
            })?;

        let sample = Sample::from_csv(file, self.has_header)?;
        match self.target {
            Some(target) => sample.set_target(target),
            None => Ok(sample),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("tree_summary_{name}_{}.csv", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }


    #[test]
    fn reads_header_and_target() {
        let path = write_csv(
            "reader",
            "x,y,class\n1.0,2.0,0\n3.0,4.0,1\n5.0,6.0,1\n",
        );
        let sample = SampleReader::new()
            .file(&path)
            .has_header(true)
            .target_feature("class")
            .read()
            .unwrap();

        assert_eq!(sample.shape(), (3, 2));
        assert_eq!(sample.feature_names(), vec!["x", "y"]);
        assert_eq!(sample.target(), Some(&[0.0, 1.0, 1.0][..]));
        std::fs::remove_file(path).unwrap();
    }


    #[test]
    fn dummy_names_without_header() {
        let path = write_csv("noheader", "1.0,2.0\n3.0,4.0\n");
        let sample = SampleReader::<_, &str>::new()
            .file(&path)
            .read()
            .unwrap();

        assert_eq!(sample.feature_names(), vec!["Feat. [1]", "Feat. [2]"]);
        assert!(!sample.has_target());
        std::fs::remove_file(path).unwrap();
    }


    #[test]
    fn unparsable_cell_is_reported() {
        let path = write_csv("badcell", "x,y\n1.0,abc\n");
        let err = SampleReader::<_, &str>::new()
            .file(&path)
            .has_header(true)
            .read()
            .unwrap_err();
        assert!(matches!(err, SummaryError::Data(_)));
        std::fs::remove_file(path).unwrap();
    }


    #[test]
    fn missing_file_name() {
        let err = SampleReader::<&str, &str>::new().read().unwrap_err();
        assert!(matches!(err, SummaryError::InvalidArgument(_)));
    }
}
