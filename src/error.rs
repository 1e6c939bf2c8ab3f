//! Defines the error type shared by every module of this crate.
use polars::prelude::PolarsError;
use thiserror::Error;


/// Errors produced while walking a tree or summarizing its fit.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// The tree arrays are inconsistent
    /// (length mismatch, dangling child, unreachable node, ...).
    #[error("malformed tree: {0}")]
    Structure(String),

    /// The caller passed an unusable combination of arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The data could not be interpreted (null cell, bad CSV value, ...).
    #[error("invalid data: {0}")]
    Data(String),

    /// Reading a file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// An operation on a polars frame failed.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// A JSON document could not be (de)serialized.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}


/// Result type used throughout this crate.
pub type Result<T> = std::result::Result<T, SummaryError>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_the_message() {
        let err = SummaryError::Structure("node 3 is reached twice".into());
        assert_eq!(err.to_string(), "malformed tree: node 3 is reached twice");

        let err = SummaryError::InvalidArgument("missing labels".into());
        assert!(err.to_string().contains("invalid argument"));
        assert!(err.to_string().contains("missing labels"));
    }


    #[test]
    fn io_errors_convert() {
        fn open() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here.csv")?)
        }
        assert!(matches!(open(), Err(SummaryError::Io(_))));
    }
}
