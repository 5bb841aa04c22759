//! Error type shared by the dataset loaders.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while loading, cleaning or querying a dataset
#[derive(Debug, Error)]
pub enum UpliftError {
    #[error("source unavailable: {location}: {message}")]
    SourceUnavailable { location: String, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl UpliftError {
    pub fn source_unavailable(location: impl Into<String>, message: impl ToString) -> Self {
        UpliftError::SourceUnavailable {
            location: location.into(),
            message: message.to_string(),
        }
    }
}

impl From<PolarsError> for UpliftError {
    fn from(err: PolarsError) -> Self {
        UpliftError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, UpliftError>;
