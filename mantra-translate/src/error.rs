//! Error types for mantra-translate

use mantra_core::Error as CoreError;
use thiserror::Error;

/// Translation errors
#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<TranslateError> for CoreError {
    fn from(err: TranslateError) -> Self {
        CoreError::Translation(err.to_string())
    }
}
