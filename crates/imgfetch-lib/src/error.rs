use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImgFetchError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {details}")]
    ConfigValidation { details: String },

    #[error("Failed to read URL input: {reason}")]
    Input { reason: String },

    #[error("Output directory creation failed at {path}: {reason}")]
    OutputDirectoryCreation { path: PathBuf, reason: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(#[from] eyre::Report),
}
