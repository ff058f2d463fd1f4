use crate::config::Config;
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub max_content_length: u64,
    pub default_filename: String,
    pub enforce_body_limit: bool,
}

impl From<&Config> for FetchOptions {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.timeout(),
            max_content_length: config.max_content_length,
            default_filename: config.default_filename.clone(),
            enforce_body_limit: config.enforce_body_limit,
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

/// Terminal state of processing a single URL.
#[derive(Debug)]
pub enum FetchOutcome {
    Saved { path: PathBuf },
    Skipped(SkipReason),
    Failed(FetchFailure),
}

impl FetchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// `content_type` is `None` when the response carried no usable header.
    NotAnImage { content_type: Option<String> },
    /// `size` is the declared length, or the bytes received when the body
    /// limit is enforced.
    TooLarge { size: u64, limit: u64 },
    Duplicate { existing: PathBuf },
}

#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("{status}")]
    Http { status: StatusCode },

    #[error("Connection problem: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("{0:#}")]
    Unexpected(#[from] eyre::Report),
}
