use crate::fetch::{FetchFailure, FetchOutcome, SkipReason};
use std::fmt;

/// The console line printed for a URL once it reaches a terminal state.
pub struct StatusLine<'a> {
    pub url: &'a str,
    pub outcome: &'a FetchOutcome,
}

impl<'a> StatusLine<'a> {
    pub fn new(url: &'a str, outcome: &'a FetchOutcome) -> Self {
        Self { url, outcome }
    }
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = self.url;
        match self.outcome {
            FetchOutcome::Saved { path } => write!(f, "Image saved: {}", path.display()),
            FetchOutcome::Skipped(SkipReason::NotAnImage { content_type }) => write!(
                f,
                "Skipping {url} (not an image, Content-Type: {})",
                content_type.as_deref().unwrap_or("unknown")
            ),
            FetchOutcome::Skipped(SkipReason::TooLarge { .. }) => {
                write!(f, "Skipping {url} (file too large)")
            }
            FetchOutcome::Skipped(SkipReason::Duplicate { .. }) => {
                write!(f, "Duplicate image skipped: {url}")
            }
            FetchOutcome::Failed(FetchFailure::InvalidUrl { .. }) => write!(f, "Invalid URL: {url}"),
            FetchOutcome::Failed(FetchFailure::Http { status }) => {
                write!(f, "HTTP error for {url}: {status}")
            }
            FetchOutcome::Failed(FetchFailure::Connection(_)) => {
                write!(f, "Connection problem for {url}")
            }
            FetchOutcome::Failed(FetchFailure::Timeout(_)) => write!(f, "Timeout error for {url}"),
            FetchOutcome::Failed(FetchFailure::Unexpected(report)) => {
                write!(f, "Unexpected error for {url}: {report:#}")
            }
        }
    }
}
