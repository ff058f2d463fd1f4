mod pipeline;
mod types;

pub use pipeline::{Fetcher, check_body_size, validate_headers};
pub use types::{FetchFailure, FetchOptions, FetchOutcome, SkipReason};
