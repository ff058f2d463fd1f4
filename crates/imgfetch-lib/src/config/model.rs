use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OUTPUT_DIR: &str = "Fetched_Images";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_CONTENT_LENGTH: u64 = 5_000_000;
pub const DEFAULT_FILENAME: &str = "downloaded_image.jpg";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory that receives fetched images and is scanned for duplicates
    pub output_dir: PathBuf,
    /// Total request timeout, in seconds
    pub timeout_secs: u64,
    /// Largest accepted declared body size, in bytes
    pub max_content_length: u64,
    /// Name used when the URL path has no final segment
    pub default_filename: String,
    /// Also apply `max_content_length` to the bytes actually received
    pub enforce_body_limit: bool,
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            default_filename: DEFAULT_FILENAME.to_string(),
            enforce_body_limit: false,
        }
    }
}
