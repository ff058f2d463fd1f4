pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod filename;
pub mod report;
pub mod storage;
pub mod verification;

pub use config::Config;
pub use error::ImgFetchError;
