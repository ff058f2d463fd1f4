mod loader;
mod model;

pub use loader::{ConfigOverrides, ENV_PREFIX, load_config};
pub use model::{
    Config, DEFAULT_FILENAME, DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS,
};
