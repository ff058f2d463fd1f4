use super::Config;
use super::model::{
    DEFAULT_FILENAME, DEFAULT_MAX_CONTENT_LENGTH, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS,
};
use crate::error::ImgFetchError;
use config::{Config as ConfigBuilder, Environment};

pub const ENV_PREFIX: &str = "IMGFETCH";

/// Values taken from the command line. `None` leaves the lower layers in place.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub output_dir: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_content_length: Option<u64>,
    pub enforce_body_limit: Option<bool>,
}

/// Layers built-in defaults, the given environment (normally
/// `Environment::with_prefix(ENV_PREFIX)`) and command-line overrides, in
/// that order.
pub fn load_config(
    overrides: ConfigOverrides,
    environment: Environment,
) -> Result<Config, ImgFetchError> {
    let config_builder = ConfigBuilder::builder()
        .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
        .set_default("timeout_secs", DEFAULT_TIMEOUT_SECS)?
        .set_default("max_content_length", DEFAULT_MAX_CONTENT_LENGTH)?
        .set_default("default_filename", DEFAULT_FILENAME)?
        .set_default("enforce_body_limit", false)?
        .add_source(environment.try_parsing(true))
        .set_override_option("output_dir", overrides.output_dir)?
        .set_override_option("timeout_secs", overrides.timeout_secs)?
        .set_override_option("max_content_length", overrides.max_content_length)?
        .set_override_option("enforce_body_limit", overrides.enforce_body_limit)?
        .build()?;

    let config: Config = config_builder.try_deserialize()?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ImgFetchError> {
    if config.timeout_secs == 0 {
        return Err(ImgFetchError::ConfigValidation {
            details: "timeout_secs must be greater than 0.".to_string(),
        });
    }
    if config.max_content_length == 0 {
        return Err(ImgFetchError::ConfigValidation {
            details: "max_content_length must be greater than 0.".to_string(),
        });
    }
    if config.default_filename.is_empty()
        || config.default_filename.contains(['/', '\\'])
        || config.default_filename == "."
        || config.default_filename == ".."
    {
        return Err(ImgFetchError::ConfigValidation {
            details: format!(
                "default_filename must be a plain file name, got {:?}.",
                config.default_filename
            ),
        });
    }
    Ok(())
}
