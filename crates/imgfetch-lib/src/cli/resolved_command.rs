use crate::cli::args::Command;
use crate::cli::params::{FetchParams, UrlInput};
use crate::config::{ConfigOverrides, ENV_PREFIX, load_config};
use crate::error::ImgFetchError;
use config::Environment;

pub fn resolve_command(command: Command) -> Result<FetchParams, ImgFetchError> {
    resolve_command_with_env(command, Environment::with_prefix(ENV_PREFIX))
}

fn resolve_command_with_env(
    command: Command,
    environment: Environment,
) -> Result<FetchParams, ImgFetchError> {
    let Command {
        urls,
        output_dir,
        timeout_secs,
        max_content_length,
        enforce_body_limit,
    } = command;

    let app_config = load_config(
        ConfigOverrides {
            output_dir,
            timeout_secs,
            max_content_length,
            // The flag can only switch enforcement on.
            enforce_body_limit: enforce_body_limit.then_some(true),
        },
        environment,
    )?;

    let input = if urls.is_empty() {
        UrlInput::Prompt
    } else {
        UrlInput::Inline(urls.join(","))
    };

    Ok(FetchParams { app_config, input })
}
