use crate::config::Config;

/// Where the comma-separated URL list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlInput {
    Inline(String),
    Prompt,
}

#[derive(Debug, Clone)]
pub struct FetchParams {
    pub app_config: Config,
    pub input: UrlInput,
}
