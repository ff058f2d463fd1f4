mod args;
mod fetch;
mod params;
mod resolved_command;

pub use args::{Args, Command, parse_args};
pub use fetch::{PROMPT, read_url_input, run_fetch};
pub use params::{FetchParams, UrlInput};
pub use resolved_command::resolve_command;
