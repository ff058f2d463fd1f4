use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Default)]
pub struct Command {
    pub urls: Vec<String>,
    pub output_dir: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_content_length: Option<u64>,
    pub enforce_body_limit: bool,
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "imgfetch",
    version,
    about = "Fetch images from URLs into a local directory, skipping non-images and duplicates"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(
        value_name = "URLS",
        help = "Image URLs to fetch (comma-separated values allowed); prompts when omitted"
    )]
    urls: Vec<String>,

    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Directory that receives fetched images (default: Fetched_Images)"
    )]
    output_dir: Option<String>,

    #[arg(
        long = "timeout",
        value_name = "SECS",
        help = "Total timeout for each request, in seconds (default: 10)"
    )]
    timeout: Option<u64>,

    #[arg(
        long = "max-size",
        value_name = "BYTES",
        help = "Largest accepted Content-Length, in bytes (default: 5000000)"
    )]
    max_size: Option<u64>,

    #[arg(
        long = "enforce-size-limit",
        help = "Also apply the size limit to the bytes actually received"
    )]
    enforce_size_limit: bool,
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    // Status lines own stdout; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    let command = Command {
        urls: cli.urls,
        output_dir: cli.output_dir,
        timeout_secs: cli.timeout,
        max_content_length: cli.max_size,
        enforce_body_limit: cli.enforce_size_limit,
    };

    Args { command, log_level }
}
