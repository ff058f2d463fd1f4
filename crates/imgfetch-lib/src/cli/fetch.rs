use crate::batch::{BatchSummary, run_batch};
use crate::cli::params::{FetchParams, UrlInput};
use crate::error::ImgFetchError;
use crate::fetch::{FetchOptions, Fetcher};
use crate::report::StatusLine;
use crate::storage::Storage;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const PROMPT: &str = "Enter image URLs (comma-separated): ";

pub async fn run_fetch(params: FetchParams) -> Result<BatchSummary, ImgFetchError> {
    let FetchParams { app_config, input } = params;

    let input = match input {
        UrlInput::Inline(urls) => urls,
        UrlInput::Prompt => {
            read_url_input(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?
        }
    };

    tracing::info!("Saving images to {}", app_config.output_dir.display());
    let storage = Storage::open(&app_config.output_dir)?;
    let mut fetcher = Fetcher::new(storage, FetchOptions::from(&app_config))?;

    let summary = run_batch(&input, &mut fetcher, |url, outcome| {
        println!("{}", StatusLine::new(url, outcome));
    })
    .await;

    Ok(summary)
}

/// Shows the prompt and reads a single line of URLs.
pub async fn read_url_input<R, W>(mut reader: R, mut writer: W) -> Result<String, ImgFetchError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let input_error = |e: std::io::Error| ImgFetchError::Input {
        reason: e.to_string(),
    };

    writer
        .write_all(PROMPT.as_bytes())
        .await
        .map_err(input_error)?;
    writer.flush().await.map_err(input_error)?;

    let mut line = String::new();
    reader.read_line(&mut line).await.map_err(input_error)?;
    Ok(line.trim().to_string())
}
