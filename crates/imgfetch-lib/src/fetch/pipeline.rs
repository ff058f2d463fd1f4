use super::types::{FetchFailure, FetchOptions, FetchOutcome, SkipReason};
use crate::error::ImgFetchError;
use crate::filename::derive_filename;
use crate::storage::Storage;
use crate::verification::ContentDigest;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE, HeaderMap};
use reqwest::{Client, Response};
use std::path::PathBuf;
use url::Url;

/// Early exit from the stages of a single fetch.
enum Halt {
    Skipped(SkipReason),
    Failed(FetchFailure),
}

impl From<SkipReason> for Halt {
    fn from(reason: SkipReason) -> Self {
        Halt::Skipped(reason)
    }
}

impl From<FetchFailure> for Halt {
    fn from(failure: FetchFailure) -> Self {
        Halt::Failed(failure)
    }
}

impl From<eyre::Report> for Halt {
    fn from(report: eyre::Report) -> Self {
        Halt::Failed(FetchFailure::Unexpected(report))
    }
}

/// Runs one URL through request, validation, deduplication and write.
pub struct Fetcher {
    client: Client,
    storage: Storage,
    options: FetchOptions,
}

impl Fetcher {
    pub fn new(storage: Storage, options: FetchOptions) -> Result<Self, ImgFetchError> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self::with_client(client, storage, options))
    }

    pub fn with_client(client: Client, storage: Storage, options: FetchOptions) -> Self {
        Self {
            client,
            storage,
            options,
        }
    }

    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        match self.run_stages(url).await {
            Ok(path) => FetchOutcome::Saved { path },
            Err(Halt::Skipped(reason)) => {
                tracing::debug!(url = %url, ?reason, "Skipped");
                FetchOutcome::Skipped(reason)
            }
            Err(Halt::Failed(failure)) => {
                tracing::debug!(url = %url, error = %failure, "Failed");
                FetchOutcome::Failed(failure)
            }
        }
    }

    async fn run_stages(&self, raw_url: &str) -> Result<PathBuf, Halt> {
        let url = parse_url(raw_url)?;

        tracing::debug!(url = %url, timeout = ?self.options.timeout, "Requesting");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Http { status }.into());
        }

        tracing::debug!(url = %url, %status, "Validating");
        validate_headers(response.headers(), &self.options)?;
        let body = read_body(response, &self.options).await?;

        let digest = ContentDigest::of_bytes(&body);
        tracing::debug!(url = %url, %digest, size = body.len(), "Deduping");
        if let Some(existing) = self.storage.find_duplicate(&digest).await? {
            tracing::info!(url = %url, existing = %existing.display(), "Content already stored");
            return Err(SkipReason::Duplicate { existing }.into());
        }

        let filename = derive_filename(&url, &self.options.default_filename);
        let path = self.storage.write(&filename, &body).await?;
        tracing::info!(url = %url, path = %path.display(), %digest, "Image written");
        Ok(path)
    }
}

fn parse_url(raw_url: &str) -> Result<Url, FetchFailure> {
    let url = Url::parse(raw_url).map_err(|e| FetchFailure::InvalidUrl {
        reason: e.to_string(),
    })?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(FetchFailure::InvalidUrl {
            reason: "URL has no host".to_string(),
        });
    }
    Ok(url)
}

fn classify_transport_error(err: reqwest::Error) -> FetchFailure {
    if err.is_builder() {
        FetchFailure::InvalidUrl {
            reason: err.to_string(),
        }
    } else if err.is_timeout() {
        FetchFailure::Timeout(err)
    } else if err.is_connect() || err.is_request() || err.is_body() {
        FetchFailure::Connection(err)
    } else {
        FetchFailure::Unexpected(eyre::Report::new(err))
    }
}

/// Checks the declared content type and length before the body is read.
///
/// A missing or unparsable `Content-Length` passes; only a declared size
/// above the ceiling is rejected here.
pub fn validate_headers(headers: &HeaderMap, options: &FetchOptions) -> Result<(), SkipReason> {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok());

    let is_image = content_type
        .is_some_and(|value| value.trim_start().to_ascii_lowercase().starts_with("image/"));
    if !is_image {
        return Err(SkipReason::NotAnImage {
            content_type: content_type.map(str::to_string),
        });
    }

    let declared_length = headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    match declared_length {
        Some(size) if size > options.max_content_length => Err(SkipReason::TooLarge {
            size,
            limit: options.max_content_length,
        }),
        _ => Ok(()),
    }
}

/// Rejects a body once more than the ceiling has been received. Only applied
/// when `enforce_body_limit` is set.
pub fn check_body_size(received: u64, options: &FetchOptions) -> Result<(), SkipReason> {
    if options.enforce_body_limit && received > options.max_content_length {
        Err(SkipReason::TooLarge {
            size: received,
            limit: options.max_content_length,
        })
    } else {
        Ok(())
    }
}

async fn read_body(mut response: Response, options: &FetchOptions) -> Result<Vec<u8>, Halt> {
    if !options.enforce_body_limit {
        let bytes = response.bytes().await.map_err(classify_transport_error)?;
        return Ok(bytes.to_vec());
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(classify_transport_error)? {
        body.extend_from_slice(&chunk);
        check_body_size(body.len() as u64, options)?;
    }
    Ok(body)
}
