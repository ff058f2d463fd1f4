use url::Url;

/// Returns the final path segment of `url`, or `fallback` when the path is
/// empty or ends in `/`. The segment is used as-is, still percent-encoded.
pub fn derive_filename(url: &Url, fallback: &str) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(fallback)
        .to_string()
}
