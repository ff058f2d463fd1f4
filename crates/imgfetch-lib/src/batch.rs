use crate::fetch::{FetchOutcome, Fetcher};

/// Something that carries a single URL to a terminal state.
#[allow(async_fn_in_trait)]
pub trait UrlProcessor {
    async fn process(&mut self, url: &str) -> FetchOutcome;
}

impl UrlProcessor for Fetcher {
    async fn process(&mut self, url: &str) -> FetchOutcome {
        self.fetch(url).await
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &FetchOutcome) {
        match outcome {
            FetchOutcome::Saved { .. } => self.saved += 1,
            FetchOutcome::Skipped(_) => self.skipped += 1,
            FetchOutcome::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.saved + self.skipped + self.failed
    }
}

/// Splits comma-separated input into trimmed, non-empty URLs, keeping order.
pub fn split_urls(input: &str) -> Vec<&str> {
    input
        .split(',')
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .collect()
}

/// Processes every URL in `input` one after another. `on_outcome` sees each
/// outcome as soon as its URL is finished.
pub async fn run_batch<P, F>(input: &str, processor: &mut P, mut on_outcome: F) -> BatchSummary
where
    P: UrlProcessor,
    F: FnMut(&str, &FetchOutcome),
{
    let urls = split_urls(input);
    tracing::info!("Processing {} URLs", urls.len());

    let mut summary = BatchSummary::default();
    for url in urls {
        let outcome = processor.process(url).await;
        summary.record(&outcome);
        on_outcome(url, &outcome);
    }

    tracing::info!(
        saved = summary.saved,
        skipped = summary.skipped,
        failed = summary.failed,
        "Batch finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchFailure, SkipReason};
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingProcessor {
        seen: Vec<String>,
    }

    impl UrlProcessor for RecordingProcessor {
        async fn process(&mut self, url: &str) -> FetchOutcome {
            self.seen.push(url.to_string());
            if url.contains("broken") {
                FetchOutcome::Failed(FetchFailure::InvalidUrl {
                    reason: "broken".to_string(),
                })
            } else if url.contains("page") {
                FetchOutcome::Skipped(SkipReason::NotAnImage {
                    content_type: Some("text/html".to_string()),
                })
            } else {
                FetchOutcome::Saved {
                    path: PathBuf::from(url),
                }
            }
        }
    }

    #[test]
    fn test_split_urls_trims_and_drops_empty_entries() {
        assert_eq!(
            split_urls(" https://a.test/1.png ,https://b.test/2.png,, ,https://c.test/3.png "),
            vec![
                "https://a.test/1.png",
                "https://b.test/2.png",
                "https://c.test/3.png"
            ]
        );
    }

    #[test]
    fn test_split_urls_on_blank_input() {
        assert!(split_urls("").is_empty());
        assert!(split_urls("  ,  , ").is_empty());
    }

    #[tokio::test]
    async fn test_run_batch_processes_each_url_once_in_order() {
        let mut processor = RecordingProcessor::default();
        let mut reported = Vec::new();

        let summary = run_batch(
            "https://a.test/1.png, https://a.test/1.png ,,https://c.test/3.png",
            &mut processor,
            |url, _| reported.push(url.to_string()),
        )
        .await;

        let expected = vec![
            "https://a.test/1.png".to_string(),
            "https://a.test/1.png".to_string(),
            "https://c.test/3.png".to_string(),
        ];
        assert_eq!(processor.seen, expected);
        assert_eq!(reported, expected);
        assert_eq!(summary.total(), 3);
    }

    #[tokio::test]
    async fn test_run_batch_continues_after_failures() {
        let mut processor = RecordingProcessor::default();
        let mut outcomes = Vec::new();

        let summary = run_batch(
            "https://a.test/1.png,https://broken.test/x,https://c.test/page,https://d.test/4.png",
            &mut processor,
            |_, outcome| {
                outcomes.push((outcome.is_saved(), outcome.is_skipped(), outcome.is_failed()))
            },
        )
        .await;

        assert_eq!(
            outcomes,
            vec![
                (true, false, false),
                (false, false, true),
                (false, true, false),
                (true, false, false),
            ]
        );
        assert_eq!(
            summary,
            BatchSummary {
                saved: 2,
                skipped: 1,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_run_batch_with_no_urls() {
        let mut processor = RecordingProcessor::default();
        let summary = run_batch(" , ", &mut processor, |_, _| {}).await;

        assert!(processor.seen.is_empty());
        assert_eq!(summary, BatchSummary::default());
    }
}
