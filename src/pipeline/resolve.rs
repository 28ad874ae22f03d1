// src/pipeline/resolve.rs

//! Image resolution.
//!
//! Scans the selected records in order and stops at the first image that
//! downloads, stages, and posts. Download and staging failures only skip
//! the candidate at hand.

use crate::models::{ImageConfig, PostedStatus};
use crate::pipeline::publish::{PublishOutcome, Publisher};
use crate::pipeline::select::Selection;
use crate::pipeline::stage::stage_image;
use crate::services::MediaFetcher;

/// Outcome of scanning one result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Posted(PostedStatus),

    /// Posting failed; nothing further is attempted
    Failed(String),

    /// No record yielded a usable image
    Exhausted,
}

/// Walk records and media in order until one image is published.
pub async fn resolve_image(
    selection: &Selection,
    fetcher: &dyn MediaFetcher,
    publisher: &Publisher<'_>,
    image: &ImageConfig,
    free_license: &str,
) -> Resolution {
    for record in selection.result.rows() {
        let Some(title) = record.title() else {
            log::debug!("Skipping record {} without title", record.id);
            continue;
        };

        if record.access() != Some(free_license) {
            log::debug!(
                "Skipping {} ({}): access {:?}",
                record.id,
                title,
                record.access()
            );
            continue;
        }

        for medium in record.media() {
            let Some(url) = medium.url() else {
                continue;
            };

            let bytes = match fetcher.fetch(url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Failed to download image {}: {}", url, e);
                    continue;
                }
            };

            let Some(staged) = stage_image(&bytes, url, image).await else {
                continue;
            };
            log::info!("Going to post {} with image from {}", title, url);

            match publisher.publish(record, &selection.unit_code, &staged).await {
                PublishOutcome::Posted(status) => return Resolution::Posted(status),
                PublishOutcome::Failed(message) => return Resolution::Failed(message),
                PublishOutcome::NoMediaHandle => continue,
            }
        }
    }

    log::warn!("No images found in any of the responses!");
    Resolution::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaptionConfig;
    use crate::pipeline::testing::{
        MapFetcher, RecordingPoster, catalog, image_config, record, search_result,
    };
    use tempfile::TempDir;

    fn selection(rows: Vec<crate::models::Record>) -> Selection {
        Selection {
            unit_code: "ABC".to_string(),
            result: search_result(rows),
            attempts: 1,
        }
    }

    #[tokio::test]
    async fn test_non_free_record_never_fetched() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MapFetcher::default().with_image("https://img/1", 20, 20);
        let poster = RecordingPoster::default();
        let catalog = catalog(&[("ABC", "A Bee Museum")]);
        let caption = CaptionConfig::default();
        let publisher = Publisher::new(&poster, &catalog, &caption);

        let rows = vec![record("Bee Wing", "CC-BY", &["https://img/1"])];
        let resolution = resolve_image(
            &selection(rows),
            &fetcher,
            &publisher,
            &image_config(tmp.path()),
            "CC0",
        )
        .await;

        assert_eq!(resolution, Resolution::Exhausted);
        assert!(fetcher.calls().is_empty());
        assert!(poster.statuses().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_moves_to_next_candidate() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MapFetcher::default().with_image("https://img/3", 20, 20);
        let poster = RecordingPoster::default();
        let catalog = catalog(&[("ABC", "A Bee Museum")]);
        let caption = CaptionConfig::default();
        let publisher = Publisher::new(&poster, &catalog, &caption);

        let rows = vec![
            record("First", "CC0", &["https://img/1", "https://img/2"]),
            record("Second", "CC0", &["https://img/3"]),
        ];
        let resolution = resolve_image(
            &selection(rows),
            &fetcher,
            &publisher,
            &image_config(tmp.path()),
            "CC0",
        )
        .await;

        assert!(matches!(resolution, Resolution::Posted(_)));
        assert_eq!(
            fetcher.calls(),
            vec!["https://img/1", "https://img/2", "https://img/3"]
        );
        assert!(poster.statuses()[0].status.starts_with("Second\n"));
    }

    #[tokio::test]
    async fn test_untitled_and_urlless_skipped() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MapFetcher::default().with_image("https://img/ok", 20, 20);
        let poster = RecordingPoster::default();
        let catalog = catalog(&[("ABC", "A Bee Museum")]);
        let caption = CaptionConfig::default();
        let publisher = Publisher::new(&poster, &catalog, &caption);

        let rows = vec![
            record("", "CC0", &["https://img/ok"]),
            record("No Url", "CC0", &[""]),
            record("Has Url", "CC0", &["https://img/ok"]),
        ];
        let resolution = resolve_image(
            &selection(rows),
            &fetcher,
            &publisher,
            &image_config(tmp.path()),
            "CC0",
        )
        .await;

        assert!(matches!(resolution, Resolution::Posted(_)));
        assert_eq!(fetcher.calls(), vec!["https://img/ok"]);
        assert!(poster.statuses()[0].status.starts_with("Has Url\n"));
    }

    #[tokio::test]
    async fn test_undecodable_image_tries_next() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MapFetcher::default()
            .with_bytes("https://img/html", b"<html></html>".to_vec())
            .with_image("https://img/png", 20, 20);
        let poster = RecordingPoster::default();
        let catalog = catalog(&[("ABC", "A Bee Museum")]);
        let caption = CaptionConfig::default();
        let publisher = Publisher::new(&poster, &catalog, &caption);

        let rows = vec![record(
            "Bee Wing",
            "CC0",
            &["https://img/html", "https://img/png"],
        )];
        let resolution = resolve_image(
            &selection(rows),
            &fetcher,
            &publisher,
            &image_config(tmp.path()),
            "CC0",
        )
        .await;

        assert!(matches!(resolution, Resolution::Posted(_)));
        assert_eq!(poster.alt_texts().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_media_handle_tries_next_image() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MapFetcher::default().with_image("https://img/1", 20, 20);
        let poster = RecordingPoster {
            media_id: None,
            ..Default::default()
        };
        let catalog = catalog(&[("ABC", "A Bee Museum")]);
        let caption = CaptionConfig::default();
        let publisher = Publisher::new(&poster, &catalog, &caption);

        let rows = vec![
            record("One", "CC0", &["https://img/1"]),
            record("Two", "CC0", &["https://img/1"]),
        ];
        let resolution = resolve_image(
            &selection(rows),
            &fetcher,
            &publisher,
            &image_config(tmp.path()),
            "CC0",
        )
        .await;

        assert_eq!(resolution, Resolution::Exhausted);
        assert_eq!(poster.alt_texts().len(), 2);
    }

    #[tokio::test]
    async fn test_posting_failure_stops_scan() {
        let tmp = TempDir::new().unwrap();
        let fetcher = MapFetcher::default().with_image("https://img/1", 20, 20);
        let poster = RecordingPoster {
            upload_error: Some("503: Service Unavailable".to_string()),
            ..Default::default()
        };
        let catalog = catalog(&[("ABC", "A Bee Museum")]);
        let caption = CaptionConfig::default();
        let publisher = Publisher::new(&poster, &catalog, &caption);

        let rows = vec![
            record("One", "CC0", &["https://img/1"]),
            record("Two", "CC0", &["https://img/1"]),
        ];
        let resolution = resolve_image(
            &selection(rows),
            &fetcher,
            &publisher,
            &image_config(tmp.path()),
            "CC0",
        )
        .await;

        assert!(matches!(resolution, Resolution::Failed(ref m) if m.contains("503")));
        assert_eq!(fetcher.calls().len(), 1);
    }
}
