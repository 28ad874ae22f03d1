//! Fakes and fixtures shared by the pipeline tests.

use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

use crate::error::{AppError, Result};
use crate::models::{
    Content, Descriptive, ImageConfig, MediaCandidate, MetadataUsage, OnlineMedia, PostedStatus,
    Record, ResponseBody, STATUS_OK, SearchResult, StagedImage, UnitCatalog,
};
use crate::services::{MediaFetcher, NewStatus, Poster, SearchApi};

pub fn catalog(pairs: &[(&str, &str)]) -> UnitCatalog {
    UnitCatalog::new(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
    .unwrap()
}

/// Record with an access flag and one media candidate per URL.
pub fn record(title: &str, access: &str, urls: &[&str]) -> Record {
    Record {
        id: format!("edanmdm-{title}"),
        title: Some(title.to_string()),
        unit_code: None,
        content: Some(Content {
            descriptive_non_repeating: Some(Descriptive {
                metadata_usage: Some(MetadataUsage {
                    access: Some(access.to_string()),
                }),
                online_media: Some(OnlineMedia {
                    media: Some(
                        urls.iter()
                            .map(|u| MediaCandidate {
                                content: Some(u.to_string()),
                                media_type: Some("Images".to_string()),
                                ids_id: None,
                            })
                            .collect(),
                    ),
                }),
                ..Default::default()
            }),
            ..Default::default()
        }),
    }
}

pub fn search_result(rows: Vec<Record>) -> SearchResult {
    SearchResult {
        status: Some(STATUS_OK),
        response: Some(ResponseBody {
            row_count: rows.len() as u64,
            rows,
            message: None,
        }),
    }
}

pub fn empty_result() -> SearchResult {
    search_result(Vec::new())
}

pub fn api_error(status: i64, message: &str) -> SearchResult {
    SearchResult {
        status: Some(status),
        response: Some(ResponseBody {
            message: Some(message.to_string()),
            ..Default::default()
        }),
    }
}

/// Small limits so tests can exercise resizing with tiny images.
pub fn image_config(dir: &Path) -> ImageConfig {
    ImageConfig {
        staging_path: dir.join("staged_image"),
        max_bytes: 10 * 1_048_576,
        max_pixels: 10_000,
        resize_target: 100,
    }
}

/// Encode a gradient image of the given size.
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

pub fn staged_image() -> StagedImage {
    StagedImage {
        path: PathBuf::from("/tmp/staged_image"),
        format: ImageFormat::Png,
        width: 20,
        height: 20,
        byte_len: 100,
        resized: false,
        rewritten: false,
    }
}

/// Search backend that replays queued responses.
pub struct ScriptedSearch {
    responses: Mutex<VecDeque<Result<SearchResult>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSearch {
    pub fn new(responses: Vec<Result<SearchResult>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchApi for ScriptedSearch {
    async fn search(&self, unit_code: &str) -> Result<SearchResult> {
        self.calls.lock().unwrap().push(unit_code.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(empty_result()))
    }
}

/// Fetcher serving fixed bodies; unknown URLs fail with 404.
#[derive(Default)]
pub struct MapFetcher {
    bodies: HashMap<String, Vec<u8>>,
    calls: Mutex<Vec<String>>,
}

impl MapFetcher {
    pub fn with_bytes(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.bodies.insert(url.to_string(), bytes);
        self
    }

    pub fn with_image(self, url: &str, width: u32, height: u32) -> Self {
        self.with_bytes(url, image_bytes(width, height, ImageFormat::Png))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaFetcher for MapFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Transport {
                status: 404,
                reason: "Not Found".to_string(),
            })
    }
}

/// Poster that records what it was asked to publish.
pub struct RecordingPoster {
    pub media_id: Option<String>,
    pub upload_error: Option<String>,
    pub(crate) alt_texts: Mutex<Vec<String>>,
    pub(crate) statuses: Mutex<Vec<NewStatus>>,
}

impl Default for RecordingPoster {
    fn default() -> Self {
        Self {
            media_id: Some("media-1".to_string()),
            upload_error: None,
            alt_texts: Mutex::new(Vec::new()),
            statuses: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingPoster {
    pub fn alt_texts(&self) -> Vec<String> {
        self.alt_texts.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<NewStatus> {
        self.statuses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Poster for RecordingPoster {
    async fn upload_media(
        &self,
        _image: &StagedImage,
        description: &str,
    ) -> Result<Option<String>> {
        self.alt_texts.lock().unwrap().push(description.to_string());
        if let Some(message) = &self.upload_error {
            return Err(AppError::posting(message));
        }
        Ok(self.media_id.clone())
    }

    async fn post_status(&self, status: &NewStatus) -> Result<PostedStatus> {
        self.statuses.lock().unwrap().push(status.clone());
        let id = format!("11{}", self.statuses.lock().unwrap().len());
        Ok(PostedStatus {
            url: Some(format!("https://botsin.space/@smithsonian/{id}")),
            id,
        })
    }
}
