// src/services/mod.rs

//! Outbound service clients.
//!
//! - [`OpenAccessClient`]: Smithsonian Open Access search
//! - [`HttpFetcher`]: plain image downloads
//! - [`MastodonClient`]: media upload and status posting
//!
//! The pipeline only sees the traits below, so tests can swap in fakes.

pub mod fetch;
pub mod mastodon;
pub mod open_access;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;
use crate::models::{PostedStatus, SearchResult, StagedImage};

pub use fetch::HttpFetcher;
pub use mastodon::{DryRunPoster, MastodonClient};
pub use open_access::OpenAccessClient;

/// Search backend queried once per attempted unit code.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Run one random-sorted image search restricted to `unit_code`.
    ///
    /// A non-success HTTP status is an `AppError::Transport`. The embedded
    /// API status is left for the caller to inspect.
    async fn search(&self, unit_code: &str) -> Result<SearchResult>;
}

/// Downloads raw image bytes.
#[async_trait]
pub trait MediaFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// A status ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStatus {
    pub status: String,
    pub media_ids: Vec<String>,
    pub visibility: String,
    pub language: String,
}

/// Posting service.
#[async_trait]
pub trait Poster: Send + Sync {
    /// Upload the staged file. `Ok(None)` means the service answered
    /// without a media id.
    async fn upload_media(&self, image: &StagedImage, description: &str)
    -> Result<Option<String>>;

    async fn post_status(&self, status: &NewStatus) -> Result<PostedStatus>;
}
