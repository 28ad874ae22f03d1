// src/services/mastodon.rs

//! Mastodon posting client.
//!
//! Uploads go through `POST /api/v2/media`. A `202 Accepted` answer means
//! the instance is still processing the file, and a status referencing it
//! would be rejected, so the client polls `GET /api/v1/media/:id` until
//! the attachment has a URL.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{MastodonConfig, PostedStatus, StagedImage};
use crate::services::{NewStatus, Poster};
use crate::utils::http::join_path;

/// Media attachment returned by `POST /api/v2/media`.
#[derive(Debug, Deserialize)]
struct MediaAttachment {
    #[serde(default)]
    id: Option<String>,

    /// Unset while the instance is still processing the file
    #[serde(default)]
    url: Option<String>,
}

/// Client for a Mastodon instance authenticated with a static token.
#[derive(Clone)]
pub struct MastodonClient {
    client: Client,
    base_url: String,
    access_token: String,
    poll_attempts: u32,
    poll_interval: Duration,
}

impl MastodonClient {
    pub fn new(client: Client, config: &MastodonConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            access_token: config.access_token.clone(),
            poll_attempts: config.media_poll_attempts,
            poll_interval: Duration::from_millis(config.media_poll_interval_ms),
        }
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        if self.access_token.trim().is_empty() {
            return Err(AppError::posting("no access token configured"));
        }
        Ok(request.bearer_auth(&self.access_token))
    }

    /// Turn a non-success response into a posting error carrying the body.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::posting(format!("{status}: {body}")))
    }

    /// Poll an accepted upload until the instance has finished processing it.
    async fn wait_for_media(&self, id: &str) -> Result<()> {
        let url = join_path(&self.base_url, &format!("/api/v1/media/{id}"));

        for poll in 1..=self.poll_attempts {
            tokio::time::sleep(self.poll_interval).await;

            let request = self.client.get(&url);
            let response = Self::check(self.authorized(request)?.send().await?).await?;
            let processing = response.status() == StatusCode::PARTIAL_CONTENT;
            let attachment: MediaAttachment = response.json().await?;

            if !processing && attachment.url.is_some() {
                log::debug!("Media {} ready after {} polls", id, poll);
                return Ok(());
            }
            log::debug!(
                "Media {} still processing ({}/{})",
                id,
                poll,
                self.poll_attempts
            );
        }

        Err(AppError::posting(format!(
            "media {id} still processing after {} checks",
            self.poll_attempts
        )))
    }
}

#[async_trait]
impl Poster for MastodonClient {
    async fn upload_media(
        &self,
        image: &StagedImage,
        description: &str,
    ) -> Result<Option<String>> {
        let bytes = tokio::fs::read(&image.path).await?;
        let part = Part::bytes(bytes)
            .file_name(image.file_name())
            .mime_str(image.mime_type())?;
        let form = Form::new()
            .part("file", part)
            .text("description", description.to_string());

        let request = self
            .client
            .post(join_path(&self.base_url, "/api/v2/media"))
            .multipart(form);
        let response = Self::check(self.authorized(request)?.send().await?).await?;
        let accepted = response.status() == StatusCode::ACCEPTED;

        let attachment: MediaAttachment = response.json().await?;
        let Some(id) = attachment.id.filter(|id| !id.is_empty()) else {
            return Ok(None);
        };

        if accepted || attachment.url.is_none() {
            self.wait_for_media(&id).await?;
        }
        Ok(Some(id))
    }

    async fn post_status(&self, status: &NewStatus) -> Result<PostedStatus> {
        let request = self
            .client
            .post(join_path(&self.base_url, "/api/v1/statuses"))
            .json(status);
        let response = Self::check(self.authorized(request)?.send().await?).await?;

        Ok(response.json::<PostedStatus>().await?)
    }
}

/// Poster that logs what it would publish and posts nothing.
#[derive(Debug, Default, Clone)]
pub struct DryRunPoster;

#[async_trait]
impl Poster for DryRunPoster {
    async fn upload_media(
        &self,
        image: &StagedImage,
        description: &str,
    ) -> Result<Option<String>> {
        log::info!(
            "[dry-run] would upload {} ({}x{}, {}) with alt text:\n{}",
            image.path.display(),
            image.width,
            image.height,
            image.mime_type(),
            description
        );
        Ok(Some("dry-run".to_string()))
    }

    async fn post_status(&self, status: &NewStatus) -> Result<PostedStatus> {
        log::info!(
            "[dry-run] would post ({}, {}):\n{}",
            status.visibility,
            status.language,
            status.status
        );
        Ok(PostedStatus {
            id: "dry-run".to_string(),
            url: None,
        })
    }
}
