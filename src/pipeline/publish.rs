// src/pipeline/publish.rs

//! Caption the staged image and post it.

use crate::error::{AppError, Result};
use crate::models::{CaptionConfig, PostedStatus, Record, StagedImage, UnitCatalog};
use crate::pipeline::caption::{Caption, compose_caption};
use crate::services::{NewStatus, Poster};

/// Result of one publish attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The status is live
    Posted(PostedStatus),

    /// Upload returned no media id; the caller may try the next image
    NoMediaHandle,

    /// Posting failed; carries the error text
    Failed(String),
}

/// Posts staged images with their captions.
pub struct Publisher<'a> {
    poster: &'a dyn Poster,
    catalog: &'a UnitCatalog,
    config: &'a CaptionConfig,
}

impl<'a> Publisher<'a> {
    pub fn new(
        poster: &'a dyn Poster,
        catalog: &'a UnitCatalog,
        config: &'a CaptionConfig,
    ) -> Self {
        Self {
            poster,
            catalog,
            config,
        }
    }

    /// Publish `staged` for `record`. `unit_code` is the code the search
    /// was restricted to, used when the record does not carry its own.
    pub async fn publish(
        &self,
        record: &Record,
        unit_code: &str,
        staged: &StagedImage,
    ) -> PublishOutcome {
        let code = record.unit_code().unwrap_or(unit_code);
        let museum = self.catalog.display_name(code);
        log::info!(
            "ID: {} museum: {} place: {:?} date: {:?} link: {:?}",
            record.id,
            museum,
            record.place(),
            record.date(),
            record.record_link()
        );

        let caption = compose_caption(record, museum, self.config);

        match self.post(&caption, staged).await {
            Ok(Some(status)) => {
                log::info!(
                    "Posted successfully! {} at {}",
                    status.id,
                    status.url.as_deref().unwrap_or("(no url)")
                );
                PublishOutcome::Posted(status)
            }
            Ok(None) => PublishOutcome::NoMediaHandle,
            Err(e) => {
                let e = match e {
                    e @ AppError::Posting(_) => e,
                    other => AppError::posting(other),
                };
                log::error!("{}", e);
                PublishOutcome::Failed(e.to_string())
            }
        }
    }

    async fn post(
        &self,
        caption: &Caption,
        staged: &StagedImage,
    ) -> Result<Option<PostedStatus>> {
        let Some(media_id) = self.poster.upload_media(staged, &caption.alt_text).await? else {
            log::warn!(
                "No ID returned for attempted image upload of {}",
                staged.path.display()
            );
            return Ok(None);
        };
        log::info!("Media upload requested successfully. Media ID: {}", media_id);

        let status = NewStatus {
            status: caption.status.clone(),
            media_ids: vec![media_id],
            visibility: self.config.visibility.clone(),
            language: self.config.language.clone(),
        };
        let posted = self.poster.post_status(&status).await?;
        Ok(Some(posted))
    }
}
