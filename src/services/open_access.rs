// src/services/open_access.rs

//! Smithsonian Open Access search client.
//!
//! API docs: <https://edan.si.edu/openaccess/apidocs>

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{SearchConfig, SearchResult};
use crate::services::SearchApi;

/// Client for the Open Access `search` endpoint.
#[derive(Clone)]
pub struct OpenAccessClient {
    client: Client,
    api_url: String,
    api_key: String,
    media_filter: String,
}

impl OpenAccessClient {
    pub fn new(client: Client, config: &SearchConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            media_filter: config.media_filter.clone(),
        }
    }

    /// Build the random-sorted query for one unit code.
    pub fn query_url(&self, unit_code: &str) -> Result<Url> {
        let query = format!("{} AND unit_code:{}", self.media_filter, unit_code);
        let url = Url::parse_with_params(
            &self.api_url,
            &[
                ("api_key", self.api_key.as_str()),
                ("sort", "random"),
                ("q", query.as_str()),
            ],
        )?;
        Ok(url)
    }
}

#[async_trait]
impl SearchApi for OpenAccessClient {
    async fn search(&self, unit_code: &str) -> Result<SearchResult> {
        let url = self.query_url(unit_code)?;
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::transport(status));
        }

        Ok(response.json::<SearchResult>().await?)
    }
}
