//! Image downloads.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::services::MediaFetcher;

/// Fetches media URLs with the shared HTTP client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MediaFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::transport(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}
