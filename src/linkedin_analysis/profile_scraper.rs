// src/linkedin_analysis/profile_scraper.rs
use async_trait::async_trait;
use tracing::info;

use super::PageFetcher;
use crate::core::ServiceClient;
use crate::error::ProviderError;
use crate::types::response::{ScrapeRequest, ScrapeResponse};

/// Fetches the text of a company profile page through the scrape API.
pub struct ProfileScraper {
    http: ServiceClient,
    endpoint: String,
    api_key: String,
}

impl ProfileScraper {
    pub fn new(http: ServiceClient, endpoint: String, api_key: String) -> Self {
        Self {
            http,
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl PageFetcher for ProfileScraper {
    async fn fetch_text(&self, url: &str) -> Result<String, ProviderError> {
        info!("Fetching profile page: {}", url);

        let response: ScrapeResponse = self
            .http
            .post_json(
                &self.endpoint,
                "X-API-KEY",
                &self.api_key,
                &ScrapeRequest { url },
            )
            .await?;

        let text = response.text.ok_or(ProviderError::EmptyResponse)?;
        info!(chars = text.len(), "Fetched profile text from {}", url);
        Ok(text)
    }
}
