// src/linkedin_analysis/company_extractor.rs
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use super::{
    output_parser, prompts, GeminiClient, PageFetcher, ProfileScraper, SearchClient,
    SearchProvider, TextGenerator,
};
use crate::core::{ConfigManager, ServiceClient};
use crate::error::{ExtractionError, Service};
use crate::types::{CompanyProfile, CompanyRecord};

/// Runs one query through search, scrape, prompt, LLM call and parse.
pub struct CompanyExtractor {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    llm: Arc<dyn TextGenerator>,
}

impl CompanyExtractor {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        llm: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            search,
            fetcher,
            llm,
        }
    }

    /// Wire the real HTTP clients from configuration
    pub fn from_config(config: &ConfigManager, llm: Arc<dyn TextGenerator>) -> Result<Self> {
        let http = ServiceClient::new(config.service.http_timeout())?;

        let search = SearchClient::new(
            http.clone(),
            config.service.search_url.clone(),
            config.secrets.serper_api_key.clone(),
        );
        let fetcher = ProfileScraper::new(
            http,
            config.service.scrape_url.clone(),
            config.secrets.serper_api_key.clone(),
        );

        Ok(Self::new(Arc::new(search), Arc::new(fetcher), llm))
    }

    /// Build the shared Gemini client used by both pipelines
    pub fn llm_from_config(config: &ConfigManager) -> Result<Arc<dyn TextGenerator>> {
        let http = ServiceClient::new(config.service.llm_timeout())?;
        Ok(Arc::new(GeminiClient::new(
            http,
            config.service.gemini_base_url.clone(),
            config.secrets.gemini_api_key.clone(),
            config.service.model.clone(),
            config.service.thinking_budget,
        )))
    }

    /// Always returns a record; failures become error records that keep the
    /// best known `linkedin_url`.
    pub async fn extract(&self, query: &str) -> CompanyRecord {
        info!(query, "Starting company extraction");

        let hits = match self.search.search(query).await {
            Ok(hits) => hits,
            Err(e) => {
                return CompanyRecord::failed(
                    query,
                    ExtractionError::provider(Service::Search, e),
                    None,
                );
            }
        };

        // Only the top hit is used
        let Some(top) = hits.into_iter().next() else {
            info!(query, "No search results");
            return CompanyRecord::failed(query, ExtractionError::NoSearchResults, None);
        };

        let context = match self.fetcher.fetch_text(&top.url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(query, url = %top.url, "Scraping failed, continuing without context: {}", e);
                String::new()
            }
        };
        info!(query, "Extracting company data from: {}", top.url);

        let prompt = prompts::company_extraction_prompt(&context, &top.title, &top.snippet);

        let completion = match self.llm.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                return CompanyRecord::failed(
                    query,
                    ExtractionError::provider(Service::Llm, e),
                    Some(top.url),
                );
            }
        };

        match output_parser::extract_json_object(&completion) {
            Ok(object) => {
                let profile = CompanyProfile::from_json_object(&object);
                info!(query, company = %profile.company_name, "Company extraction completed");
                CompanyRecord::extracted(query, profile, top.url)
            }
            Err(failure) => CompanyRecord::failed(query, failure.into(), Some(top.url)),
        }
    }
}
