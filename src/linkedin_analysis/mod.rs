// src/linkedin_analysis/mod.rs
//! Company lookup pipeline: search, scrape, prompt, LLM call, parse

use async_trait::async_trait;

use crate::error::ProviderError;
use crate::types::SearchHit;

pub mod company_extractor;
pub mod gemini_client;
pub mod output_parser;
pub mod profile_scraper;
pub mod prompts;
pub mod search_client;

pub use company_extractor::CompanyExtractor;
pub use gemini_client::GeminiClient;
pub use profile_scraper::ProfileScraper;
pub use search_client::SearchClient;

/// Keyword search returning organic results, best first.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError>;
}

/// Extracts the plain text of a web page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, ProviderError>;
}

/// Hosted text-generation model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
