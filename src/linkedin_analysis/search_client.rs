// src/linkedin_analysis/search_client.rs
use async_trait::async_trait;
use tracing::{info, warn};

use super::SearchProvider;
use crate::core::ServiceClient;
use crate::error::ProviderError;
use crate::types::response::{OrganicResult, SearchRequest, SearchResponse};
use crate::types::SearchHit;

/// Number of organic results kept per query
pub const SEARCH_RESULT_LIMIT: usize = 3;

pub struct SearchClient {
    http: ServiceClient,
    endpoint: String,
    api_key: String,
}

impl SearchClient {
    pub fn new(http: ServiceClient, endpoint: String, api_key: String) -> Self {
        Self {
            http,
            endpoint,
            api_key,
        }
    }

    fn top_hits(response: SearchResponse) -> Vec<SearchHit> {
        response
            .organic
            .into_iter()
            .take(SEARCH_RESULT_LIMIT)
            .map(|OrganicResult { title, snippet, link }| SearchHit {
                title,
                snippet,
                url: link,
            })
            .collect()
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, ProviderError> {
        let response: SearchResponse = self
            .http
            .post_json(
                &self.endpoint,
                "X-API-KEY",
                &self.api_key,
                &SearchRequest { q: query },
            )
            .await
            .inspect_err(|e| warn!(query, "Search API failed: {}", e))?;

        let hits = Self::top_hits(response);
        info!(query, hits = hits.len(), "Search completed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_hits_keeps_first_three_in_order() {
        let response: SearchResponse = serde_json::from_value(json!({
            "organic": [
                {"title": "A", "snippet": "a", "link": "https://a"},
                {"title": "B", "snippet": "b", "link": "https://b"},
                {"title": "C", "snippet": "c", "link": "https://c"},
                {"title": "D", "snippet": "d", "link": "https://d"}
            ]
        }))
        .unwrap();

        let hits = SearchClient::top_hits(response);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].title, "A");
        assert_eq!(hits[0].snippet, "a");
        assert_eq!(hits[0].url, "https://a");
        assert_eq!(hits[2].url, "https://c");
    }

    #[test]
    fn test_top_hits_empty() {
        let response: SearchResponse = serde_json::from_value(json!({"organic": []})).unwrap();
        assert!(SearchClient::top_hits(response).is_empty());
    }
}
