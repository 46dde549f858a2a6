// src/types/response.rs
//! Wire formats of the search, scrape and Gemini APIs

use serde::{Deserialize, Serialize};

// ===== Search API =====

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub q: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub link: String,
}

// ===== Scrape API =====

#[derive(Debug, Serialize)]
pub struct ScrapeRequest<'a> {
    pub url: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ScrapeResponse {
    pub text: Option<String>,
}

// ===== Gemini generateContent =====

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str, thinking_budget: i32) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget },
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub thinking_config: ThinkingConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: i32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_tolerates_missing_fields() {
        let body = json!({
            "searchParameters": {"q": "Stripe"},
            "organic": [
                {"title": "Stripe | LinkedIn", "link": "https://linkedin.com/company/stripe", "snippet": "Financial services", "position": 1},
                {"title": "No snippet", "link": "https://example.com"}
            ]
        });
        let parsed: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.organic.len(), 2);
        assert_eq!(parsed.organic[0].link, "https://linkedin.com/company/stripe");
        assert_eq!(parsed.organic[1].snippet, "");
    }

    #[test]
    fn test_search_response_without_organic() {
        let parsed: SearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.organic.is_empty());
    }

    #[test]
    fn test_generate_request_shape() {
        let request = GenerateContentRequest::from_prompt("hello", 0);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {"thinkingConfig": {"thinkingBudget": 0}}
            })
        );
    }

    #[test]
    fn test_first_text() {
        let body = json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other"}]}}
            ],
            "usageMetadata": {"totalTokenCount": 12}
        });
        let parsed: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.first_text(), Some("first"));

        let empty: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(empty.first_text(), None);
    }
}
