// src/linkedin_analysis/gemini_client.rs
use async_trait::async_trait;
use tracing::{error, info};

use super::TextGenerator;
use crate::core::ServiceClient;
use crate::error::ProviderError;
use crate::types::response::{GenerateContentRequest, GenerateContentResponse};

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: ServiceClient,
    base_url: String,
    api_key: String,
    model: String,
    thinking_budget: i32,
}

impl GeminiClient {
    pub fn new(
        http: ServiceClient,
        base_url: String,
        api_key: String,
        model: String,
        thinking_budget: i32,
    ) -> Self {
        Self {
            http,
            base_url,
            api_key,
            model,
            thinking_budget,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Send one prompt and return the first candidate's text.
    /// `thinking_budget` is passed to the provider unchanged.
    pub async fn generate_content(
        &self,
        prompt: &str,
        model: &str,
        thinking_budget: i32,
    ) -> Result<String, ProviderError> {
        info!(model, thinking_budget, "Sending request to Gemini");

        let request = GenerateContentRequest::from_prompt(prompt, thinking_budget);
        let response: GenerateContentResponse = self
            .http
            .post_json(&self.endpoint(model), "x-goog-api-key", &self.api_key, &request)
            .await
            .inspect_err(|e| error!("Gemini request failed: {}", e))?;

        let text = response
            .first_text()
            .ok_or(ProviderError::EmptyResponse)?
            .to_string();

        info!(chars = text.len(), "Received completion from Gemini");
        Ok(text)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.generate_content(prompt, &self.model, self.thinking_budget)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(
            ServiceClient::new(Duration::from_secs(1)).unwrap(),
            "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            "key".to_string(),
            "gemini-2.5-flash".to_string(),
            0,
        );
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
