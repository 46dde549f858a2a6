// src/core/service_client.rs
//! Unified HTTP client for the third-party JSON APIs

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::ProviderError;

const MAX_ERROR_BODY_CHARS: usize = 500;

/// Thin wrapper around a `reqwest::Client` with a bounded timeout.
#[derive(Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
}

impl ServiceClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// POST `payload` as JSON with an API key header and decode the JSON reply.
    pub async fn post_json<T, R>(
        &self,
        url: &str,
        key_header: &str,
        api_key: &str,
        payload: &T,
    ) -> Result<R, ProviderError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(key_header, api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        trace!("Response status: {}", status);

        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str::<R>(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
