// src/error.rs
//! Error taxonomy shared by the extraction and blog pipelines

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Which outbound service a provider failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Search,
    Scrape,
    Llm,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::Search => "search API",
            Service::Scrape => "scrape API",
            Service::Llm => "LLM provider",
        };
        f.write_str(name)
    }
}

/// Failure talking to a third-party HTTP API.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response could not be decoded: {0}")]
    Decode(String),

    #[error("response contained no usable content")]
    EmptyResponse,
}

/// Why a completion could not be turned into a JSON object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no fenced JSON block found in model output")]
    NotFound,

    #[error("fenced JSON block is malformed: {0}")]
    Malformed(String),
}

/// Per-query failure carried by an error record.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("No search results found.")]
    NoSearchResults,

    #[error("Failed to parse JSON output: {0}")]
    Parse(#[from] ParseFailure),

    #[error("{service} failure: {source}")]
    Provider {
        service: Service,
        #[source]
        source: ProviderError,
    },
}

impl ExtractionError {
    pub fn provider(service: Service, source: ProviderError) -> Self {
        ExtractionError::Provider { service, source }
    }

    /// Stable machine-readable code, used in CSV and API payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ExtractionError::NoSearchResults => "NO_SEARCH_RESULTS",
            ExtractionError::Parse(ParseFailure::NotFound) => "PARSE_NOT_FOUND",
            ExtractionError::Parse(ParseFailure::Malformed(_)) => "PARSE_MALFORMED",
            ExtractionError::Provider { service: Service::Search, .. } => "SEARCH_FAILED",
            ExtractionError::Provider { service: Service::Scrape, .. } => "SCRAPE_FAILED",
            ExtractionError::Provider { service: Service::Llm, .. } => "LLM_FAILED",
        }
    }
}

impl Serialize for ExtractionError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Startup configuration problems. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required secret {name}: set it in the environment or in .env")]
    MissingSecret { name: &'static str },

    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("failed to load config file {path}: {reason}")]
    File { path: String, reason: String },
}
