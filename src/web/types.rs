// src/web/types.rs
use rocket::form::FromForm;
use rocket::serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::batch::{BatchDriver, BlogBatch, CompanyBatch};
use crate::blog_generator::BlogGenerator;
use crate::linkedin_analysis::CompanyExtractor;
use crate::types::{ArticleFailure, CompanyRecord};

/// Shared server state, managed by Rocket.
pub struct AppState {
    pub extractor: CompanyExtractor,
    pub blog: BlogGenerator,
    pub driver: BatchDriver,
    /// CSV exports
    pub output_dir: PathBuf,
    /// Blog batch folders and their archives
    pub blog_dir: PathBuf,
}

#[derive(FromForm)]
pub struct CompanyForm {
    pub queries: String,
}

#[derive(FromForm)]
pub struct BlogForm {
    pub titles: String,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct CompanyBatchRequest {
    pub queries: Vec<String>,
}

/// Each entry is `title` or `title | details`.
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct BlogBatchRequest {
    pub titles: Vec<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CompanyBatchData {
    pub records: Vec<CompanyRecord>,
    pub errors: usize,
    pub csv_file: String,
}

impl CompanyBatchData {
    pub fn new(batch: CompanyBatch, csv_file: String) -> Self {
        Self {
            errors: batch.error_count(),
            records: batch.records,
            csv_file,
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ArticleSummary {
    pub title: String,
    pub file_name: String,
    pub preview: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct BlogBatchData {
    /// Folder name of the batch under the blog directory
    pub batch: String,
    pub articles: Vec<ArticleSummary>,
    pub failures: Vec<ArticleFailure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_file: Option<String>,
}

impl BlogBatchData {
    pub fn from_batch(batch: &BlogBatch, preview_chars: usize) -> Self {
        let articles = batch
            .articles
            .iter()
            .map(|article| ArticleSummary {
                title: article.title.clone(),
                file_name: file_name_of(&article.file_path),
                preview: article.preview(preview_chars),
            })
            .collect();

        Self {
            batch: file_name_of(&batch.dir),
            articles,
            failures: batch.failures.clone(),
            archive_file: batch.archive.as_deref().map(file_name_of),
        }
    }
}

fn file_name_of(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

// Request wrapper with conversation_id support
#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardRequest<T> {
    #[serde(flatten)]
    pub data: T,
    pub conversation_id: Option<String>,
}

impl TextResponse {
    pub fn success(message: String, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
            conversation_id,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T, conversation_id: Option<String>) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
            conversation_id,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(
        error: String,
        error_code: String,
        suggestions: Vec<String>,
        conversation_id: Option<String>,
    ) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
            conversation_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;

    #[test]
    fn test_error_envelope() {
        let response = StandardErrorResponse::new(
            "No queries provided".to_string(),
            "EMPTY_INPUT".to_string(),
            vec!["Enter one company per line".to_string()],
            None,
        );
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "error");
        assert_eq!(value["success"], false);
        assert_eq!(value["error_code"], "EMPTY_INPUT");
        assert!(value.get("conversation_id").is_none());
    }

    #[test]
    fn test_company_data_envelope() {
        let batch = CompanyBatch {
            records: vec![CompanyRecord::failed(
                "Unknown Co",
                ExtractionError::NoSearchResults,
                None,
            )],
        };
        let response = DataResponse::success(
            "done".to_string(),
            CompanyBatchData::new(batch, "companies.csv".to_string()),
            Some("conv-1".to_string()),
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["type"], "data");
        assert_eq!(value["data"]["errors"], 1);
        assert_eq!(value["data"]["records"][0]["error"], "No search results found.");
        assert_eq!(value["conversation_id"], "conv-1");
    }

    #[test]
    fn test_request_with_conversation_id() {
        let request: StandardRequest<CompanyBatchRequest> = serde_json::from_str(
            r#"{"queries": ["Stripe"], "conversation_id": "abc"}"#,
        )
        .unwrap();
        assert_eq!(request.data.queries, vec!["Stripe"]);
        assert_eq!(request.conversation_id.as_deref(), Some("abc"));
    }
}
