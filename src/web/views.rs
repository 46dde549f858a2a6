// src/web/views.rs
//! Server-rendered HTML pages, see `templates/`

use askama::Template;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use tracing::error;

use crate::batch::CompanyBatch;
use crate::types::{CompanyRecord, NOT_AVAILABLE};
use crate::web::types::BlogBatchData;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate;

/// One table row of the company results page.
pub struct CompanyRow {
    pub query: String,
    pub values: Vec<String>,
    pub error: Option<String>,
    pub linkedin_url: Option<String>,
}

impl From<&CompanyRecord> for CompanyRow {
    fn from(record: &CompanyRecord) -> Self {
        Self {
            query: record.query().to_string(),
            values: record
                .profile()
                .map(|profile| profile.values().iter().map(|v| v.to_string()).collect())
                .unwrap_or_default(),
            error: record.error().map(|e| e.to_string()),
            linkedin_url: record.linkedin_url().map(str::to_string),
        }
    }
}

#[derive(Template)]
#[template(path = "companies.html")]
pub struct CompanyResultsTemplate<'a> {
    pub rows: Vec<CompanyRow>,
    pub errors: usize,
    pub csv_file: &'a str,
    pub not_available: &'static str,
}

impl<'a> CompanyResultsTemplate<'a> {
    pub fn new(batch: &CompanyBatch, csv_file: &'a str) -> Self {
        Self {
            rows: batch.records.iter().map(CompanyRow::from).collect(),
            errors: batch.error_count(),
            csv_file,
            not_available: NOT_AVAILABLE,
        }
    }
}

#[derive(Template)]
#[template(path = "blog.html")]
pub struct BlogResultsTemplate<'a> {
    pub data: &'a BlogBatchData,
}

/// Full text of one generated article.
#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate<'a> {
    pub batch: &'a str,
    pub file_name: &'a str,
    pub body: &'a str,
}

#[derive(Template)]
#[template(path = "message.html")]
pub struct MessageTemplate<'a> {
    pub title: &'a str,
    pub message: &'a str,
}

/// Render a page, mapping template failures to a 500.
pub fn render<T: Template>(template: &T) -> Result<RawHtml<String>, Status> {
    template.render().map(RawHtml).map_err(|e| {
        error!("Failed to render page: {}", e);
        Status::InternalServerError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::types::{ArticleFailure, CompanyProfile};
    use crate::web::types::ArticleSummary;

    #[test]
    fn test_index_has_both_forms() {
        let page = IndexTemplate.render().unwrap();
        assert!(page.contains("action=\"/companies\""));
        assert!(page.contains("name=\"queries\""));
        assert!(page.contains("action=\"/blog\""));
        assert!(page.contains("name=\"titles\""));
        assert!(page.contains("<title>Company Scout</title>"));
    }

    #[test]
    fn test_company_results_links() {
        let object = serde_json::json!({ "company_name": "<Stripe>" });
        let batch = CompanyBatch {
            records: vec![
                CompanyRecord::extracted(
                    "Stripe",
                    CompanyProfile::from_json_object(object.as_object().unwrap()),
                    "https://linkedin.com/company/stripe".to_string(),
                ),
                CompanyRecord::failed("Unknown Co", ExtractionError::NoSearchResults, None),
            ],
        };

        let page = CompanyResultsTemplate::new(&batch, "companies_1.csv")
            .render()
            .unwrap();
        assert!(page.contains("target=\"_blank\">View LinkedIn</a>"));
        assert!(page.contains("linkedin.com"));
        assert!(page.contains("&lt;Stripe&gt;"));
        assert!(!page.contains("<Stripe>"));
        assert!(page.contains("No search results found."));
        assert!(page.contains("<td>Not available</td>"));
        assert!(page.contains("/downloads/companies_1.csv"));
        assert!(page.contains("2 queries, 1 errors."));
    }

    #[test]
    fn test_blog_results_without_archive() {
        let data = BlogBatchData {
            batch: "batch_1".to_string(),
            articles: vec![],
            failures: vec![ArticleFailure {
                title: "Broken".to_string(),
                error: "LLM down".to_string(),
            }],
            archive_file: None,
        };
        let page = BlogResultsTemplate { data: &data }.render().unwrap();
        assert!(page.contains("No articles were generated."));
        assert!(page.contains("<strong>Broken</strong>"));
        assert!(!page.contains("/downloads/"));
    }

    #[test]
    fn test_blog_results_link_full_articles() {
        let data = BlogBatchData {
            batch: "batch_1".to_string(),
            articles: vec![ArticleSummary {
                title: "Git".to_string(),
                file_name: "Git_20250101_000000.md".to_string(),
                preview: "# Git\n\n<intro>".to_string(),
            }],
            failures: vec![],
            archive_file: Some("batch_1.zip".to_string()),
        };
        let page = BlogResultsTemplate { data: &data }.render().unwrap();
        assert!(page.contains("/downloads/batch_1.zip"));
        assert!(page.contains("/articles/batch_1/Git_20250101_000000.md"));
        assert!(page.contains("&lt;intro&gt;"));
        assert!(!page.contains("Failed</h2>"));
    }

    #[test]
    fn test_article_page_shows_full_text() {
        let body = format!("# Git\n\n{}\n\n<tail>", "word ".repeat(300));
        let page = ArticleTemplate {
            batch: "batch_1",
            file_name: "Git_20250101_000000.md",
            body: &body,
        }
        .render()
        .unwrap();
        assert!(page.contains(&"word ".repeat(300)));
        assert!(page.contains("&lt;tail&gt;"));
        assert!(page.contains("/articles/batch_1/Git_20250101_000000.md/raw"));
    }

    #[test]
    fn test_message_page_escapes() {
        let page = MessageTemplate {
            title: "Failed",
            message: "<script>alert(1)</script>",
        }
        .render()
        .unwrap();
        assert!(page.contains("<h1>Failed</h1>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
    }
}
