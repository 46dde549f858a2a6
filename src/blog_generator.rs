// src/blog_generator.rs
use anyhow::Result;
use chrono::Local;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::FsOps;
use crate::error::ProviderError;
use crate::linkedin_analysis::{prompts, TextGenerator};
use crate::types::ArticleRecord;
use crate::utils::article_file_stem;

/// Generates Markdown articles from titles using the shared LLM client.
#[derive(Clone)]
pub struct BlogGenerator {
    llm: Arc<dyn TextGenerator>,
}

impl BlogGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// Raw Markdown for one title. Blank details use the default instructions.
    pub async fn generate(&self, title: &str, details: &str) -> Result<String, ProviderError> {
        info!(title, "Generating blog article");

        let prompt = prompts::blog_article_prompt(title, details);
        let body = self
            .llm
            .generate(&prompt)
            .await
            .inspect_err(|e| error!(title, "Blog generation failed: {}", e))?;

        Ok(ensure_title_heading(title, body.trim()))
    }

    /// Persist an article as `<safe-title>_<timestamp>.md` inside `dir`.
    pub async fn save_article(dir: &Path, title: &str, body: &str) -> Result<ArticleRecord> {
        let stem = article_file_stem(title, Local::now());
        let file_path = FsOps::unique_path(dir, &stem, "md");
        FsOps::write_file_safe(&file_path, body.as_bytes()).await?;

        Ok(ArticleRecord {
            title: title.to_string(),
            body: body.to_string(),
            file_path,
        })
    }
}

/// Make the article open with `# <title>`. A level-1 heading on the first
/// line is replaced (`#Title` counts as one), anything else gets the heading
/// prepended.
pub fn ensure_title_heading(title: &str, body: &str) -> String {
    let (first_line, rest) = match body.split_once('\n') {
        Some((first, rest)) => (first, Some(rest)),
        None => (body, None),
    };

    let first_line = first_line.trim_start();
    if first_line.starts_with('#') && !first_line.starts_with("##") {
        match rest {
            Some(rest) => format!("# {}\n{}", title, rest),
            None => format!("# {}", title),
        }
    } else {
        format!("# {}\n\n{}", title, body)
    }
}
