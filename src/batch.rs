// src/batch.rs
//! Sequential batch runs over newline-delimited input
//!
//! Items are processed one at a time with a fixed pause between consecutive
//! calls. A failing item becomes an error entry and never stops the batch.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::blog_generator::BlogGenerator;
use crate::core::FsOps;
use crate::linkedin_analysis::CompanyExtractor;
use crate::types::{ArticleFailure, ArticleRecord, CompanyRecord, COMPANY_FIELDS};
use crate::utils::split_title_details;

/// Records of one company batch, in input order.
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct CompanyBatch {
    pub records: Vec<CompanyRecord>,
}

impl CompanyBatch {
    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_error()).count()
    }

    /// CSV table with one row per query. Error rows leave the content columns blank.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["query"];
        header.extend(COMPANY_FIELDS);
        header.extend(["linkedin_url", "error"]);
        writer.write_record(&header).context("Failed to write CSV header")?;

        for record in &self.records {
            let mut row: Vec<String> = vec![record.query().to_string()];
            match record.profile() {
                Some(profile) => row.extend(profile.values().iter().map(|v| v.to_string())),
                None => row.extend(COMPANY_FIELDS.iter().map(|_| String::new())),
            }
            row.push(record.linkedin_url().unwrap_or_default().to_string());
            row.push(record.error().map(|e| e.to_string()).unwrap_or_default());

            writer
                .write_record(&row)
                .with_context(|| format!("Failed to write CSV row for {}", record.query()))?;
        }

        let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize company records")
    }
}

/// Articles written by one blog batch.
#[derive(Debug, Serialize)]
pub struct BlogBatch {
    pub articles: Vec<ArticleRecord>,
    pub failures: Vec<ArticleFailure>,
    pub dir: PathBuf,
    /// `<dir>.zip`, present when at least one article was written
    pub archive: Option<PathBuf>,
}

pub struct BatchDriver {
    delay: Duration,
}

impl BatchDriver {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    async fn pause(&self, index: usize, total: usize) {
        if index + 1 < total && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }

    /// Extract every query in order. `on_progress` gets `(index, total, query)`
    /// before each item.
    pub async fn run_companies<F>(
        &self,
        extractor: &CompanyExtractor,
        queries: &[String],
        mut on_progress: F,
    ) -> CompanyBatch
    where
        F: FnMut(usize, usize, &str),
    {
        let total = queries.len();
        info!(total, "Starting company batch");

        let mut batch = CompanyBatch::default();
        for (index, query) in queries.iter().enumerate() {
            on_progress(index, total, query);
            batch.records.push(extractor.extract(query).await);
            self.pause(index, total).await;
        }

        info!(
            total,
            errors = batch.error_count(),
            "Company batch completed"
        );
        batch
    }

    /// Generate one article per `title | details` line, save each under
    /// `dir` and bundle the saved files into `<dir>.zip`.
    pub async fn run_blog<F>(
        &self,
        generator: &BlogGenerator,
        lines: &[String],
        dir: &Path,
        mut on_progress: F,
    ) -> Result<BlogBatch>
    where
        F: FnMut(usize, usize, &str),
    {
        let total = lines.len();
        info!(total, dir = %dir.display(), "Starting blog batch");
        FsOps::ensure_dir_exists(dir).await?;

        let mut articles = Vec::new();
        let mut failures = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            let (title, details) = split_title_details(line);
            on_progress(index, total, &title);

            match generator.generate(&title, &details).await {
                Ok(body) => match BlogGenerator::save_article(dir, &title, &body).await {
                    Ok(article) => {
                        info!(title = %article.title, path = %article.file_path.display(), "Article saved");
                        articles.push(article);
                    }
                    Err(e) => {
                        warn!(title = %title, "Article not saved: {:#}", e);
                        failures.push(ArticleFailure {
                            title,
                            error: format!("{:#}", e),
                        });
                    }
                },
                Err(e) => {
                    warn!(title = %title, "Skipping article: {}", e);
                    failures.push(ArticleFailure {
                        title,
                        error: e.to_string(),
                    });
                }
            }

            self.pause(index, total).await;
        }

        let archive = if articles.is_empty() {
            None
        } else {
            let archive_path = archive_path_for(dir)?;
            let files: Vec<PathBuf> = articles.iter().map(|a| a.file_path.clone()).collect();
            FsOps::zip_files(&files, &archive_path).await?;
            Some(archive_path)
        };

        info!(
            saved = articles.len(),
            failed = failures.len(),
            "Blog batch completed"
        );

        Ok(BlogBatch {
            articles,
            failures,
            dir: dir.to_path_buf(),
            archive,
        })
    }
}

fn archive_path_for(dir: &Path) -> Result<PathBuf> {
    let name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid batch directory: {}", dir.display()))?;
    Ok(dir.with_file_name(format!("{}.zip", name)))
}
