// src/web/handlers/blog_handlers.rs
use anyhow::Result;
use rocket::form::Form;
use rocket::fs::NamedFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use std::path::PathBuf;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::FsOps;
use crate::utils::parse_blog_lines;
use crate::web::types::*;
use crate::web::views::{self, ArticleTemplate, BlogResultsTemplate, MessageTemplate};

const PREVIEW_CHARS: usize = 500;

async fn run_batch(state: &AppState, lines: &[String]) -> Result<BlogBatchData> {
    let dir = state
        .blog_dir
        .join(format!("batch_{}", Uuid::new_v4().simple()));

    let batch = state
        .driver
        .run_blog(&state.blog, lines, &dir, |index, total, title| {
            info!(title, "Generating article {}/{}", index + 1, total)
        })
        .await?;

    Ok(BlogBatchData::from_batch(&batch, PREVIEW_CHARS))
}

pub async fn blog_page_handler(
    form: Form<BlogForm>,
    state: &State<AppState>,
) -> Result<RawHtml<String>, Status> {
    let lines = parse_blog_lines(&form.titles);
    if lines.is_empty() {
        return views::render(&MessageTemplate {
            title: "Nothing to write",
            message: "Enter at least one blog title.",
        });
    }

    match run_batch(state, &lines).await {
        Ok(data) => views::render(&BlogResultsTemplate { data: &data }),
        Err(e) => {
            error!("Blog batch failed: {:#}", e);
            views::render(&MessageTemplate {
                title: "Blog generation failed",
                message: &e.to_string(),
            })
        }
    }
}

/// `<blog_dir>/<batch>/<file>` for a generated Markdown article, if the names are safe.
fn article_path(state: &AppState, batch: &str, file: &str) -> Option<PathBuf> {
    let valid = FsOps::is_plain_file_name(batch)
        && FsOps::is_plain_file_name(file)
        && file.ends_with(".md");
    if !valid {
        warn!("Rejected article path: {}/{}", batch, file);
        return None;
    }
    Some(state.blog_dir.join(batch).join(file))
}

pub async fn article_page_handler(
    batch: &str,
    file: &str,
    state: &State<AppState>,
) -> Result<RawHtml<String>, Status> {
    let path = article_path(state, batch, file).ok_or(Status::NotFound)?;
    let body = FsOps::read_file_safe(&path).await.map_err(|e| {
        warn!("Article not readable: {:#}", e);
        Status::NotFound
    })?;

    views::render(&ArticleTemplate {
        batch,
        file_name: file,
        body: &body,
    })
}

pub async fn article_raw_handler(
    batch: &str,
    file: &str,
    state: &State<AppState>,
) -> Option<NamedFile> {
    let path = article_path(state, batch, file)?;
    NamedFile::open(path).await.ok()
}

pub async fn blog_api_handler(
    request: Json<StandardRequest<BlogBatchRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<BlogBatchData>>, Json<StandardErrorResponse>> {
    let request = request.into_inner();
    let conversation_id = request.conversation_id;
    let lines = parse_blog_lines(&request.data.titles.join("\n"));

    if lines.is_empty() {
        return Err(Json(StandardErrorResponse::new(
            "No blog titles provided".to_string(),
            "EMPTY_INPUT".to_string(),
            vec![
                "Send at least one entry in `titles`".to_string(),
                "Use `title | instructions` to add details".to_string(),
            ],
            conversation_id,
        )));
    }

    match run_batch(state, &lines).await {
        Ok(data) => {
            let message = format!(
                "Generated {} articles ({} failed)",
                data.articles.len(),
                data.failures.len()
            );
            Ok(Json(DataResponse::success(message, data, conversation_id)))
        }
        Err(e) => {
            error!("Blog batch failed: {:#}", e);
            Err(Json(StandardErrorResponse::new(
                e.to_string(),
                "BLOG_BATCH_ERROR".to_string(),
                vec!["Check that the blog directory is writable".to_string()],
                conversation_id,
            )))
        }
    }
}
