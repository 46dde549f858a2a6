// src/web/handlers/system_handlers.rs
use rocket::fs::NamedFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use crate::core::FsOps;
use crate::web::types::*;
use crate::web::views::{self, IndexTemplate};

pub async fn index_handler() -> Result<RawHtml<String>, Status> {
    views::render(&IndexTemplate)
}

pub async fn health_handler() -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success("OK".to_string(), None))
}

/// Serve a generated CSV or archive by bare file name.
pub async fn download_handler(file: &str, state: &State<AppState>) -> Option<NamedFile> {
    if !FsOps::is_plain_file_name(file) {
        warn!("Rejected download name: {}", file);
        return None;
    }

    for dir in [&state.output_dir, &state.blog_dir] {
        if let Ok(named) = NamedFile::open(dir.join(file)).await {
            info!("Serving download: {}", file);
            return Some(named);
        }
    }
    None
}
