// src/web/handlers/company_handlers.rs
use anyhow::{Context, Result};
use rocket::form::Form;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};
use uuid::Uuid;

use crate::batch::CompanyBatch;
use crate::core::FsOps;
use crate::utils::parse_batch_lines;
use crate::web::types::*;
use crate::web::views::{self, CompanyResultsTemplate, MessageTemplate};

/// Run the batch and store its CSV export. Returns the batch and the CSV file name.
async fn run_and_export(state: &AppState, queries: &[String]) -> Result<(CompanyBatch, String)> {
    let batch = state
        .driver
        .run_companies(&state.extractor, queries, |index, total, query| {
            info!(query, "Processing company {}/{}", index + 1, total)
        })
        .await;

    let csv_file = format!("companies_{}.csv", Uuid::new_v4().simple());
    let csv = batch.to_csv()?;
    FsOps::write_file_safe(&state.output_dir.join(&csv_file), csv.as_bytes())
        .await
        .context("Failed to store CSV export")?;

    Ok((batch, csv_file))
}

pub async fn companies_page_handler(
    form: Form<CompanyForm>,
    state: &State<AppState>,
) -> Result<RawHtml<String>, Status> {
    let queries = parse_batch_lines(&form.queries);
    if queries.is_empty() {
        return views::render(&MessageTemplate {
            title: "Nothing to search",
            message: "Enter at least one company name.",
        });
    }

    match run_and_export(state, &queries).await {
        Ok((batch, csv_file)) => views::render(&CompanyResultsTemplate::new(&batch, &csv_file)),
        Err(e) => {
            error!("Company batch failed: {:#}", e);
            views::render(&MessageTemplate {
                title: "Company lookup failed",
                message: &e.to_string(),
            })
        }
    }
}

pub async fn companies_api_handler(
    request: Json<StandardRequest<CompanyBatchRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<CompanyBatchData>>, Json<StandardErrorResponse>> {
    let request = request.into_inner();
    let conversation_id = request.conversation_id;
    let queries = parse_batch_lines(&request.data.queries.join("\n"));

    if queries.is_empty() {
        return Err(Json(StandardErrorResponse::new(
            "No company queries provided".to_string(),
            "EMPTY_INPUT".to_string(),
            vec!["Send at least one non-empty entry in `queries`".to_string()],
            conversation_id,
        )));
    }

    info!("API company batch with {} queries", queries.len());

    match run_and_export(state, &queries).await {
        Ok((batch, csv_file)) => {
            let message = format!(
                "Processed {} companies ({} errors)",
                batch.records.len(),
                batch.error_count()
            );
            Ok(Json(DataResponse::success(
                message,
                CompanyBatchData::new(batch, csv_file),
                conversation_id,
            )))
        }
        Err(e) => {
            error!("Company batch failed: {:#}", e);
            Err(Json(StandardErrorResponse::new(
                e.to_string(),
                "EXPORT_ERROR".to_string(),
                vec!["Check that the output directory is writable".to_string()],
                conversation_id,
            )))
        }
    }
}
