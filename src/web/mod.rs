// src/web/mod.rs

pub mod handlers;
pub mod types;
pub mod views;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::Form;
use rocket::fs::NamedFile;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

// HTML pages

#[get("/")]
pub async fn index() -> Result<RawHtml<String>, Status> {
    handlers::index_handler().await
}

#[post("/companies", data = "<form>")]
pub async fn companies_page(
    form: Form<CompanyForm>,
    state: &State<AppState>,
) -> Result<RawHtml<String>, Status> {
    handlers::companies_page_handler(form, state).await
}

#[post("/blog", data = "<form>")]
pub async fn blog_page(
    form: Form<BlogForm>,
    state: &State<AppState>,
) -> Result<RawHtml<String>, Status> {
    handlers::blog_page_handler(form, state).await
}

#[get("/articles/<batch>/<file>")]
pub async fn article_page(
    batch: &str,
    file: &str,
    state: &State<AppState>,
) -> Result<RawHtml<String>, Status> {
    handlers::article_page_handler(batch, file, state).await
}

#[get("/articles/<batch>/<file>/raw")]
pub async fn article_raw(batch: &str, file: &str, state: &State<AppState>) -> Option<NamedFile> {
    handlers::article_raw_handler(batch, file, state).await
}

#[get("/downloads/<file>")]
pub async fn download(file: &str, state: &State<AppState>) -> Option<NamedFile> {
    handlers::download_handler(file, state).await
}

// JSON API

#[post("/companies", data = "<request>")]
pub async fn extract_companies(
    request: Json<StandardRequest<CompanyBatchRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<CompanyBatchData>>, Json<StandardErrorResponse>> {
    handlers::companies_api_handler(request, state).await
}

#[post("/blog", data = "<request>")]
pub async fn generate_articles(
    request: Json<StandardRequest<BlogBatchRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<BlogBatchData>>, Json<StandardErrorResponse>> {
    handlers::blog_api_handler(request, state).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found(request: &Request) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("Nothing found at {}", request.uri()),
        "NOT_FOUND".to_string(),
        vec!["Download links are only valid for files generated by this server".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be understood".to_string(),
        "UNPROCESSABLE".to_string(),
        vec!["`queries` and `titles` must be lists of strings".to_string()],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Check the server log for details".to_string(),
        ],
        None,
    ))
}

fn build_rocket(
    state: AppState,
    address: &str,
    port: u16,
) -> rocket::Rocket<rocket::Build> {
    let figment = rocket::Config::figment()
        .merge(("address", address))
        .merge(("port", port));

    rocket::custom(figment)
        .attach(Cors)
        .manage(state)
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/",
            routes![
                index,
                companies_page,
                blog_page,
                article_page,
                article_raw,
                download,
                options
            ],
        )
        .mount("/api", routes![extract_companies, generate_articles, health])
}

// Main server start function
pub async fn start_web_server(state: AppState, address: &str, port: u16) -> Result<()> {
    info!("Starting Company Scout server");
    info!("CSV exports: {}", state.output_dir.display());
    info!("Blog batches: {}", state.blog_dir.display());
    info!("Server: http://{}:{}", address, port);

    build_rocket(state, address, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket server failed: {}", e))?;

    Ok(())
}
