pub mod batch;
pub mod blog_generator;
pub mod core;
pub mod error;
pub mod linkedin_analysis;
pub mod logging;
pub mod types;
pub mod utils;
pub mod web;

pub use batch::{BatchDriver, BlogBatch, CompanyBatch};
pub use blog_generator::BlogGenerator;
pub use error::{ConfigError, ExtractionError, ParseFailure, ProviderError};
pub use linkedin_analysis::{CompanyExtractor, PageFetcher, SearchProvider, TextGenerator};
pub use web::start_web_server;
