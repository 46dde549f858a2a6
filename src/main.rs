use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use company_scout::batch::BatchDriver;
use company_scout::blog_generator::BlogGenerator;
use company_scout::core::{ConfigManager, FsOps};
use company_scout::linkedin_analysis::CompanyExtractor;
use company_scout::logging;
use company_scout::utils::{parse_batch_lines, parse_blog_lines};
use company_scout::web::{start_web_server, AppState};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "company-scout")]
#[command(about = "Company data extraction and blog article generation")]
struct Cli {
    /// YAML configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web interface and JSON API
    Serve {
        #[arg(long, default_value = "127.0.0.1", env = "COMPANY_SCOUT_ADDRESS")]
        address: String,
        #[arg(long, default_value_t = 8000, env = "COMPANY_SCOUT_PORT")]
        port: u16,
    },
    /// Extract company data for one query per line
    Companies {
        /// Input file, stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write the CSV table here
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print records as JSON on stdout
        #[arg(long)]
        json: bool,
        /// Pause between queries in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Generate one Markdown article per `title | details` line
    Blog {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Batch folder; a timestamped folder under the blog path when omitted
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

async fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => FsOps::read_file_safe(path).await,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn progress_bar(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("#>-"));
    }
    bar
}

fn driver_for(config: &ConfigManager, delay_ms: Option<u64>) -> BatchDriver {
    BatchDriver::new(
        delay_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| config.service.inter_call_delay()),
    )
}

async fn run_companies(
    config: &ConfigManager,
    input: Option<PathBuf>,
    csv_path: Option<PathBuf>,
    json: bool,
    delay_ms: Option<u64>,
) -> Result<()> {
    let queries = parse_batch_lines(&read_input(input.as_deref()).await?);
    if queries.is_empty() {
        anyhow::bail!("No company queries in input");
    }

    let llm = CompanyExtractor::llm_from_config(config)?;
    let extractor = CompanyExtractor::from_config(config, llm)?;
    let driver = driver_for(config, delay_ms);

    let bar = progress_bar(queries.len());
    let batch = driver
        .run_companies(&extractor, &queries, |index, _, query| {
            bar.set_position(index as u64);
            bar.set_message(query.to_string());
        })
        .await;
    bar.finish_with_message("done");

    let csv_path = csv_path.unwrap_or_else(|| {
        config.environment.output_path.join(format!(
            "companies_{}.csv",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });
    FsOps::write_file_safe(&csv_path, batch.to_csv()?.as_bytes()).await?;
    info!(
        "Saved {} records ({} errors) to {}",
        batch.records.len(),
        batch.error_count(),
        csv_path.display()
    );

    if json {
        println!("{}", batch.to_json()?);
    }
    Ok(())
}

async fn run_blog(
    config: &ConfigManager,
    input: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    delay_ms: Option<u64>,
) -> Result<()> {
    let lines = parse_blog_lines(&read_input(input.as_deref()).await?);
    if lines.is_empty() {
        anyhow::bail!("No blog titles in input");
    }

    let generator = BlogGenerator::new(CompanyExtractor::llm_from_config(config)?);
    let driver = driver_for(config, delay_ms);
    let dir = out_dir.unwrap_or_else(|| {
        config.environment.blog_path.join(format!(
            "batch_{}",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        ))
    });

    let bar = progress_bar(lines.len());
    let batch = driver
        .run_blog(&generator, &lines, &dir, |index, _, title| {
            bar.set_position(index as u64);
            bar.set_message(title.to_string());
        })
        .await?;
    bar.finish_with_message("done");

    for article in &batch.articles {
        println!("{}", article.file_path.display());
    }
    for failure in &batch.failures {
        error!(title = %failure.title, "Article failed: {}", failure.error);
    }
    if let Some(archive) = &batch.archive {
        info!("Archive: {}", archive.display());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Missing secrets stop the process before any network call
    let config = {
        let _startup = tracing::subscriber::set_default(logging::startup_subscriber(
            std::io::stderr,
            logging::default_filter(),
        ));
        let config = ConfigManager::load(cli.config.as_deref())?;
        config.ensure_directories().await?;
        config
    };
    logging::init(config.environment.log_file.as_deref())?;

    info!("Environment: {}", config.environment.name);
    info!("Model: {}", config.service.model);

    match cli.command {
        Commands::Serve { address, port } => {
            let llm = CompanyExtractor::llm_from_config(&config)?;
            let state = AppState {
                extractor: CompanyExtractor::from_config(&config, llm.clone())?,
                blog: BlogGenerator::new(llm),
                driver: driver_for(&config, None),
                output_dir: config.environment.output_path.clone(),
                blog_dir: config.environment.blog_path.clone(),
            };
            start_web_server(state, &address, port).await
        }
        Commands::Companies {
            input,
            csv,
            json,
            delay_ms,
        } => run_companies(&config, input, csv, json, delay_ms).await,
        Commands::Blog {
            input,
            out_dir,
            delay_ms,
        } => run_blog(&config, input, out_dir, delay_ms).await,
    }
}
