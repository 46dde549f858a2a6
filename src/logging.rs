// src/logging.rs
//! Tracing setup
//!
//! Configuration decides where the log file goes, so the process starts with
//! a stderr-only subscriber and installs the full one once config is loaded.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "company_scout=info,rocket=warn";

/// `RUST_LOG` when set, otherwise info for this crate and warnings for Rocket.
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Plain subscriber used while configuration is being read.
pub fn startup_subscriber<W>(writer: W, filter: EnvFilter) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(filter)
        .finish()
}

/// Install the global subscriber: stderr, plus JSON lines in `log_file` if set.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .with(default_filter())
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigManager;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_config_loading_is_logged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "local:\n  output_path: out\n").unwrap();

        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber =
            startup_subscriber(move || writer.clone(), EnvFilter::new("company_scout=info"));

        tracing::subscriber::with_default(subscriber, || {
            ConfigManager::read_file_settings(&path, "local").unwrap();
        });

        let output = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Using config file section: local"));
    }
}
