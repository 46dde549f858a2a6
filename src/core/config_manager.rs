// src/core/config_manager.rs
//! Unified configuration management: defaults, optional YAML file, environment

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_SEARCH_URL: &str = "https://google.serper.dev/search";
pub const DEFAULT_SCRAPE_URL: &str = "https://scrape.serper.dev";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const SERPER_KEY_NAMES: [&str; 2] = ["SERPER_API_KEY", "SERPER_API_kEY"];
const GEMINI_KEY_NAMES: [&str; 2] = ["GEMINI_API_KEY", "GEMIAN_PAI_KKEY"];

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub service: ServiceConfig,
    pub secrets: Secrets,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub name: String,
    pub output_path: PathBuf,
    pub blog_path: PathBuf,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub search_url: String,
    pub scrape_url: String,
    pub gemini_base_url: String,
    pub model: String,
    pub thinking_budget: i32,
    pub http_timeout_seconds: u64,
    pub llm_timeout_seconds: u64,
    pub inter_call_delay_ms: u64,
}

#[derive(Clone)]
pub struct Secrets {
    pub serper_api_key: String,
    pub gemini_api_key: String,
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("serper_api_key", &"<redacted>")
            .field("gemini_api_key", &"<redacted>")
            .finish()
    }
}

/// One environment section of `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileSettings {
    pub output_path: Option<PathBuf>,
    pub blog_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub search_url: Option<String>,
    pub scrape_url: Option<String>,
    pub gemini_base_url: Option<String>,
    pub model: Option<String>,
    pub thinking_budget: Option<i32>,
    pub http_timeout_seconds: Option<u64>,
    pub llm_timeout_seconds: Option<u64>,
    pub inter_call_delay_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: FileSettings,
    production: FileSettings,
}

impl ConfigManager {
    /// Load `.env`, the optional YAML file and the process environment.
    /// Fails before any network activity if a secret is missing.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }

        let environment = Self::environment_name(|name| std::env::var(name).ok());

        let file = match config_path {
            Some(path) => Self::read_file_settings(path, &environment)?,
            None => {
                let default_path = PathBuf::from("config.yaml");
                if default_path.exists() {
                    Self::read_file_settings(&default_path, &environment)?
                } else {
                    FileSettings::default()
                }
            }
        };

        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    fn environment_name<F>(lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("COMPANY_SCOUT_ENV")
            .or_else(|| lookup("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string())
    }

    /// Read the section of a YAML config file matching `environment`.
    pub fn read_file_settings(path: &Path, environment: &str) -> Result<FileSettings, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::File {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse_file_settings(&content, environment).map_err(|reason| ConfigError::File {
            path: path.display().to_string(),
            reason,
        })
    }

    fn parse_file_settings(content: &str, environment: &str) -> Result<FileSettings, String> {
        let file: ConfigFile = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        info!("Using config file section: {}", environment);
        Ok(match environment {
            "production" => file.production,
            _ => file.local,
        })
    }

    /// Layer environment lookups over file settings and defaults.
    pub fn from_sources<F>(file: FileSettings, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secrets = Secrets {
            serper_api_key: Self::require_secret(&lookup, SERPER_KEY_NAMES)?,
            gemini_api_key: Self::require_secret(&lookup, GEMINI_KEY_NAMES)?,
        };

        let environment = EnvironmentConfig {
            name: Self::environment_name(&lookup),
            output_path: lookup("COMPANY_SCOUT_OUTPUT_DIR")
                .map(PathBuf::from)
                .or(file.output_path)
                .unwrap_or_else(|| PathBuf::from("out")),
            blog_path: lookup("COMPANY_SCOUT_BLOG_DIR")
                .map(PathBuf::from)
                .or(file.blog_path)
                .unwrap_or_else(|| PathBuf::from("blog")),
            log_file: lookup("COMPANY_SCOUT_LOG_FILE")
                .map(PathBuf::from)
                .or(file.log_file),
        };

        let service = ServiceConfig {
            search_url: lookup("SERPER_SEARCH_URL")
                .or(file.search_url)
                .unwrap_or_else(|| DEFAULT_SEARCH_URL.to_string()),
            scrape_url: lookup("SERPER_SCRAPE_URL")
                .or(file.scrape_url)
                .unwrap_or_else(|| DEFAULT_SCRAPE_URL.to_string()),
            gemini_base_url: lookup("GEMINI_API_URL")
                .or(file.gemini_base_url)
                .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            model: lookup("GEMINI_MODEL")
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            thinking_budget: Self::parse_number(&lookup, "GEMINI_THINKING_BUDGET")?
                .or(file.thinking_budget)
                .unwrap_or(0),
            http_timeout_seconds: Self::parse_number(&lookup, "HTTP_TIMEOUT_SECS")?
                .or(file.http_timeout_seconds)
                .unwrap_or(30),
            llm_timeout_seconds: Self::parse_number(&lookup, "LLM_TIMEOUT_SECS")?
                .or(file.llm_timeout_seconds)
                .unwrap_or(120),
            inter_call_delay_ms: Self::parse_number(&lookup, "INTER_CALL_DELAY_MS")?
                .or(file.inter_call_delay_ms)
                .unwrap_or(2000),
        };

        Ok(Self {
            environment,
            service,
            secrets,
        })
    }

    fn require_secret<F>(lookup: &F, names: [&'static str; 2]) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        names
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSecret { name: names[0] })
    }

    fn parse_number<F, T>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
        T: std::str::FromStr,
    {
        match lookup(name) {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| ConfigError::InvalidValue { name, value: raw }),
        }
    }

    /// Ensure all output directories exist
    pub async fn ensure_directories(&self) -> anyhow::Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.environment.output_path).await?;
        FsOps::ensure_dir_exists(&self.environment.blog_path).await?;

        if let Some(log_parent) = self
            .environment
            .log_file
            .as_ref()
            .and_then(|path| path.parent())
            .filter(|parent| !parent.as_os_str().is_empty())
        {
            FsOps::ensure_dir_exists(log_parent).await?;
        }

        Ok(())
    }
}

impl ServiceConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_seconds)
    }

    pub fn inter_call_delay(&self) -> Duration {
        Duration::from_millis(self.inter_call_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_search_key_is_reported_first() {
        let err = ConfigManager::from_sources(
            FileSettings::default(),
            lookup_from(&[("GEMINI_API_KEY", "g")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingSecret {
                name: "SERPER_API_KEY"
            }
        ));
    }

    #[test]
    fn test_missing_llm_key() {
        let err = ConfigManager::from_sources(
            FileSettings::default(),
            lookup_from(&[("SERPER_API_KEY", "s"), ("GEMINI_API_KEY", "  ")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingSecret {
                name: "GEMINI_API_KEY"
            }
        ));
    }

    #[test]
    fn test_legacy_key_names_are_accepted() {
        let config = ConfigManager::from_sources(
            FileSettings::default(),
            lookup_from(&[("SERPER_API_kEY", "s"), ("GEMIAN_PAI_KKEY", "g")]),
        )
        .unwrap();
        assert_eq!(config.secrets.serper_api_key, "s");
        assert_eq!(config.secrets.gemini_api_key, "g");
    }

    #[test]
    fn test_defaults() {
        let config = ConfigManager::from_sources(
            FileSettings::default(),
            lookup_from(&[("SERPER_API_KEY", "s"), ("GEMINI_API_KEY", "g")]),
        )
        .unwrap();
        assert_eq!(config.service.model, DEFAULT_MODEL);
        assert_eq!(config.service.thinking_budget, 0);
        assert_eq!(config.service.inter_call_delay(), Duration::from_secs(2));
        assert_eq!(config.service.search_url, DEFAULT_SEARCH_URL);
        assert_eq!(config.environment.output_path, PathBuf::from("out"));
        assert_eq!(config.environment.name, "local");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = FileSettings {
            model: Some("gemini-1.5-pro".to_string()),
            inter_call_delay_ms: Some(500),
            output_path: Some(PathBuf::from("/data/out")),
            ..Default::default()
        };
        let config = ConfigManager::from_sources(
            file,
            lookup_from(&[
                ("SERPER_API_KEY", "s"),
                ("GEMINI_API_KEY", "g"),
                ("INTER_CALL_DELAY_MS", "0"),
            ]),
        )
        .unwrap();
        assert_eq!(config.service.model, "gemini-1.5-pro");
        assert_eq!(config.service.inter_call_delay_ms, 0);
        assert_eq!(config.environment.output_path, PathBuf::from("/data/out"));
    }

    #[test]
    fn test_invalid_number() {
        let err = ConfigManager::from_sources(
            FileSettings::default(),
            lookup_from(&[
                ("SERPER_API_KEY", "s"),
                ("GEMINI_API_KEY", "g"),
                ("HTTP_TIMEOUT_SECS", "soon"),
            ]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                name: "HTTP_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn test_yaml_sections() {
        let yaml = r#"
local:
  output_path: ./out
  inter_call_delay_ms: 100
production:
  output_path: /app/out
  model: gemini-2.5-pro
"#;
        let local = ConfigManager::parse_file_settings(yaml, "local").unwrap();
        assert_eq!(local.output_path, Some(PathBuf::from("./out")));
        assert_eq!(local.inter_call_delay_ms, Some(100));

        let production = ConfigManager::parse_file_settings(yaml, "production").unwrap();
        assert_eq!(production.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(production.inter_call_delay_ms, None);
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let secrets = Secrets {
            serper_api_key: "very-secret".to_string(),
            gemini_api_key: "also-secret".to_string(),
        };
        let printed = format!("{:?}", secrets);
        assert!(!printed.contains("very-secret"));
        assert!(!printed.contains("also-secret"));
    }
}
