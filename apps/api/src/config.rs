use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
/// Built once at startup and passed through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the flat-file store (`candidates.json`, `jobs.json`, `interviews.json`).
    pub data_dir: PathBuf,
    /// Uploaded resume files.
    pub resumes_dir: PathBuf,
    /// Chat is disabled when unset.
    pub google_api_key: Option<String>,
    pub llm_model: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string());

        Ok(Config {
            google_api_key: std::env::var("GOOGLE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            llm_temperature: env_or("LLM_TEMPERATURE", 0.7)?,
            llm_max_tokens: env_or("LLM_MAX_TOKENS", 2048)?,
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            ..Config::with_data_dir(data_dir)
        })
    }

    /// Defaults rooted at `data_dir`, with no LLM key.
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref().to_path_buf();
        Config {
            resumes_dir: data_dir.join("resumes"),
            data_dir,
            google_api_key: None,
            llm_model: DEFAULT_MODEL.to_string(),
            llm_temperature: 0.7,
            llm_max_tokens: 2048,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    /// Creates the data and resume directories if they don't exist.
    pub async fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.resumes_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
