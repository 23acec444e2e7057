//! Configuration management for talk2data.
//!
//! Handles loading configuration from TOML files, with settings for the
//! language-model collaborator and the tabular store. The API credential is
//! deliberately not part of the file format; it is passed explicitly through
//! [`crate::llm::GroqConfig`] or read from the `GROQ_API_KEY` environment
//! variable.

use crate::error::{Result, Talk2DataError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for talk2data.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Language-model collaborator configuration.
    #[serde(default)]
    pub llm: LlmConfig,

    /// Tabular store configuration.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Language-model collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Model identifier sent with each request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat-completions endpoint URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_api_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_url: default_api_url(),
        }
    }
}

/// Tabular store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Explicit database file location. When absent, the store lives in a
    /// temporary directory scoped to the session.
    pub path: Option<PathBuf>,

    /// Table name datasets are ingested under.
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "data".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            table: default_table(),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Talk2DataError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            Talk2DataError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
