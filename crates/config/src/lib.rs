//! Configuration loading and validation for DocSage.
//!
//! Loads settings from `~/.docsage/config.toml` with environment variable
//! overrides. Validates all settings at startup; the resulting `Settings`
//! struct is immutable and passed by reference into every component's
//! constructor — no ambient/global lookup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Process-wide settings.
///
/// Maps directly to `~/.docsage/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// API key for the LLM endpoint (also via DOCSAGE_API_KEY / OPENAI_API_KEY)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Chat/completion model
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    /// Embedding model used to build and query the vector index
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Sampling temperature for all completion calls
    #[serde(default)]
    pub temperature: f32,

    /// Conversation window size in turns (one turn = user + assistant)
    #[serde(default = "default_chat_turns")]
    pub chat_turns: usize,

    /// Retrieval fan-out: passages fetched per query
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Directory holding the source documents
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Default document to ingest
    #[serde(default = "default_docs_file")]
    pub docs_file: String,

    /// Directory holding the persisted vector index
    #[serde(default = "default_index_dir")]
    pub index_dir: PathBuf,

    /// Index collection name (one JSON file per collection)
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Splitter chunk size in characters
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Splitter overlap in characters
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_api_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_llm_model() -> String {
    "gpt-4o-mini".into()
}
fn default_embedding_model() -> String {
    "text-embedding-3-small".into()
}
fn default_chat_turns() -> usize {
    5
}
fn default_top_k() -> usize {
    6
}
fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}
fn default_docs_file() -> String {
    "guide.pdf".into()
}
fn default_index_dir() -> PathBuf {
    PathBuf::from("index")
}
fn default_collection() -> String {
    "handbook".into()
}
fn default_chunk_size() -> usize {
    1000
}
fn default_chunk_overlap() -> usize {
    100
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("llm_model", &self.llm_model)
            .field("embedding_model", &self.embedding_model)
            .field("temperature", &self.temperature)
            .field("chat_turns", &self.chat_turns)
            .field("top_k", &self.top_k)
            .field("docs_dir", &self.docs_dir)
            .field("docs_file", &self.docs_file)
            .field("index_dir", &self.index_dir)
            .field("collection", &self.collection)
            .field("chunk_size", &self.chunk_size)
            .field("chunk_overlap", &self.chunk_overlap)
            .finish()
    }
}

impl Settings {
    /// Load settings from the default path (~/.docsage/config.toml).
    ///
    /// Also checks environment variables:
    /// - `DOCSAGE_API_KEY` (highest priority), then `OPENAI_API_KEY`
    /// - `DOCSAGE_API_URL`, `DOCSAGE_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut settings = Self::load_from(&config_path)?;

        if settings.api_key.is_none() {
            settings.api_key = std::env::var("DOCSAGE_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if let Ok(url) = std::env::var("DOCSAGE_API_URL") {
            settings.api_url = url;
        }

        if let Ok(model) = std::env::var("DOCSAGE_MODEL") {
            settings.llm_model = model;
        }

        Ok(settings)
    }

    /// Load settings from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".docsage")
    }

    /// Validate the settings. Called on file load; call again after env
    /// overrides when an API key is required (the chat surface does, the
    /// status command doesn't).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.chat_turns == 0 {
            return Err(ConfigError::ValidationError(
                "chat_turns must be at least 1".into(),
            ));
        }

        if self.top_k == 0 {
            return Err(ConfigError::ValidationError(
                "top_k must be at least 1".into(),
            ));
        }

        if self.chunk_size == 0 {
            return Err(ConfigError::ValidationError(
                "chunk_size must be at least 1".into(),
            ));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(ConfigError::ValidationError(
                "chunk_overlap must be smaller than chunk_size".into(),
            ));
        }

        Ok(())
    }

    /// Require an API key, failing with a configuration error when absent.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Path of the persisted index file for the configured collection.
    pub fn index_path(&self) -> PathBuf {
        self.index_dir.join(format!("{}.json", self.collection))
    }

    /// Generate a default config TOML string (for first-run hints).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            llm_model: default_llm_model(),
            embedding_model: default_embedding_model(),
            temperature: 0.0,
            chat_turns: default_chat_turns(),
            top_k: default_top_k(),
            docs_dir: default_docs_dir(),
            docs_file: default_docs_file(),
            index_dir: default_index_dir(),
            collection: default_collection(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors. All fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    #[error("No API key configured (set DOCSAGE_API_KEY or OPENAI_API_KEY)")]
    MissingApiKey,
}
