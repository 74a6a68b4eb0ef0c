use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::llm_client::ModelConfig;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
/// Fails at startup if no API credential can be resolved.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub api_base: String,
    pub models: ModelConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_key = resolve_api_key(&CredentialSources::from_env())?;
        let defaults = ModelConfig::default();

        Ok(Config {
            api_key,
            api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            models: ModelConfig {
                structured_model: optional_env("STRUCTURED_MODEL")
                    .unwrap_or(defaults.structured_model),
                chat_model: optional_env("CHAT_MODEL").unwrap_or(defaults.chat_model),
                thinking_budget: match optional_env("THINKING_BUDGET") {
                    Some(raw) => raw
                        .parse::<u32>()
                        .context("THINKING_BUDGET must be a non-negative integer")?,
                    None => defaults.thinking_budget,
                },
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    non_blank(std::env::var(key).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// Credential resolution
// ────────────────────────────────────────────────────────────────────────────

/// Gemini API key. The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(****)")
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("API key not set: checked API_KEY, GEMINI_API_KEY and GEMINI_API_KEY_FILE")]
    Missing,

    #[error("Could not read API key file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The places an API key may come from, in lookup order.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    /// `API_KEY`
    pub primary: Option<String>,
    /// `GEMINI_API_KEY`
    pub secondary: Option<String>,
    /// `GEMINI_API_KEY_FILE`: a secret mounted into the runtime.
    pub runtime_file: Option<PathBuf>,
}

impl CredentialSources {
    pub fn from_env() -> Self {
        Self {
            primary: std::env::var("API_KEY").ok(),
            secondary: std::env::var("GEMINI_API_KEY").ok(),
            runtime_file: optional_env("GEMINI_API_KEY_FILE").map(PathBuf::from),
        }
    }
}

/// Resolves the API key from the first source that yields a non-blank value.
pub fn resolve_api_key(sources: &CredentialSources) -> Result<ApiKey, CredentialError> {
    if let Some(key) = non_blank(sources.primary.clone()) {
        return Ok(ApiKey::new(key.trim()));
    }
    if let Some(key) = non_blank(sources.secondary.clone()) {
        return Ok(ApiKey::new(key.trim()));
    }
    if let Some(path) = &sources.runtime_file {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            CredentialError::Unreadable {
                path: path.clone(),
                source,
            }
        })?;
        if let Some(key) = non_blank(Some(contents)) {
            return Ok(ApiKey::new(key.trim()));
        }
    }
    Err(CredentialError::Missing)
}
