#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use reqwest::Client;

use crate::relevance::RelevanceScorer;

/// Prompt truncation length for submission and file content.
pub const PROMPT_TRUNCATE: usize = 15_000;

/// Default OpenAI-compatible endpoint.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI credentials sourced from the environment.
#[derive(Clone)]
pub struct OpenAiEnv {
    /// Base URL for the OpenAI-compatible API endpoint.
    api_base: String,
    /// API key used to authenticate OpenAI requests.
    api_key:  String,
}

impl OpenAiEnv {
    /// Builds a credential bundle from explicit values.
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            api_key:  api_key.into(),
        }
    }

    /// Construct an `OpenAiEnv` from environment variables; returns `None` if
    /// no API key is set.
    fn from_env() -> Option<Self> {
        let api_key = read_string("OPENAI_API_KEY")?;
        let api_base =
            read_string("OPENAI_ENDPOINT").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Some(Self { api_base, api_key })
    }

    /// Returns the API base URL used for OpenAI requests.
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the API key used for OpenAI requests.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl std::fmt::Debug for OpenAiEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiEnv")
            .field("api_base", &self.api_base)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Model names and sampling parameters for upstream calls.
#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// Model used for curriculum and feedback generation.
    pub model:            String,
    /// Model used for assignment generation.
    pub assignment_model: String,
    /// Sampling temperature.
    pub temperature:      f32,
    /// Upper bound on response tokens.
    pub max_tokens:       u32,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            model:            "gpt-3.5-turbo".to_string(),
            assignment_model: "gpt-4o".to_string(),
            temperature:      0.7,
            max_tokens:       2000,
        }
    }
}

impl ModelSettings {
    /// Reads overrides from the environment on top of the defaults.
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            model:            read_string("OPENAI_MODEL").unwrap_or(defaults.model),
            assignment_model: read_string("OPENAI_ASSIGNMENT_MODEL")
                .unwrap_or(defaults.assignment_model),
            temperature:      std::env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse::<f32>().ok())
                .unwrap_or(defaults.temperature),
            max_tokens:       std::env::var("OPENAI_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(defaults.max_tokens),
        }
    }
}

/// Runtime configuration shared by the request handlers.
pub struct ConfigState {
    /// OpenAI credentials, if configured.
    openai:        Option<OpenAiEnv>,
    /// Model names and sampling parameters.
    models:        ModelSettings,
    /// Shared reqwest HTTP client used for fetching submission files.
    http_client:   Client,
    /// Address the HTTP server binds to.
    bind_addr:     SocketAddr,
    /// Timeout applied to submission file downloads.
    fetch_timeout: Duration,
    /// Relevance heuristic used for gating and fallback grades.
    scorer:        RelevanceScorer,
}

impl ConfigState {
    /// Builds a configuration from explicit parts.
    pub fn new(
        openai: Option<OpenAiEnv>,
        models: ModelSettings,
        bind_addr: SocketAddr,
        fetch_timeout: Duration,
    ) -> Result<Self> {
        let http_client = Client::builder()
            // Avoid macOS dynamic store lookups that fail in sandboxed environments.
            .no_proxy()
            .build()
            .context("Failed to construct shared HTTP client")?;

        Ok(Self {
            openai,
            models,
            http_client,
            bind_addr,
            fetch_timeout,
            scorer: RelevanceScorer::default(),
        })
    }

    /// Construct a new configuration instance by reading the environment.
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("GRADDY_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid GRADDY_BIND_ADDR: {bind_addr}"))?;

        Self::new(
            OpenAiEnv::from_env(),
            ModelSettings::from_env(),
            bind_addr,
            read_timeout_secs("GRADDY_FETCH_TIMEOUT_SECS", 10),
        )
    }

    /// Returns the OpenAI configuration, if an API key is present.
    pub fn openai(&self) -> Option<&OpenAiEnv> {
        self.openai.as_ref()
    }

    /// Returns the model settings.
    pub fn models(&self) -> &ModelSettings {
        &self.models
    }

    /// Returns a clone of the shared reqwest HTTP client.
    pub fn http_client(&self) -> Client {
        self.http_client.clone()
    }

    /// Returns the configured listen address.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Overrides the listen address.
    pub fn set_bind_addr(&mut self, addr: SocketAddr) {
        self.bind_addr = addr;
    }

    /// Returns the submission file download timeout.
    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    /// Returns the relevance heuristic.
    pub fn scorer(&self) -> &RelevanceScorer {
        &self.scorer
    }
}

/// Shared configuration handle passed to request handlers.
#[derive(Clone)]
pub struct ConfigHandle(Arc<ConfigState>);

impl ConfigHandle {
    /// Wraps a configuration for sharing.
    pub fn new(state: ConfigState) -> Self {
        Self(Arc::new(state))
    }
}

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Reads a non-empty, trimmed environment variable.
fn read_string(env: &str) -> Option<String> {
    std::env::var(env)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parses an environment variable into a `Duration`, falling back to
/// `default_secs` when parsing fails or the variable is missing.
fn read_timeout_secs(env: &str, default_secs: u64) -> Duration {
    std::env::var(env)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default_secs))
}
