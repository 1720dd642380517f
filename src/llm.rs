#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::{Context, Result};
use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use bon::Builder;

use crate::config::{ModelSettings, OpenAiEnv};

/// A single system + user prompt exchange.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct ChatRequest {
    /// Model identifier.
    pub model:       String,
    /// System prompt.
    pub system:      String,
    /// User prompt.
    pub user:        String,
    /// Sampling temperature.
    #[builder(default = 0.7)]
    pub temperature: f32,
    /// Upper bound on response tokens.
    #[builder(default = 2000)]
    pub max_tokens:  u32,
}

impl ChatRequest {
    /// Starts a request with the model and sampling parameters from
    /// `settings`.
    pub fn with_settings(
        settings: &ModelSettings,
        model: &str,
        system: &str,
        user: String,
    ) -> Self {
        ChatRequest::builder()
            .model(model)
            .system(system)
            .user(user)
            .temperature(settings.temperature)
            .max_tokens(settings.max_tokens)
            .build()
    }
}

/// Upstream language model used by the generation and feedback endpoints.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends `request` and returns the trimmed text of the first choice.
    async fn complete(&self, request: ChatRequest) -> Result<String>;

    /// Lists the model identifiers available upstream.
    async fn list_models(&self) -> Result<Vec<String>>;
}

/// [`ChatBackend`] backed by an OpenAI-compatible API.
pub struct OpenAiBackend {
    /// Configured API client.
    client: OpenAIClient<OpenAIConfig>,
}

impl OpenAiBackend {
    /// Creates a backend from the configured credentials.
    pub fn new(env: &OpenAiEnv) -> Self {
        let client = OpenAIClient::with_config(
            OpenAIConfig::new()
                .with_api_base(env.api_base().to_owned())
                .with_api_key(env.api_key().to_owned()),
        );
        Self { client }
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user)
                .build()?
                .into(),
        ];

        let body = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .max_completion_tokens(request.max_tokens)
            .build()?;

        let response = self
            .client
            .chat()
            .create(body)
            .await
            .with_context(|| format!("Chat completion with {} failed", request.model))?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .map(|content| content.trim().to_owned())
            .context("No content in OpenAI response")
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let models = self
            .client
            .models()
            .list()
            .await
            .context("Could not list upstream models")?;
        Ok(models.data.into_iter().map(|model| model.id).collect())
    }
}
