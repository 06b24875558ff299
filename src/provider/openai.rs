//! OpenAI chat-completions provider.
//!
//! One request per call: build the body, POST it, decode the reply and hand
//! back the first choice's text. Nothing is retried.

use async_trait::async_trait;
use tracing::debug;

use crate::core::{
    ChatRequest, ChatResponse, CompletionError, CompletionProvider, HttpClient, HttpClientConfig,
};
use crate::provider::constants::openai;

/// Settings for talking to the chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub http_config: HttpClientConfig,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: openai::API_BASE.to_string(),
            model: openai::DEFAULT_MODEL.to_string(),
            temperature: openai::DEFAULT_TEMPERATURE,
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            openai::CHAT_COMPLETIONS_ENDPOINT
        )
    }

    fn auth_header(&self) -> (String, String) {
        (
            "Authorization".to_string(),
            format!("Bearer {}", self.api_key),
        )
    }
}

pub struct OpenAiClient {
    config: OpenAiConfig,
    http: HttpClient,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
        let http = HttpClient::new(&config.http_config)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Send `prompt` and return the decoded response.
    pub async fn chat(&self, prompt: &str) -> Result<ChatResponse, CompletionError> {
        let request = ChatRequest::user_prompt(&self.config.model, prompt, self.config.temperature);
        let headers = [self.config.auth_header()];

        let raw = self
            .http
            .post_json(&self.config.endpoint(), &headers, &request)
            .await?;

        let response: ChatResponse =
            serde_json::from_slice(&raw).map_err(CompletionError::Decoding)?;

        if response.choices.is_empty() {
            return Err(CompletionError::NoChoices { raw });
        }

        debug!(
            id = %response.id,
            model = %response.model,
            total_tokens = response.usage.total_tokens,
            choices = response.choices.len(),
            "chat completion decoded"
        );

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let response = self.chat(prompt).await?;
        // chat() rejects empty choices, so a first one is present.
        Ok(response.first_content().unwrap_or_default().to_string())
    }
}

/// Ask the public endpoint with the default model and temperature.
pub async fn complete(api_key: &str, prompt: &str) -> Result<String, CompletionError> {
    let client = OpenAiClient::new(OpenAiConfig::new(api_key))?;
    client.complete(prompt).await
}
