use async_trait::async_trait;
use reportroute_common::Result;
use reqwest::Client;
use tracing::{debug, info};

use crate::llm_trait::{CompletionClient, CompletionRequest};
use crate::types::{ChatMessage, ChatRequest, ChatResponse};

/// OpenAI-compatible chat completion client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl OpenAiClient {
    /// Create new client
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // 5 minutes for LLM calls
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("OpenAI client initialized: {}", base_url);
        Ok(Self {
            base_url,
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }

    /// Model used for completions
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a completion request (with retry logic)
    pub async fn chat(&self, request: CompletionRequest) -> Result<String> {
        self.chat_with_retry(request, 3).await
    }

    /// Send a completion request with custom retry count
    async fn chat_with_retry(&self, request: CompletionRequest, max_retries: u32) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut messages = Vec::new();
        if let Some(system) = &request.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(request.prompt.clone()));

        let chat_request = ChatRequest {
            model: self.model.clone(),
            messages,
            temperature: Some(request.temperature),
        };

        debug!(
            "Sending chat request - Model: {}, Prompt length: {}",
            chat_request.model,
            request.prompt.len()
        );

        let mut last_error = None;

        for attempt in 1..=max_retries {
            match self.try_chat(&url, &chat_request).await {
                Ok(response) => {
                    debug!("Received completion - Length: {}", response.len());
                    return Ok(response);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < max_retries {
                        let delay = std::time::Duration::from_secs(2u64.pow(attempt - 1));
                        tracing::warn!(
                            "Chat request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt,
                            max_retries,
                            last_error.as_ref().unwrap(),
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("All retries failed").into()))
    }

    /// Single attempt to get a completion
    async fn try_chat(&self, url: &str, request: &ChatRequest) -> Result<String> {
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send request: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("OpenAI API error: {}", e))?;

        let result: ChatResponse = response.json().await
            .map_err(|e| anyhow::anyhow!("Failed to parse response: {}", e))?;

        let content = result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(anyhow::anyhow!("Empty completion from OpenAI").into());
        }

        Ok(content)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.chat(request).await
    }
}
