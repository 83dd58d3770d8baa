mod models;

use crate::adapters::groq::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::GroqConfig;
use crate::core::Interpreter;
use crate::utils::error::{HoroscopeError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const COMPLETIONS_PATH: &str = "/chat/completions";

pub const NO_VALID_RESPONSE: &str = "No valid response from AI.";

/// Chat-completion client for Groq's OpenAI-compatible API.
///
/// [`Interpreter::interpret`] never fails: transport errors, rejected requests
/// and undecodable bodies are logged and returned as `"Error: ..."` text so the
/// reading still prints. Use [`GroqAiService::try_interpret`] to see the typed
/// error instead.
pub struct GroqAiService {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    system_prompt: String,
    max_output_tokens: u32,
    temperature: f32,
    timeout: Option<Duration>,
}

impl GroqAiService {
    pub fn new(config: &GroqConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &GroqConfig) -> Self {
        Self {
            client,
            url: format!("{}{}", config.base_url.trim_end_matches('/'), COMPLETIONS_PATH),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            timeout: config.timeout_seconds.map(Duration::from_secs),
        }
    }

    /// Returns `Ok(None)` when the model answered without any content.
    pub async fn try_interpret(&self, prompt_text: &str) -> Result<Option<String>> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt_text,
                },
            ],
            max_completion_tokens: self.max_output_tokens,
            temperature: self.temperature,
        };

        let mut builder = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request);

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        tracing::debug!(model = %self.model, "Sending {} chars to {}", prompt_text.len(), self.url);
        let response = builder.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(HoroscopeError::ApiRejected {
                endpoint: "chat/completions".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| HoroscopeError::MalformedResponse {
                message: format!("chat completion body could not be decoded: {}", e),
            })?;

        Ok(completion.first_text())
    }
}

#[async_trait]
impl Interpreter for GroqAiService {
    async fn interpret(&self, prompt_text: &str) -> String {
        match self.try_interpret(prompt_text).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!("Model returned no content");
                NO_VALID_RESPONSE.to_string()
            }
            Err(e) => {
                tracing::error!("Error while interpreting astrology: {}", e);
                format!("Error: {}", e)
            }
        }
    }
}
