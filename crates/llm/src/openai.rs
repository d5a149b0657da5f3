//! OpenAI-compatible chat completions backend
//!
//! Uses structured outputs (`response_format: json_schema`) so the model
//! answers with `{ "summary": ... }` directly.

use async_trait::async_trait;
use callconsole_common::{ConsoleError, Result};
use reqwest::Client;
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};

use crate::llm_trait::{BackendError, LlmBackend};
use crate::schema::summary_output_schema;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Chat completions client for OpenAI and API-compatible providers
#[derive(Clone)]
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: Client,
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| ConsoleError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("OpenAI-compatible client initialized: {} (model {})", base_url, model);
        Ok(Self {
            base_url,
            model,
            api_key: api_key.into(),
            client,
        })
    }

    fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(0.3),
            response_format: Some(json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "call_summary",
                    "strict": true,
                    "schema": summary_output_schema()
                }
            })),
        }
    }
}

#[async_trait]
impl LlmBackend for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> std::result::Result<Value, BackendError> {
        let url = format!("{}/chat/completions", self.base_url);

        debug!(
            "Sending chat completion - Model: {}, Prompt length: {}",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let message = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| BackendError::Decode("completion has no choices".to_string()))?;

        if let Some(refusal) = message.refusal {
            return Err(BackendError::Decode(format!("model refused: {}", refusal)));
        }

        let content = message
            .content
            .ok_or_else(|| BackendError::Decode("completion message has no content".to_string()))?;

        serde_json::from_str(&content)
            .map_err(|e| BackendError::Decode(format!("completion content is not JSON: {}", e)))
    }

    async fn test_connection(&self) -> bool {
        let url = format!("{}/models", self.base_url);

        match self.client.get(&url).bearer_auth(&self.api_key).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("OpenAI connection test failed: {}", e);
                false
            }
        }
    }
}
