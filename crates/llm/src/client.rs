use async_trait::async_trait;
use callconsole_common::{ConsoleError, Result};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use crate::llm_trait::{BackendError, LlmBackend};
use crate::schema::summary_output_schema;
use crate::types::{GenerateOptions, GenerateRequest, GenerateResponse};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Ollama API client
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaClient {
    /// Create new Ollama client
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .build()
            .map_err(|e| ConsoleError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!("Ollama client initialized: {} (model {})", base_url, model);
        Ok(Self {
            base_url,
            model,
            client,
        })
    }

    fn build_request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: Some(false),
            format: Some(summary_output_schema()),
            options: Some(GenerateOptions {
                temperature: Some(0.3),
                top_p: Some(0.9),
                num_predict: Some(1000),
            }),
        }
    }
}

#[async_trait]
impl LlmBackend for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> std::result::Result<Value, BackendError> {
        let url = format!("{}/api/generate", self.base_url);

        debug!(
            "Sending generate request to Ollama - Model: {}, Prompt length: {}",
            self.model,
            prompt.len()
        );

        let response = self
            .client
            .post(&url)
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

        let result: GenerateResponse = response.json().await?;

        debug!(
            "Received response from Ollama - Length: {}, Done: {}",
            result.response.len(),
            result.done
        );

        serde_json::from_str(&result.response)
            .map_err(|e| BackendError::Decode(format!("Ollama response is not JSON: {}", e)))
    }

    async fn test_connection(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Ollama connection test failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> OllamaClient {
        OllamaClient::new(server.uri(), "llama3.2", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_creation_trims_slash() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.2", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "llama3.2");
        assert_eq!(client.name(), "ollama");
    }

    #[tokio::test]
    async fn test_generate_sends_schema_and_parses_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({
                "model": "llama3.2",
                "stream": false,
                "format": { "required": ["summary"] }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3.2",
                "response": "{\"summary\": \"Caller reset their password.\"}",
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).generate("prompt").await.unwrap();
        assert_eq!(reply, json!({ "summary": "Caller reset their password." }));
    }

    #[tokio::test]
    async fn test_generate_non_json_response_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama3.2",
                "response": "The caller wanted a refund.",
                "done": true
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        assert!(matches!(err, BackendError::Decode(_)));
    }

    #[tokio::test]
    async fn test_generate_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model 'llama3.2' not found"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate("prompt").await.unwrap_err();
        assert_eq!(
            err,
            BackendError::Status {
                status: 404,
                body: "model 'llama3.2' not found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(2))
                    .set_body_json(json!({ "response": "{}", "done": true })),
            )
            .mount(&server)
            .await;

        let client = OllamaClient::new(server.uri(), "llama3.2", Duration::from_millis(200)).unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert_eq!(err, BackendError::Timeout);
    }

    #[tokio::test]
    async fn test_generate_connection_refused() {
        let client = OllamaClient::new("http://127.0.0.1:1", "llama3.2", Duration::from_secs(2)).unwrap();
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, BackendError::Connection(_)));
    }

    #[tokio::test]
    async fn test_connection_probe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
            .mount(&server)
            .await;

        assert!(client_for(&server).test_connection().await);

        let offline = OllamaClient::new("http://127.0.0.1:1", "llama3.2", Duration::from_secs(2)).unwrap();
        assert!(!offline.test_connection().await);
    }
}
