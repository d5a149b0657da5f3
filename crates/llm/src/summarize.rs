use callconsole_common::{AppConfig, BackendKind, ConsoleError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::client::OllamaClient;
use crate::error::SummarizationError;
use crate::llm_trait::LlmBackend;
use crate::openai::OpenAiClient;
use crate::prompts::call_summary_prompt;
use crate::schema::validate_summary_reply;
use crate::types::{SummaryRequest, SummaryResponse};

/// Bounded wait used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Construct the backend named by the configuration
pub fn build_backend(config: &AppConfig) -> Result<Arc<dyn LlmBackend>> {
    let timeout = config.llm_timeout();

    let backend: Arc<dyn LlmBackend> = match config.llm_backend {
        BackendKind::Ollama => Arc::new(OllamaClient::new(
            config.llm_base_url.clone(),
            config.llm_model.clone(),
            timeout,
        )?),
        BackendKind::OpenAi => {
            let api_key = config.llm_api_key.clone().ok_or_else(|| {
                ConsoleError::config("LLM_API_KEY is required for the openai backend")
            })?;
            Arc::new(OpenAiClient::new(
                config.llm_base_url.clone(),
                config.llm_model.clone(),
                api_key,
                timeout,
            )?)
        }
    };

    Ok(backend)
}

/// Stateless call summarizer
///
/// One backend request per call, no retries, no caching. Safe to share
/// across tasks; concurrent calls do not interact.
#[derive(Clone)]
pub struct CallSummarizer {
    backend: Arc<dyn LlmBackend>,
    timeout: Duration,
}

impl CallSummarizer {
    /// Create new summarizer around an injected backend
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self {
            backend,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the bounded wait
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build backend and summarizer from configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let backend = build_backend(config)?;
        Ok(Self::new(backend).with_timeout(config.llm_timeout()))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether the backend currently answers
    pub async fn test_connection(&self) -> bool {
        self.backend.test_connection().await
    }

    /// Summarize one call transcript
    pub async fn summarize(
        &self,
        request: &SummaryRequest,
    ) -> std::result::Result<SummaryResponse, SummarizationError> {
        let prompt = self.prepare(request)?;
        let outcome = self.request_summary(&prompt).await;
        self.record(outcome)
    }

    /// Summarize, aborting the in-flight backend call when `cancel` fires
    pub async fn summarize_with_cancel(
        &self,
        request: &SummaryRequest,
        cancel: &CancellationToken,
    ) -> std::result::Result<SummaryResponse, SummarizationError> {
        let prompt = self.prepare(request)?;
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(SummarizationError::Cancelled),
            outcome = self.request_summary(&prompt) => outcome,
        };
        self.record(outcome)
    }

    /// Validate input and render the prompt
    fn prepare(&self, request: &SummaryRequest) -> std::result::Result<String, SummarizationError> {
        if request.transcript.trim().is_empty() {
            let err = SummarizationError::Validation("transcript is empty".to_string());
            warn!("Call summarization rejected ({}): {}", err.kind(), err);
            return Err(err);
        }

        info!(
            "Starting call summarization - Backend: {}, Model: {}, Transcript length: {} chars",
            self.backend.name(),
            self.backend.model(),
            request.transcript.len()
        );

        Ok(call_summary_prompt(&request.transcript))
    }

    async fn request_summary(
        &self,
        prompt: &str,
    ) -> std::result::Result<SummaryResponse, SummarizationError> {
        let reply = match tokio::time::timeout(self.timeout, self.backend.generate(prompt)).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => return Err(SummarizationError::from_backend(e, self.timeout)),
            Err(_) => return Err(SummarizationError::Timeout(self.timeout)),
        };

        debug!("Backend reply received, validating against summary schema");

        let summary = validate_summary_reply(reply)?;
        Ok(SummaryResponse::new(summary))
    }

    fn record(
        &self,
        outcome: std::result::Result<SummaryResponse, SummarizationError>,
    ) -> std::result::Result<SummaryResponse, SummarizationError> {
        match &outcome {
            Ok(response) => info!(
                "Call summary generated - Backend: {}, Summary length: {} chars",
                self.backend.name(),
                response.summary().len()
            ),
            Err(e) => warn!(
                "Call summarization failed ({}) - Backend: {}: {}",
                e.kind(),
                self.backend.name(),
                e
            ),
        }
        outcome
    }
}
