use async_trait::async_trait;
use serde_json::Value;

/// Transport-level failure reported by a backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Could not reach the backend
    #[error("connection failed: {0}")]
    Connection(String),

    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// HTTP client gave up waiting
    #[error("request timed out")]
    Timeout,

    /// Reply arrived but could not be decoded into a structured object
    #[error("undecodable reply: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Status {
                status: status.as_u16(),
                body: error.to_string(),
            }
        } else {
            Self::Connection(error.to_string())
        }
    }
}

/// Language-model backend that turns one prompt into one structured reply
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Short backend identifier used in logs ("ollama", "openai")
    fn name(&self) -> &str;

    /// Model the backend is asked to run
    fn model(&self) -> &str;

    /// Send a prompt and return the reply parsed as JSON
    async fn generate(&self, prompt: &str) -> Result<Value, BackendError>;

    /// Test connection/availability
    async fn test_connection(&self) -> bool;
}
