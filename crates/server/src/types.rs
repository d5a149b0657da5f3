use callconsole_common::AiModel;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Error body returned to the console
///
/// Carries only the user-facing message; the failure kind stays in the logs.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Backend serving summaries
#[derive(Debug, Serialize)]
pub struct BackendInfo {
    /// "ollama" or "openai"
    pub name: String,

    /// Model requested from the backend
    pub model: String,
}

/// Model catalog response
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    /// Catalog entries
    pub models: Vec<AiModel>,

    /// Catalog id preselected in the console
    pub default: String,

    /// What actually produces summaries
    pub summarization: BackendInfo,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" when the backend answers, "degraded" otherwise
    pub status: String,

    pub backend: BackendInfo,

    pub backend_reachable: bool,

    pub timestamp: DateTime<Utc>,
}
